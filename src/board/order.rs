//! Order types as reported by the order source.
//!
//! An order is keyed by its source territory inside a country's order map,
//! so the struct itself only carries the kind and the optional `from`/`to`
//! endpoints. The wire form mirrors the game site's JSON export:
//! `{"type": "SUPPORT", "from": "Lon", "to": "Nth"}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::province::Power;

/// Errors raised while reading order data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("empty territory identifier")]
    EmptyTerritory,

    #[error("unknown order type '{0}'")]
    UnknownKind(String),
}

/// A territory identifier such as `Lon` or `StP/nc`.
///
/// Never empty. Ordering is plain lexicographic on the identifier, which is
/// what makes battle output reproducible.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TerritoryId(String);

impl TerritoryId {
    /// Creates an identifier, rejecting blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, OrderError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(OrderError::EmptyTerritory);
        }
        if trimmed.len() == id.len() {
            Ok(TerritoryId(id))
        } else {
            Ok(TerritoryId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TerritoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TerritoryId {
    type Error = OrderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TerritoryId::new(s)
    }
}

impl TryFrom<&str> for TerritoryId {
    type Error = OrderError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        TerritoryId::new(s)
    }
}

impl From<TerritoryId> for String {
    fn from(id: TerritoryId) -> Self {
        id.0
    }
}

/// The four movement-phase order kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OrderKind {
    Hold,
    Move,
    Support,
    Convoy,
}

impl OrderKind {
    /// Returns the upper-case wire name.
    pub const fn wire_name(self) -> &'static str {
        match self {
            OrderKind::Hold => "HOLD",
            OrderKind::Move => "MOVE",
            OrderKind::Support => "SUPPORT",
            OrderKind::Convoy => "CONVOY",
        }
    }

    /// Parses a kind from its wire name, ignoring case.
    pub fn from_wire_name(s: &str) -> Option<OrderKind> {
        [OrderKind::Hold, OrderKind::Move, OrderKind::Support, OrderKind::Convoy]
            .into_iter()
            .find(|k| k.wire_name().eq_ignore_ascii_case(s.trim()))
    }
}

impl TryFrom<String> for OrderKind {
    type Error = OrderError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        OrderKind::from_wire_name(&s).ok_or(OrderError::UnknownKind(s))
    }
}

impl From<OrderKind> for &'static str {
    fn from(k: OrderKind) -> Self {
        k.wire_name()
    }
}

/// One order for the unit standing on its source territory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireOrder")]
pub struct Order {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<TerritoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<TerritoryId>,
}

/// Order as it appears on the wire, where `type` may be omitted.
#[derive(Deserialize)]
struct WireOrder {
    #[serde(rename = "type", default)]
    kind: Option<OrderKind>,
    #[serde(default)]
    from: Option<TerritoryId>,
    #[serde(default)]
    to: Option<TerritoryId>,
}

impl From<WireOrder> for Order {
    fn from(w: WireOrder) -> Self {
        // Without an explicit type, infer one from the endpoints present.
        let kind = w.kind.unwrap_or(match (&w.from, &w.to) {
            (None, None) => OrderKind::Hold,
            (None, Some(_)) => OrderKind::Move,
            (Some(_), _) => OrderKind::Support,
        });
        Order { kind, from: w.from, to: w.to }
    }
}

impl Order {
    pub fn hold() -> Self {
        Order { kind: OrderKind::Hold, from: None, to: None }
    }

    pub fn move_to(to: TerritoryId) -> Self {
        Order { kind: OrderKind::Move, from: None, to: Some(to) }
    }

    /// Support for the unit in `from`; `to` is `None` for a support to hold.
    pub fn support(from: TerritoryId, to: Option<TerritoryId>) -> Self {
        Order { kind: OrderKind::Support, from: Some(from), to }
    }

    pub fn convoy(from: TerritoryId, to: TerritoryId) -> Self {
        Order { kind: OrderKind::Convoy, from: Some(from), to: Some(to) }
    }

    /// Returns the territories this order references: its source plus any
    /// `from`/`to` endpoints, without duplicates.
    pub fn involved_regions<'a>(&'a self, source: &'a TerritoryId) -> Vec<&'a TerritoryId> {
        let mut regions = vec![source];
        for endpoint in [&self.from, &self.to].into_iter().flatten() {
            if !regions.contains(&endpoint) {
                regions.push(endpoint);
            }
        }
        regions
    }
}

/// An order together with the country that issued it and its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedOrder {
    pub country: Power,
    pub origin: TerritoryId,
    pub order: Order,
}

impl TaggedOrder {
    pub fn involved_regions(&self) -> Vec<&TerritoryId> {
        self.order.involved_regions(&self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: &str) -> TerritoryId {
        TerritoryId::new(id).unwrap()
    }

    #[test]
    fn territory_id_rejects_blank() {
        assert_eq!(TerritoryId::new(""), Err(OrderError::EmptyTerritory));
        assert_eq!(TerritoryId::new("   "), Err(OrderError::EmptyTerritory));
        assert_eq!(t(" Lon ").as_str(), "Lon");
    }

    #[test]
    fn involved_regions_of_each_kind() {
        let src = t("Lon");
        assert_eq!(Order::hold().involved_regions(&src), vec![&src]);

        let nth = t("Nth");
        let mv = Order::move_to(nth.clone());
        assert_eq!(mv.involved_regions(&src), vec![&src, &nth]);

        let yor = t("Yor");
        let sup = Order::support(yor.clone(), Some(nth.clone()));
        assert_eq!(sup.involved_regions(&src), vec![&src, &yor, &nth]);
    }

    #[test]
    fn self_loop_adds_no_region() {
        let src = t("Lon");
        let order = Order::support(src.clone(), Some(src.clone()));
        assert_eq!(order.involved_regions(&src), vec![&src]);
    }

    #[test]
    fn parses_wire_orders() {
        let order: Order = serde_json::from_str(r#"{"type": "MOVE", "to": "Nth"}"#).unwrap();
        assert_eq!(order, Order::move_to(t("Nth")));

        let order: Order =
            serde_json::from_str(r#"{"type": "convoy", "from": "Lon", "to": "Bel"}"#).unwrap();
        assert_eq!(order, Order::convoy(t("Lon"), t("Bel")));
    }

    #[test]
    fn infers_kind_when_type_is_missing() {
        let order: Order = serde_json::from_str(r#"{"to": "Nth"}"#).unwrap();
        assert_eq!(order.kind, OrderKind::Move);
        let order: Order = serde_json::from_str("{}").unwrap();
        assert_eq!(order.kind, OrderKind::Hold);
        let order: Order = serde_json::from_str(r#"{"from": "Hol"}"#).unwrap();
        assert_eq!(order.kind, OrderKind::Support);
    }

    #[test]
    fn rejects_bad_wire_orders() {
        assert!(serde_json::from_str::<Order>(r#"{"type": "RETREAT"}"#).is_err());
        assert!(serde_json::from_str::<Order>(r#"{"type": "MOVE", "to": ""}"#).is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(Order::support(t("Hol"), None)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "SUPPORT", "from": "Hol"}));
    }
}
