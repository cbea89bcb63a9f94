//! Per-turn order and ownership collections.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::order::{Order, TaggedOrder, TerritoryId};
use super::province::{Power, ALL_POWERS};

/// Every order of one turn: country -> source territory -> order.
///
/// Both levels are ordered maps, so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnOrders(BTreeMap<Power, BTreeMap<TerritoryId, Order>>);

impl TurnOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `order` for the unit of `country` on `source`, replacing any
    /// earlier order for that unit.
    pub fn insert(&mut self, country: Power, source: TerritoryId, order: Order) {
        self.0.entry(country).or_default().insert(source, order);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|orders| orders.is_empty())
    }

    /// Total number of orders across all countries.
    pub fn len(&self) -> usize {
        self.0.values().map(|orders| orders.len()).sum()
    }

    /// Orders of one country, if it issued any.
    pub fn for_country(&self, country: Power) -> Option<&BTreeMap<TerritoryId, Order>> {
        self.0.get(&country)
    }

    /// Iterates `(country, source, order)` in country then source order.
    pub fn iter(&self) -> impl Iterator<Item = (Power, &TerritoryId, &Order)> + '_ {
        self.0.iter().flat_map(|(country, orders)| {
            orders.iter().map(move |(source, order)| (*country, source, order))
        })
    }

    /// Iterates every order tagged with its country and origin.
    pub fn tagged(&self) -> impl Iterator<Item = TaggedOrder> + '_ {
        self.iter().map(|(country, source, order)| TaggedOrder {
            country,
            origin: source.clone(),
            order: order.clone(),
        })
    }

    /// Every distinct territory referenced by any order.
    pub fn territories(&self) -> BTreeSet<&TerritoryId> {
        self.iter()
            .flat_map(|(_, source, order)| order.involved_regions(source))
            .collect()
    }
}

impl FromIterator<(Power, TerritoryId, Order)> for TurnOrders {
    fn from_iter<I: IntoIterator<Item = (Power, TerritoryId, Order)>>(iter: I) -> Self {
        let mut orders = TurnOrders::new();
        for (country, source, order) in iter {
            orders.insert(country, source, order);
        }
        orders
    }
}

/// Territory ownership before the turn resolves: territory -> owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ownership(BTreeMap<TerritoryId, Power>);

impl Ownership {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, territory: TerritoryId, owner: Power) {
        self.0.insert(territory, owner);
    }

    pub fn owner(&self, territory: &TerritoryId) -> Option<Power> {
        self.0.get(territory).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of territories held by each power, most first.
    ///
    /// Ties keep standard power order; powers holding nothing are omitted.
    pub fn counts(&self) -> Vec<(Power, usize)> {
        let mut counts: Vec<(Power, usize)> = ALL_POWERS
            .iter()
            .map(|&p| (p, self.0.values().filter(|&&owner| owner == p).count()))
            .filter(|&(_, n)| n > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl FromIterator<(TerritoryId, Power)> for Ownership {
    fn from_iter<I: IntoIterator<Item = (TerritoryId, Power)>>(iter: I) -> Self {
        Ownership(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: &str) -> TerritoryId {
        TerritoryId::new(id).unwrap()
    }

    #[test]
    fn empty_orders() {
        let orders = TurnOrders::new();
        assert!(orders.is_empty());
        assert_eq!(orders.len(), 0);
        assert!(orders.territories().is_empty());
    }

    #[test]
    fn iteration_is_country_then_source() {
        let orders: TurnOrders = [
            (Power::France, t("Par"), Order::hold()),
            (Power::England, t("Lon"), Order::move_to(t("Nth"))),
            (Power::England, t("Edi"), Order::hold()),
        ]
        .into_iter()
        .collect();

        let seen: Vec<(Power, &str)> =
            orders.iter().map(|(c, s, _)| (c, s.as_str())).collect();
        assert_eq!(
            seen,
            vec![(Power::England, "Edi"), (Power::England, "Lon"), (Power::France, "Par")]
        );
        assert_eq!(orders.len(), 3);
        assert_eq!(orders.for_country(Power::England).map(|o| o.len()), Some(2));
        assert!(orders.for_country(Power::Italy).is_none());
    }

    #[test]
    fn territories_are_deduplicated() {
        let orders: TurnOrders = [
            (Power::England, t("Lon"), Order::move_to(t("Nth"))),
            (Power::England, t("Edi"), Order::support(t("Lon"), Some(t("Nth")))),
        ]
        .into_iter()
        .collect();
        let ids: Vec<&str> = orders.territories().into_iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["Edi", "Lon", "Nth"]);
    }

    #[test]
    fn parses_country_keyed_json() {
        let json = r#"{"England": {"Lon": {"type": "MOVE", "to": "Nth"}}, "Germany": {"Hol": {"type": "HOLD"}}}"#;
        let orders: TurnOrders = serde_json::from_str(json).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(
            orders.for_country(Power::Germany).and_then(|o| o.get(&t("Hol"))),
            Some(&Order::hold())
        );
    }

    #[test]
    fn ownership_counts_most_first() {
        let owned: Ownership = [
            (t("Lon"), Power::England),
            (t("Par"), Power::France),
            (t("Bre"), Power::France),
            (t("Edi"), Power::England),
            (t("Mar"), Power::France),
            (t("Vie"), Power::Austria),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            owned.counts(),
            vec![(Power::France, 3), (Power::England, 2), (Power::Austria, 1)]
        );
        assert_eq!(owned.owner(&t("Lon")), Some(Power::England));
        assert_eq!(owned.owner(&t("Mos")), None);
    }
}
