//! Per-battle summaries: who ordered what, who held what, and the text
//! blocks handed to the newsroom prompts.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::board::order::{TaggedOrder, TerritoryId};
use crate::board::province::{Power, ALL_POWERS};
use crate::board::state::{Ownership, TurnOrders};
use crate::source::TerritoryCatalog;

use super::grouper::Battle;

/// Everything known about one battle before the turn resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleSummary {
    pub territories: Battle,
    /// Orders touching the battle, one per origin, by country then origin.
    pub orders: Vec<TaggedOrder>,
    /// Battle territories with a known owner.
    pub possessions: Vec<(TerritoryId, Power)>,
    /// Ordering and possessing countries, in standard power order.
    pub countries: Vec<Power>,
}

impl BattleSummary {
    /// A battle is contested when more than one country has a stake in it.
    pub fn is_contested(&self) -> bool {
        self.countries.len() > 1
    }

    /// The countries involved as a YAML-style list.
    pub fn countries_text(&self) -> String {
        let names: Vec<&str> = self.countries.iter().map(|c| c.name()).collect();
        YamlList(&names).to_string()
    }

    /// The battle orders with territory ids replaced by display names.
    pub fn orders_text(&self, catalog: &TerritoryCatalog) -> String {
        OrdersBlock { orders: &self.orders, catalog }.to_string()
    }

    /// Territories held before the battle, grouped by owner.
    pub fn possessions_text(&self, catalog: &TerritoryCatalog) -> String {
        PossessionsBlock { possessions: &self.possessions, catalog }.to_string()
    }
}

struct YamlList<'a, S>(&'a [S]);

impl<S: AsRef<str>> fmt::Display for YamlList<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "[]");
        }
        for item in self.0 {
            writeln!(f, "- {}", item.as_ref())?;
        }
        Ok(())
    }
}

struct OrdersBlock<'a> {
    orders: &'a [TaggedOrder],
    catalog: &'a TerritoryCatalog,
}

impl fmt::Display for OrdersBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.orders.is_empty() {
            return writeln!(f, "[]");
        }
        for tagged in self.orders {
            writeln!(f, "- country: {}", tagged.country)?;
            writeln!(f, "  origin: {}", self.catalog.display_name(&tagged.origin))?;
            writeln!(f, "  type: {}", tagged.order.kind.wire_name())?;
            if let Some(from) = &tagged.order.from {
                writeln!(f, "  from: {}", self.catalog.display_name(from))?;
            }
            if let Some(to) = &tagged.order.to {
                writeln!(f, "  to: {}", self.catalog.display_name(to))?;
            }
        }
        Ok(())
    }
}

struct PossessionsBlock<'a> {
    possessions: &'a [(TerritoryId, Power)],
    catalog: &'a TerritoryCatalog,
}

impl fmt::Display for PossessionsBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for power in ALL_POWERS {
            let held: Vec<String> = self
                .possessions
                .iter()
                .filter(|(_, owner)| *owner == power)
                .map(|(territory, _)| self.catalog.display_name(territory))
                .collect();
            if held.is_empty() {
                continue;
            }
            any = true;
            writeln!(f, "{power}:")?;
            write!(f, "{}", YamlList(&held))?;
        }
        if !any {
            writeln!(f, "{{}}")?;
        }
        Ok(())
    }
}

/// Builds one summary per battle, in the order the battles are given.
pub fn summarize_battles(
    battles: &[Battle],
    orders: &TurnOrders,
    ownership: &Ownership,
) -> Vec<BattleSummary> {
    let index: BTreeMap<&TerritoryId, usize> = battles
        .iter()
        .enumerate()
        .flat_map(|(i, battle)| battle.iter().map(move |t| (t, i)))
        .collect();

    let mut battle_orders: Vec<Vec<TaggedOrder>> = vec![Vec::new(); battles.len()];
    for tagged in orders.tagged() {
        // All regions of an order share one battle; the origin locates it.
        if let Some(&i) = index.get(&tagged.origin) {
            battle_orders[i].push(tagged);
        }
    }

    battles
        .iter()
        .zip(battle_orders)
        .map(|(battle, mut orders)| {
            orders.sort_by(|a, b| (a.country, &a.origin).cmp(&(b.country, &b.origin)));
            let mut seen = BTreeSet::new();
            orders.retain(|o| seen.insert(o.origin.clone()));

            let possessions: Vec<(TerritoryId, Power)> = battle
                .iter()
                .filter_map(|t| ownership.owner(t).map(|owner| (t.clone(), owner)))
                .collect();

            let stakeholders: BTreeSet<Power> = orders
                .iter()
                .map(|o| o.country)
                .chain(possessions.iter().map(|(_, owner)| *owner))
                .collect();

            BattleSummary {
                territories: battle.clone(),
                orders,
                possessions,
                countries: stakeholders.into_iter().collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::grouper::group_battles;
    use crate::board::order::Order;

    fn t(id: &str) -> TerritoryId {
        TerritoryId::new(id).unwrap()
    }

    fn north_sea_turn() -> (TurnOrders, Ownership) {
        let orders: TurnOrders = [
            (Power::England, t("Nth"), Order::move_to(t("Hol"))),
            (Power::England, t("Lon"), Order::support(t("Nth"), Some(t("Hol")))),
            (Power::Germany, t("Hol"), Order::hold()),
            (Power::France, t("Par"), Order::hold()),
        ]
        .into_iter()
        .collect();
        let ownership: Ownership = [
            (t("Lon"), Power::England),
            (t("Hol"), Power::Germany),
            (t("Par"), Power::France),
            (t("Mos"), Power::Russia),
        ]
        .into_iter()
        .collect();
        (orders, ownership)
    }

    #[test]
    fn summaries_follow_battle_order() {
        let (orders, ownership) = north_sea_turn();
        let battles = group_battles(&orders);
        let summaries = summarize_battles(&battles, &orders, &ownership);

        assert_eq!(summaries.len(), 2);
        let main = &summaries[0];
        assert_eq!(main.territories, battles[0]);
        let origins: Vec<&str> = main.orders.iter().map(|o| o.origin.as_str()).collect();
        assert_eq!(origins, vec!["Lon", "Nth", "Hol"]);
        assert_eq!(
            main.possessions,
            vec![(t("Hol"), Power::Germany), (t("Lon"), Power::England)]
        );
        assert_eq!(main.countries, vec![Power::England, Power::Germany]);
        assert!(main.is_contested());

        let quiet = &summaries[1];
        assert_eq!(quiet.countries, vec![Power::France]);
        assert!(!quiet.is_contested());
    }

    #[test]
    fn possessors_count_as_involved() {
        let orders: TurnOrders = [(Power::Russia, t("Ukr"), Order::move_to(t("Rum")))]
            .into_iter()
            .collect();
        let ownership: Ownership = [(t("Rum"), Power::Turkey)].into_iter().collect();
        let battles = group_battles(&orders);
        let summaries = summarize_battles(&battles, &orders, &ownership);
        assert_eq!(summaries[0].countries, vec![Power::Russia, Power::Turkey]);
        assert!(summaries[0].is_contested());
    }

    #[test]
    fn text_blocks_use_display_names() {
        let (orders, ownership) = north_sea_turn();
        let battles = group_battles(&orders);
        let summaries = summarize_battles(&battles, &orders, &ownership);
        let catalog = TerritoryCatalog::standard();
        let main = &summaries[0];

        assert_eq!(main.countries_text(), "- England\n- Germany\n");
        assert_eq!(
            main.possessions_text(&catalog),
            "England:\n- London\nGermany:\n- Holland\n"
        );
        let orders_text = main.orders_text(&catalog);
        assert!(orders_text.starts_with("- country: England\n  origin: London\n  type: SUPPORT\n"));
        assert!(orders_text.contains("  from: North Sea\n  to: Holland\n"));
        assert!(orders_text.contains("- country: Germany\n  origin: Holland\n  type: HOLD\n"));
    }

    #[test]
    fn empty_possessions_render_as_empty_mapping() {
        let orders: TurnOrders = [(Power::Italy, t("Tys"), Order::hold())].into_iter().collect();
        let battles = group_battles(&orders);
        let summaries = summarize_battles(&battles, &orders, &Ownership::new());
        assert_eq!(summaries[0].possessions_text(&TerritoryCatalog::standard()), "{}\n");
    }
}
