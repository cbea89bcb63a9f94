//! Groups the territories of one turn into battles.
//!
//! Territories are nodes of an undirected graph with an edge between any two
//! territories named by the same order. Each connected component is a battle.
//! Components are found by flood fill from an unprocessed pool, and the
//! result is sorted largest first with ties broken by territory id.

use std::collections::{BTreeMap, BTreeSet};

use crate::board::order::TerritoryId;
use crate::board::state::TurnOrders;

/// A maximal set of territories linked through shared orders.
pub type Battle = BTreeSet<TerritoryId>;

/// Partitions every territory referenced by `orders` into battles.
///
/// The union of the returned battles is exactly the set of referenced
/// territories and no territory appears twice. Battles are ordered by
/// descending size; equal sizes are ordered by their territory ids.
pub fn group_battles(orders: &TurnOrders) -> Vec<Battle> {
    let links = link_territories(orders);

    let mut unprocessed: BTreeSet<&TerritoryId> = links.keys().copied().collect();
    let mut battles = Vec::new();

    while let Some(seed) = unprocessed.pop_first() {
        let mut checked: BTreeSet<&TerritoryId> = BTreeSet::new();
        let mut unchecked = vec![seed];

        while let Some(region) = unchecked.pop() {
            if !checked.insert(region) {
                continue;
            }
            if let Some(neighbours) = links.get(region) {
                unchecked.extend(neighbours.iter().copied().filter(|n| !checked.contains(n)));
            }
        }

        for region in &checked {
            unprocessed.remove(region);
        }
        battles.push(checked.into_iter().cloned().collect::<Battle>());
    }

    battles.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    battles
}

/// Builds the adjacency of the order graph.
///
/// Every referenced territory gets an entry, even when it links to nothing
/// but itself, so lone holds still surface as singleton battles.
fn link_territories(orders: &TurnOrders) -> BTreeMap<&TerritoryId, BTreeSet<&TerritoryId>> {
    let mut links: BTreeMap<&TerritoryId, BTreeSet<&TerritoryId>> = BTreeMap::new();
    for (_, source, order) in orders.iter() {
        let involved = order.involved_regions(source);
        for &region in &involved {
            let entry = links.entry(region).or_default();
            entry.extend(involved.iter().copied().filter(|&other| other != region));
        }
    }
    links
}

/// Returns the index of the battle containing `territory`, if any.
pub fn battle_of(battles: &[Battle], territory: &TerritoryId) -> Option<usize> {
    battles.iter().position(|b| b.contains(territory))
}
