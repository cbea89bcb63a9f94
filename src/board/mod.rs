//! Board vocabulary: powers, territories, orders and per-turn collections.

pub mod order;
pub mod province;
pub mod state;

pub use order::{Order, OrderError, OrderKind, TaggedOrder, TerritoryId};
pub use province::{
    coast_name, standard_territory, Power, StandardTerritory, UnknownPower, ALL_POWERS,
    STANDARD_TERRITORIES, STANDARD_TERRITORY_COUNT,
};
pub use state::{Ownership, TurnOrders};
