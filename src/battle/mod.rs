//! Battle detection and summarisation.

pub mod grouper;
pub mod summary;

pub use grouper::{battle_of, group_battles, Battle};
pub use summary::{summarize_battles, BattleSummary};
