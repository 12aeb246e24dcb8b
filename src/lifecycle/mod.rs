//! Death handling, corpse removal and kill scoring

pub mod death;
pub mod scoring;

pub use death::{grace_expired, process_deaths, prune_corpses};
pub use scoring::ScoreLedger;
