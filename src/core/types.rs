//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for hostile entities
///
/// Handed out monotonically by the population. Ids are never reused within
/// one engine, so a stale id held by a consumer cannot alias a newer entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulation clock in seconds since the engine started
///
/// Double precision: an f32 clock loses millisecond resolution within a
/// few hours of play. Durations stay f32 and are widened at comparison.
pub type SimTime = f64;

/// Simulation tick counter
pub type Tick = u64;
