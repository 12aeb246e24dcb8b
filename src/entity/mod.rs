//! Hostile entities: class table, entity record and the population store

pub mod class;
pub mod hostile;
pub mod population;

pub use class::{ClassStats, HostileClass};
pub use hostile::{AttackPhase, AttackState, BehaviorState, DamageOutcome, Hostile, Target};
pub use population::Population;
