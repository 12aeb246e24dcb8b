pub mod config;
pub mod error;
pub mod types;

pub use config::{BehaviorConfig, CombatConfig, EngineConfig, LifecycleConfig, SpawnConfig};
pub use error::{HordeError, Result};
pub use types::{EntityId, SimTime, Tick};
