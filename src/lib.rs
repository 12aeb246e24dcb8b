//! Horde Engine - hostile-entity simulation for a top-down survival game

pub mod behavior;
pub mod combat;
pub mod core;
pub mod entity;
pub mod lifecycle;
pub mod simulation;
pub mod spatial;
pub mod spawn;

pub use crate::combat::{AttackKind, AttackRequest, AttackSource};
pub use crate::core::{EngineConfig, EntityId, HordeError, Result};
pub use crate::entity::{Hostile, HostileClass};
pub use crate::simulation::{HordeEngine, Progression, Snapshot, SimulationEvent, TickContext, TickOutput};
pub use crate::spatial::Obstacle;
pub use crate::spawn::{Biome, NightEvent, SpawnRequest};
