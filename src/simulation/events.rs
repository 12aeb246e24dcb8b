//! Events produced during a tick
//!
//! Returned from `HordeEngine::tick` as an ordered list instead of being
//! broadcast, so callers route them and tests assert on them directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, SimTime};
use crate::entity::HostileClass;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// A hostile entered the population
    Spawned {
        id: EntityId,
        class: HostileClass,
        position: Vec2,
    },
    /// A colossus spawn consumed the awakening counter
    AwakeningTriggered { id: EntityId },
    /// Damage landed on a hostile
    Hit {
        id: EntityId,
        position: Vec2,
        damage: f32,
        remaining_health: f32,
    },
    /// Fired exactly once per hostile; drives score and loot
    Killed {
        id: EntityId,
        class: HostileClass,
        position: Vec2,
        score: u32,
    },
    /// Low-probability extra drop rolled on death
    BonusLoot {
        id: EntityId,
        class: HostileClass,
        position: Vec2,
    },
    /// Polyline of a chain beam, origin first
    ChainBeam { path: Vec<Vec2> },
    /// A hostile strike reached the player
    PlayerDamaged { attacker: EntityId, damage: f32 },
    /// A hostile strike reached the defended core
    CoreDamaged { attacker: EntityId, damage: f32 },
    /// Screen-shake hint at the strike position
    Impact { position: Vec2, intensity: f32 },
    /// Death shock stunned a nearby hostile
    Stunned { id: EntityId, until: SimTime },
    /// A corpse left the population after its grace window
    Despawned { id: EntityId },
    /// Entity count differs from the previous snapshot
    PopulationChanged { count: usize },
}

impl SimulationEvent {
    pub fn is_kill(&self) -> bool {
        matches!(self, SimulationEvent::Killed { .. })
    }
}
