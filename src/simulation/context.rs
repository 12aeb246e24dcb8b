//! Per-tick inputs supplied by the engine's collaborators
//!
//! The player/structure side keeps `player_position` current, the
//! environment owns obstacles and the core, and the progression side owns
//! difficulty. The engine only writes back `awakening_progress` when a
//! colossus spawns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::spatial::Obstacle;
use crate::spawn::modifiers::{Biome, NightEvent};

/// Difficulty and progression inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub level: u32,
    pub wave: u32,
    pub night_event: NightEvent,
    pub biome: Biome,
    /// Percent toward a forced colossus spawn; reset by the engine
    pub awakening_progress: f32,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            level: 1,
            wave: 1,
            night_event: NightEvent::Calm,
            biome: Biome::Grassland,
            awakening_progress: 0.0,
        }
    }
}

/// Everything a tick reads from the outside world
#[derive(Debug, Clone, Default)]
pub struct TickContext {
    pub player_position: Vec2,
    pub core_position: Vec2,
    pub obstacles: Vec<Obstacle>,
    pub progression: Progression,
}

impl TickContext {
    pub fn new(player_position: Vec2, core_position: Vec2) -> Self {
        Self {
            player_position,
            core_position,
            ..Self::default()
        }
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_progression(mut self, progression: Progression) -> Self {
        self.progression = progression;
        self
    }
}
