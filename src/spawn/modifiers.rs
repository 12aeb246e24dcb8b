//! Night events and biome weighting for the spawn director

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::HordeError;

/// Class weights for one weighted roll: light, heavy, ranged
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassWeights {
    pub light: f32,
    pub heavy: f32,
    pub ranged: f32,
}

/// Time-boxed difficulty modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NightEvent {
    #[default]
    Calm,
    /// Many fragile, fast spawns
    Rush,
    /// Few, slow, very durable spawns
    Siege,
}

/// Multipliers an active night event applies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventModifier {
    /// Divides the spawn interval
    pub spawn_rate: f32,
    pub cap: f32,
    pub health: f32,
    pub speed: f32,
}

impl NightEvent {
    pub fn modifier(self) -> EventModifier {
        match self {
            NightEvent::Calm => EventModifier {
                spawn_rate: 1.0,
                cap: 1.0,
                health: 1.0,
                speed: 1.0,
            },
            NightEvent::Rush => EventModifier {
                spawn_rate: 2.0,
                cap: 1.5,
                health: 0.6,
                speed: 1.2,
            },
            NightEvent::Siege => EventModifier {
                spawn_rate: 0.6,
                cap: 0.8,
                health: 1.8,
                speed: 0.9,
            },
        }
    }

    /// Weights that replace the biome roll while the event is active
    pub fn class_override(self) -> Option<ClassWeights> {
        match self {
            NightEvent::Calm => None,
            NightEvent::Rush => Some(ClassWeights {
                light: 0.8,
                heavy: 0.05,
                ranged: 0.15,
            }),
            NightEvent::Siege => Some(ClassWeights {
                light: 0.15,
                heavy: 0.7,
                ranged: 0.15,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NightEvent::Calm => "calm",
            NightEvent::Rush => "rush",
            NightEvent::Siege => "siege",
        }
    }
}

impl fmt::Display for NightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NightEvent {
    type Err = HordeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "calm" | "none" => Ok(NightEvent::Calm),
            "rush" => Ok(NightEvent::Rush),
            "siege" => Ok(NightEvent::Siege),
            _ => Err(HordeError::UnknownName {
                kind: "night event",
                name: s.to_string(),
            }),
        }
    }
}

/// Biome the arena sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Grassland,
    Forest,
    Desert,
    Tundra,
    /// Ancient ruins; titans stir here far more often
    Ruins,
}

impl Biome {
    pub fn class_weights(self) -> ClassWeights {
        match self {
            Biome::Grassland => ClassWeights {
                light: 0.6,
                heavy: 0.25,
                ranged: 0.15,
            },
            Biome::Forest => ClassWeights {
                light: 0.5,
                heavy: 0.2,
                ranged: 0.3,
            },
            Biome::Desert => ClassWeights {
                light: 0.45,
                heavy: 0.4,
                ranged: 0.15,
            },
            Biome::Tundra => ClassWeights {
                light: 0.35,
                heavy: 0.5,
                ranged: 0.15,
            },
            Biome::Ruins => ClassWeights {
                light: 0.4,
                heavy: 0.3,
                ranged: 0.3,
            },
        }
    }

    /// Chance that a spawn here is a titan, rolled before the class weights
    pub fn titan_chance(self) -> f32 {
        match self {
            Biome::Ruins => 0.05,
            Biome::Tundra => 0.015,
            Biome::Grassland | Biome::Forest | Biome::Desert => 0.01,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Grassland => "grassland",
            Biome::Forest => "forest",
            Biome::Desert => "desert",
            Biome::Tundra => "tundra",
            Biome::Ruins => "ruins",
        }
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Biome {
    type Err = HordeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grassland" => Ok(Biome::Grassland),
            "forest" => Ok(Biome::Forest),
            "desert" => Ok(Biome::Desert),
            "tundra" => Ok(Biome::Tundra),
            "ruins" => Ok(Biome::Ruins),
            _ => Err(HordeError::UnknownName {
                kind: "biome",
                name: s.to_string(),
            }),
        }
    }
}
