//! Hostile archetypes and their static stat table
//!
//! Per-class differences are data, looked up by class tag. Nothing here
//! scales with difficulty; the spawn director applies multipliers on top.

use serde::{Deserialize, Serialize};

use crate::entity::hostile::Target;

/// Enumerated hostile archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileClass {
    /// Fast, fragile melee swarmer
    LightMelee,
    /// Slow melee bruiser that goes for the core
    HeavyMelee,
    /// Keeps its distance and strikes from range
    RangedCaster,
    /// Rare heavy archetype
    Titan,
    /// Forced spawn when the awakening counter fills
    Colossus,
}

/// Static per-class stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub base_health: f32,
    /// World units per second before locomotion/phase multipliers
    pub base_speed: f32,
    /// Squared distance to the move target that allows a windup
    pub attack_range_sq: f32,
    /// Seconds between the end of one attack and the next windup
    pub attack_cooldown: f32,
    pub strike_damage: f32,
    /// Player must be this close at the strike for the hit to land
    pub strike_range: f32,
    /// Screen-shake intensity of a strike (0.0-1.0)
    pub impact_intensity: f32,
    pub score: u32,
}

const LIGHT_MELEE: ClassStats = ClassStats {
    base_health: 30.0,
    base_speed: 4.0,
    attack_range_sq: 2.25,
    attack_cooldown: 1.2,
    strike_damage: 8.0,
    strike_range: 2.0,
    impact_intensity: 0.1,
    score: 10,
};

const HEAVY_MELEE: ClassStats = ClassStats {
    base_health: 90.0,
    base_speed: 2.6,
    attack_range_sq: 6.25,
    attack_cooldown: 2.4,
    strike_damage: 20.0,
    strike_range: 3.0,
    impact_intensity: 0.3,
    score: 25,
};

const RANGED_CASTER: ClassStats = ClassStats {
    base_health: 45.0,
    base_speed: 3.2,
    attack_range_sq: 64.0,
    attack_cooldown: 2.0,
    strike_damage: 12.0,
    strike_range: 9.0,
    impact_intensity: 0.15,
    score: 20,
};

const TITAN: ClassStats = ClassStats {
    base_health: 400.0,
    base_speed: 2.0,
    attack_range_sq: 12.25,
    attack_cooldown: 3.5,
    strike_damage: 40.0,
    strike_range: 4.5,
    impact_intensity: 0.6,
    score: 150,
};

const COLOSSUS: ClassStats = ClassStats {
    base_health: 1500.0,
    base_speed: 1.4,
    attack_range_sq: 25.0,
    attack_cooldown: 5.0,
    strike_damage: 80.0,
    strike_range: 6.0,
    impact_intensity: 1.0,
    score: 500,
};

impl HostileClass {
    pub const ALL: [HostileClass; 5] = [
        HostileClass::LightMelee,
        HostileClass::HeavyMelee,
        HostileClass::RangedCaster,
        HostileClass::Titan,
        HostileClass::Colossus,
    ];

    pub fn stats(self) -> &'static ClassStats {
        match self {
            HostileClass::LightMelee => &LIGHT_MELEE,
            HostileClass::HeavyMelee => &HEAVY_MELEE,
            HostileClass::RangedCaster => &RANGED_CASTER,
            HostileClass::Titan => &TITAN,
            HostileClass::Colossus => &COLOSSUS,
        }
    }

    /// Heavy classes march on the core; the rest hunt the player
    pub fn default_target(self) -> Target {
        match self {
            HostileClass::LightMelee | HostileClass::RangedCaster => Target::Player,
            HostileClass::HeavyMelee | HostileClass::Titan | HostileClass::Colossus => Target::Core,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HostileClass::LightMelee => "light_melee",
            HostileClass::HeavyMelee => "heavy_melee",
            HostileClass::RangedCaster => "ranged_caster",
            HostileClass::Titan => "titan",
            HostileClass::Colossus => "colossus",
        }
    }
}
