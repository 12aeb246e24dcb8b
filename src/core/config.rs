//! Engine configuration with documented constants
//!
//! Every tunable number of the spawn director, behavior machine, combat
//! resolution and lifecycle step is collected here. Per-class stats live in
//! the class table (`entity::class`), not here.

use std::f32::consts::PI;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::error::{HordeError, Result};

/// Upper bound on chain links accepted from a config file
pub const MAX_CHAIN_LINKS: usize = 32;

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub spawn: SpawnConfig,
    pub behavior: BehaviorConfig,
    pub combat: CombatConfig,
    pub lifecycle: LifecycleConfig,
}

/// Spawn director tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// When false the director never spawns; scripted spawns still work
    pub enabled: bool,

    /// Seconds between spawns at level 1 with no night event
    pub base_interval: f32,

    /// Interval shrinks by this much per difficulty level above 1
    pub interval_reduction_per_level: f32,

    /// Floor for the spawn interval after level and event scaling
    pub min_interval: f32,

    /// Population cap at level 1, wave 1
    pub base_cap: u32,
    pub cap_per_level: u32,
    pub cap_per_wave: u32,

    /// Hard ceiling on the cap regardless of scaling
    pub max_cap: u32,

    /// k1 in `1 + (level-1)*k1 + (wave-1)*k2`
    pub health_per_level: f32,

    /// k2 in `1 + (level-1)*k1 + (wave-1)*k2`
    pub health_per_wave: f32,

    /// Fraction of the health scaling applied to speed
    ///
    /// At 0.25 a spawn with 2.0x health scaling moves 1.25x faster.
    pub speed_scaling_share: f32,

    /// Spawn ring around the arena center
    pub ring_min_radius: f32,
    pub ring_max_radius: f32,
    pub arena_center: Vec2,

    /// Awakening progress at which the next spawn is forced to a colossus
    pub awakening_threshold: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_interval: 2.0,
            interval_reduction_per_level: 0.15,
            min_interval: 0.4,
            base_cap: 20,
            cap_per_level: 5,
            cap_per_wave: 2,
            max_cap: 150,
            health_per_level: 0.15,
            health_per_wave: 0.08,
            speed_scaling_share: 0.25,
            ring_min_radius: 45.0,
            ring_max_radius: 60.0,
            arena_center: Vec2::ZERO,
            awakening_threshold: 100.0,
        }
    }
}

/// Locomotion, steering and attack-cycle tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub patrol_speed_multiplier: f32,
    pub chase_speed_multiplier: f32,

    /// Vision radius at level 1 (world units)
    pub base_vision_radius: f32,
    pub vision_per_level: f32,

    /// Extra distance beyond the vision radius before CHASE drops back to PATROL
    ///
    /// Must be positive, otherwise an entity parked on the boundary flips
    /// state every tick.
    pub vision_hysteresis: f32,

    /// Compass waypoints sit this far from the core
    pub patrol_radius: f32,
    pub waypoint_reach: f32,

    pub separation_radius: f32,
    pub separation_weight: f32,
    pub obstacle_avoid_radius: f32,
    pub obstacle_repulsion: f32,

    /// Attack phase durations (seconds)
    pub windup_duration: f32,
    pub strike_duration: f32,
    pub recovery_duration: f32,

    /// Attack phase speed multipliers
    pub windup_speed_multiplier: f32,
    pub strike_speed_multiplier: f32,
    pub recovery_speed_multiplier: f32,

    /// Any entity this close to the core may start an attack
    pub core_attack_radius: f32,

    /// A strike that misses the player still damages the core inside this radius
    pub core_strike_radius: f32,

    /// Maximum cosmetic jitter offset while stunned or dying
    pub jitter_amplitude: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            patrol_speed_multiplier: 0.6,
            chase_speed_multiplier: 1.6,
            base_vision_radius: 12.0,
            vision_per_level: 1.5,
            vision_hysteresis: 4.0,
            patrol_radius: 30.0,
            waypoint_reach: 2.0,
            separation_radius: 1.5,
            separation_weight: 1.0,
            obstacle_avoid_radius: 2.0,
            obstacle_repulsion: 1.5,
            windup_duration: 0.6,
            strike_duration: 0.15,
            recovery_duration: 0.5,
            windup_speed_multiplier: 0.1,
            strike_speed_multiplier: 5.0,
            recovery_speed_multiplier: 0.2,
            core_attack_radius: 6.0,
            core_strike_radius: 8.0,
            jitter_amplitude: 0.08,
        }
    }
}

/// Hit-test tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Half-angle of the melee arc (radians)
    pub melee_arc_tolerance: f32,

    /// Half-angle of the ranged line (radians)
    pub ranged_line_tolerance: f32,
    pub ranged_line_max_hits: usize,

    /// Each chain link searches this far from the previous hit
    pub chain_radius: f32,

    /// Links after the initial hit
    pub chain_max_links: usize,

    /// Damage multiplier applied per link
    pub chain_falloff: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            melee_arc_tolerance: 1.0,
            ranged_line_tolerance: 0.15,
            ranged_line_max_hits: 3,
            chain_radius: 8.0,
            chain_max_links: 3,
            chain_falloff: 0.7,
        }
    }
}

/// Death handling tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Seconds a dying entity stays in the population
    pub death_grace: f32,

    /// Squared radius of the stun applied around a fresh death
    pub death_shock_radius_sq: f32,

    /// Stun length applied by a death shock (seconds)
    pub death_shock_stun: f32,

    /// Probability of a bonus loot drop per death
    pub bonus_loot_chance: f32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            death_grace: 3.0,
            death_shock_radius_sq: 9.0,
            death_shock_stun: 0.8,
            bonus_loot_chance: 0.05,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content).map_err(|e| {
            tracing::warn!("Rejected config {}: {}", path.display(), e);
            e
        })?;
        tracing::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Every float tunable by name
    fn float_fields(&self) -> [(&'static str, f32); 39] {
        let (s, b, c, l) = (&self.spawn, &self.behavior, &self.combat, &self.lifecycle);
        [
            ("base_interval", s.base_interval),
            ("interval_reduction_per_level", s.interval_reduction_per_level),
            ("min_interval", s.min_interval),
            ("health_per_level", s.health_per_level),
            ("health_per_wave", s.health_per_wave),
            ("speed_scaling_share", s.speed_scaling_share),
            ("ring_min_radius", s.ring_min_radius),
            ("ring_max_radius", s.ring_max_radius),
            ("arena_center.x", s.arena_center.x),
            ("arena_center.y", s.arena_center.y),
            ("awakening_threshold", s.awakening_threshold),
            ("patrol_speed_multiplier", b.patrol_speed_multiplier),
            ("chase_speed_multiplier", b.chase_speed_multiplier),
            ("base_vision_radius", b.base_vision_radius),
            ("vision_per_level", b.vision_per_level),
            ("vision_hysteresis", b.vision_hysteresis),
            ("patrol_radius", b.patrol_radius),
            ("waypoint_reach", b.waypoint_reach),
            ("separation_radius", b.separation_radius),
            ("separation_weight", b.separation_weight),
            ("obstacle_avoid_radius", b.obstacle_avoid_radius),
            ("obstacle_repulsion", b.obstacle_repulsion),
            ("windup_duration", b.windup_duration),
            ("strike_duration", b.strike_duration),
            ("recovery_duration", b.recovery_duration),
            ("windup_speed_multiplier", b.windup_speed_multiplier),
            ("strike_speed_multiplier", b.strike_speed_multiplier),
            ("recovery_speed_multiplier", b.recovery_speed_multiplier),
            ("core_attack_radius", b.core_attack_radius),
            ("core_strike_radius", b.core_strike_radius),
            ("jitter_amplitude", b.jitter_amplitude),
            ("melee_arc_tolerance", c.melee_arc_tolerance),
            ("ranged_line_tolerance", c.ranged_line_tolerance),
            ("chain_radius", c.chain_radius),
            ("chain_falloff", c.chain_falloff),
            ("death_grace", l.death_grace),
            ("death_shock_radius_sq", l.death_shock_radius_sq),
            ("death_shock_stun", l.death_shock_stun),
            ("bonus_loot_chance", l.bonus_loot_chance),
        ]
    }

    /// Validate configuration for internal consistency
    ///
    /// Non-finite floats are rejected up front; the range checks below
    /// would all let a NaN through.
    pub fn validate(&self) -> Result<()> {
        if let Some((name, value)) = self.float_fields().into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(invalid(format!("{} ({}) must be finite", name, value)));
        }

        let spawn = &self.spawn;
        if spawn.ring_min_radius < 0.0 || spawn.ring_min_radius > spawn.ring_max_radius {
            return Err(invalid(format!(
                "spawn ring must satisfy 0 <= min ({}) <= max ({})",
                spawn.ring_min_radius, spawn.ring_max_radius
            )));
        }
        if spawn.base_interval <= 0.0 || spawn.min_interval <= 0.0 {
            return Err(invalid("spawn intervals must be positive"));
        }
        if spawn.awakening_threshold <= 0.0 {
            return Err(invalid("awakening_threshold must be positive"));
        }

        let behavior = &self.behavior;
        if behavior.vision_hysteresis <= 0.0 {
            return Err(invalid(format!(
                "vision_hysteresis ({}) must be positive",
                behavior.vision_hysteresis
            )));
        }
        if behavior.windup_duration <= 0.0
            || behavior.strike_duration <= 0.0
            || behavior.recovery_duration <= 0.0
        {
            return Err(invalid("attack phase durations must be positive"));
        }
        if behavior.jitter_amplitude < 0.0 {
            return Err(invalid("jitter_amplitude must not be negative"));
        }

        let combat = &self.combat;
        for (name, tolerance) in [
            ("melee_arc_tolerance", combat.melee_arc_tolerance),
            ("ranged_line_tolerance", combat.ranged_line_tolerance),
        ] {
            if !(0.0..=PI).contains(&tolerance) {
                return Err(invalid(format!("{} ({}) must be within [0, pi]", name, tolerance)));
            }
        }
        if combat.chain_max_links > MAX_CHAIN_LINKS {
            return Err(invalid(format!(
                "chain_max_links ({}) must not exceed {}",
                combat.chain_max_links, MAX_CHAIN_LINKS
            )));
        }
        if combat.chain_radius < 0.0 {
            return Err(invalid("chain_radius must not be negative"));
        }
        if combat.chain_falloff <= 0.0 || combat.chain_falloff > 1.0 {
            return Err(invalid(format!(
                "chain_falloff ({}) must be within (0, 1]",
                combat.chain_falloff
            )));
        }

        let lifecycle = &self.lifecycle;
        if lifecycle.death_grace < 0.0 {
            return Err(invalid("death_grace must not be negative"));
        }
        if lifecycle.death_shock_radius_sq < 0.0 || lifecycle.death_shock_stun < 0.0 {
            return Err(invalid("death shock radius and stun must not be negative"));
        }
        if !(0.0..=1.0).contains(&lifecycle.bonus_loot_chance) {
            return Err(invalid("bonus_loot_chance must be within [0, 1]"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> HordeError {
    HordeError::InvalidConfig(message.into())
}
