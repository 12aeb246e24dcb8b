//! Spawn director: decides whether, what and where to spawn each tick
//!
//! A spawn happens only when the cooldown since the last spawn has elapsed
//! AND the population is below the tick's cap. Otherwise the tick is a
//! silent no-op.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::core::config::SpawnConfig;
use crate::entity::class::HostileClass;
use crate::entity::hostile::Target;
use crate::simulation::context::Progression;
use crate::spatial::heading_vector;

/// A hostile the director (or a script) wants inserted
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub class: HostileClass,
    pub position: Vec2,
    pub health_multiplier: f32,
    pub speed_multiplier: f32,
    pub target: Target,
    /// Forced by the awakening counter
    pub awakened: bool,
}

impl SpawnRequest {
    /// Unscaled request with the class's default target
    pub fn new(class: HostileClass, position: Vec2) -> Self {
        Self {
            class,
            position,
            health_multiplier: 1.0,
            speed_multiplier: 1.0,
            target: class.default_target(),
            awakened: false,
        }
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }
}

/// Rate limiter state for automatic spawns
#[derive(Debug, Clone, Default)]
pub struct SpawnDirector {
    since_last_spawn: f32,
}

impl SpawnDirector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since_last_spawn(&self) -> f32 {
        self.since_last_spawn
    }

    /// Advance the cooldown and maybe produce a spawn
    ///
    /// `population` counts every entity in the store, dying ones included,
    /// so an accepted spawn never lifts the store above the cap. A forced
    /// colossus resets `progression.awakening_progress`.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        population: usize,
        progression: &mut Progression,
        config: &SpawnConfig,
        rng: &mut R,
    ) -> Option<SpawnRequest> {
        if !config.enabled {
            return None;
        }

        self.since_last_spawn += dt;
        if self.since_last_spawn < spawn_interval(config, progression) {
            return None;
        }
        if population >= population_cap(config, progression) {
            return None;
        }
        self.since_last_spawn = 0.0;

        let awakened = progression.awakening_progress >= config.awakening_threshold;
        let class = if awakened {
            progression.awakening_progress = 0.0;
            HostileClass::Colossus
        } else {
            roll_class(progression, rng)
        };

        let scaling = difficulty_scaling(config, progression.level, progression.wave);
        let modifier = progression.night_event.modifier();

        Some(SpawnRequest {
            class,
            position: ring_position(config, rng),
            health_multiplier: scaling * modifier.health,
            speed_multiplier: (1.0 + (scaling - 1.0) * config.speed_scaling_share) * modifier.speed,
            target: class.default_target(),
            awakened,
        })
    }
}

/// `1 + (level-1)*k1 + (wave-1)*k2`, with level and wave floored at 1
pub fn difficulty_scaling(config: &SpawnConfig, level: u32, wave: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * config.health_per_level
        + wave.saturating_sub(1) as f32 * config.health_per_wave
}

/// Seconds that must pass between spawns
pub fn spawn_interval(config: &SpawnConfig, progression: &Progression) -> f32 {
    let levelled = config.base_interval - progression.level.saturating_sub(1) as f32 * config.interval_reduction_per_level;
    let rate = progression.night_event.modifier().spawn_rate;
    (levelled / rate).max(config.min_interval)
}

/// Maximum population for this tick
pub fn population_cap(config: &SpawnConfig, progression: &Progression) -> usize {
    let raw = config.base_cap
        + progression.level.saturating_sub(1) * config.cap_per_level
        + progression.wave.saturating_sub(1) * config.cap_per_wave;
    let scaled = (raw as f32 * progression.night_event.modifier().cap).floor() as u32;
    scaled.min(config.max_cap) as usize
}

/// Weighted class roll: location titan roll first, then event or biome weights
pub fn roll_class<R: Rng + ?Sized>(progression: &Progression, rng: &mut R) -> HostileClass {
    if rng.gen::<f32>() < progression.biome.titan_chance() {
        return HostileClass::Titan;
    }

    let weights = progression
        .night_event
        .class_override()
        .unwrap_or_else(|| progression.biome.class_weights());
    let table = [
        (HostileClass::LightMelee, weights.light),
        (HostileClass::HeavyMelee, weights.heavy),
        (HostileClass::RangedCaster, weights.ranged),
    ];

    match WeightedIndex::new(table.iter().map(|(_, weight)| *weight)) {
        Ok(dist) => table[dist.sample(rng)].0,
        Err(_) => HostileClass::LightMelee,
    }
}

/// Uniform angle on the spawn ring, radius uniform between min and max
pub fn ring_position<R: Rng + ?Sized>(config: &SpawnConfig, rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radius = rng.gen_range(config.ring_min_radius..=config.ring_max_radius);
    config.arena_center + heading_vector(angle) * radius
}
