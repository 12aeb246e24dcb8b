//! Hostile entity record
//!
//! A plain struct with explicit state fields. An entity is either active
//! (moves, attacks, can be hit) or dying (frozen, waiting for removal),
//! never both.

use std::f32::consts::{FRAC_1_SQRT_2, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, SimTime};
use crate::entity::class::HostileClass;
use crate::spatial::heading_of;

/// What the entity is ultimately after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The defended core structure
    Core,
    Player,
}

/// Locomotion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BehaviorState {
    #[default]
    Patrol,
    Chase,
}

/// Attack sub-machine, orthogonal to locomotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AttackPhase {
    #[default]
    Idle,
    Windup,
    Strike,
    Recovery,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttackState {
    pub phase: AttackPhase,
    pub phase_started_at: SimTime,
    /// End of the last completed attack; the cooldown counts from here
    pub last_attack_at: Option<SimTime>,
}

impl AttackState {
    pub fn enter(&mut self, phase: AttackPhase, now: SimTime) {
        self.phase = phase;
        self.phase_started_at = now;
    }

    pub fn elapsed(&self, now: SimTime) -> f32 {
        (now - self.phase_started_at) as f32
    }

    /// Drop back to idle without touching the cooldown
    pub fn interrupt(&mut self) {
        self.phase = AttackPhase::Idle;
    }
}

/// Result of applying damage to one entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Entity was already dying; nothing changed
    Ignored,
    Wounded,
    /// Entity entered the dying state. `scored` is true only for the one
    /// call that recorded the kill.
    Killed { scored: bool },
}

/// One live hostile
#[derive(Debug, Clone)]
pub struct Hostile {
    pub id: EntityId,
    pub class: HostileClass,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    /// World units per second after spawn scaling
    pub speed: f32,
    pub target: Target,
    pub behavior: BehaviorState,
    pub attack: AttackState,
    /// Direction of the last non-zero velocity
    pub heading: Vec2,
    /// Cosmetic variation only, never gameplay
    pub seed: u32,
    pub patrol_index: usize,
    pub spawned_at: SimTime,

    pub dying: bool,
    pub died_at: Option<SimTime>,
    /// One-way flag: the kill has been scored
    pub kill_recorded: bool,
    /// Death shock and loot roll have run
    pub death_handled: bool,
    pub stunned_until: SimTime,
    pub last_hit_at: Option<SimTime>,

    /// Render-only offset while stunned or dying
    pub jitter: Vec2,
}

impl Hostile {
    pub fn new(
        id: EntityId,
        class: HostileClass,
        position: Vec2,
        health_multiplier: f32,
        speed_multiplier: f32,
        target: Target,
        seed: u32,
        now: SimTime,
    ) -> Self {
        let stats = class.stats();
        let max_health = (stats.base_health * health_multiplier).max(1.0);

        Self {
            id,
            class,
            position,
            health: max_health,
            max_health,
            speed: stats.base_speed * speed_multiplier.max(0.0),
            target,
            behavior: BehaviorState::Patrol,
            attack: AttackState::default(),
            heading: Vec2::Y,
            seed,
            patrol_index: (seed % 4) as usize,
            spawned_at: now,
            dying: false,
            died_at: None,
            kill_recorded: false,
            death_handled: false,
            stunned_until: 0.0,
            last_hit_at: None,
            jitter: Vec2::ZERO,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.dying
    }

    pub fn is_stunned(&self, now: SimTime) -> bool {
        now < self.stunned_until
    }

    pub fn health_fraction(&self) -> f32 {
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Facing in radians, derived from the last heading
    pub fn facing(&self) -> f32 {
        heading_of(self.heading)
    }

    /// Subtract damage and handle the transition into dying
    pub fn apply_damage(&mut self, amount: f32, now: SimTime) -> DamageOutcome {
        if self.dying {
            return DamageOutcome::Ignored;
        }

        self.health -= amount;
        self.last_hit_at = Some(now);

        if self.health <= 0.0 {
            self.begin_dying(now);
            DamageOutcome::Killed { scored: self.record_kill() }
        } else {
            DamageOutcome::Wounded
        }
    }

    /// Kill outright regardless of remaining health
    pub fn kill(&mut self, now: SimTime) -> DamageOutcome {
        if self.dying {
            return DamageOutcome::Ignored;
        }
        self.health = 0.0;
        self.last_hit_at = Some(now);
        self.begin_dying(now);
        DamageOutcome::Killed { scored: self.record_kill() }
    }

    /// Flip the kill flag; true only the first time
    pub fn record_kill(&mut self) -> bool {
        if self.kill_recorded {
            return false;
        }
        self.kill_recorded = true;
        true
    }

    /// Extend the stun to `until`; returns false if already stunned longer
    pub fn stun_until(&mut self, until: SimTime) -> bool {
        if until <= self.stunned_until {
            return false;
        }
        self.stunned_until = until;
        self.attack.interrupt();
        true
    }

    /// Dying always wins over any attack phase
    pub fn enforce_invariants(&mut self) {
        debug_assert!(
            !(self.dying && self.attack.phase != AttackPhase::Idle),
            "{} is dying but in attack phase {:?}",
            self.id,
            self.attack.phase
        );
        if self.dying {
            self.attack.interrupt();
        }
    }

    /// Bounded cosmetic offset, deterministic in seed and time
    pub fn cosmetic_jitter(&self, now: SimTime, amplitude: f32) -> Vec2 {
        let phase = f64::from((self.seed % 1024) as f32 / 1024.0 * TAU);
        let x = (now * 37.0 + phase).sin() as f32;
        let y = (now * 41.0 + phase * 1.3).cos() as f32;
        Vec2::new(x, y) * amplitude * FRAC_1_SQRT_2
    }

    fn begin_dying(&mut self, now: SimTime) {
        self.dying = true;
        self.died_at = Some(now);
        self.health = self.health.min(0.0);
        self.attack.interrupt();
    }
}
