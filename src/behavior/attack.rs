//! Attack sub-machine: IDLE -> WINDUP -> STRIKE -> RECOVERY -> IDLE
//!
//! Phase boundaries are deadlines compared each tick, one transition per
//! tick. Damage is applied exactly once, at the WINDUP -> STRIKE boundary.

use glam::Vec2;

use crate::core::config::BehaviorConfig;
use crate::core::types::{EntityId, SimTime};
use crate::entity::{AttackPhase, Hostile};

/// Who a strike reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikeTarget {
    Player,
    Core,
    Nothing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrikeResult {
    pub attacker: EntityId,
    pub position: Vec2,
    pub landed: StrikeTarget,
    pub damage: f32,
    pub intensity: f32,
}

pub fn phase_speed_multiplier(phase: AttackPhase, config: &BehaviorConfig) -> f32 {
    match phase {
        AttackPhase::Idle => 1.0,
        AttackPhase::Windup => config.windup_speed_multiplier,
        AttackPhase::Strike => config.strike_speed_multiplier,
        AttackPhase::Recovery => config.recovery_speed_multiplier,
    }
}

/// Idle, off cooldown, and close to the engaged target or the core
///
/// `engaged` is what the hostile is actually going after: the player while
/// chasing, the core for core-marchers. Patrol waypoints never count.
pub fn can_begin_attack(hostile: &Hostile, engaged: Option<Vec2>, core: Vec2, now: SimTime, config: &BehaviorConfig) -> bool {
    if hostile.dying || hostile.attack.phase != AttackPhase::Idle || hostile.is_stunned(now) {
        return false;
    }

    let stats = hostile.class.stats();
    let cooled_down = hostile
        .attack
        .last_attack_at
        .map_or(true, |last| now - last >= f64::from(stats.attack_cooldown));
    if !cooled_down {
        return false;
    }

    let near_engaged = engaged.map_or(false, |target| hostile.position.distance_squared(target) < stats.attack_range_sq);
    near_engaged || hostile.position.distance(core) < config.core_attack_radius
}

/// Advance the attack phase; returns the strike when one resolves this tick
pub fn advance_attack(
    hostile: &mut Hostile,
    engaged: Option<Vec2>,
    player: Vec2,
    core: Vec2,
    now: SimTime,
    config: &BehaviorConfig,
) -> Option<StrikeResult> {
    match hostile.attack.phase {
        AttackPhase::Idle => {
            if can_begin_attack(hostile, engaged, core, now, config) {
                hostile.attack.enter(AttackPhase::Windup, now);
            }
            None
        }
        AttackPhase::Windup => {
            if hostile.attack.elapsed(now) < config.windup_duration {
                return None;
            }
            hostile.attack.enter(AttackPhase::Strike, now);
            Some(resolve_strike(hostile, player, core, config))
        }
        AttackPhase::Strike => {
            if hostile.attack.elapsed(now) >= config.strike_duration {
                hostile.attack.enter(AttackPhase::Recovery, now);
            }
            None
        }
        AttackPhase::Recovery => {
            if hostile.attack.elapsed(now) >= config.recovery_duration {
                hostile.attack.enter(AttackPhase::Idle, now);
                hostile.attack.last_attack_at = Some(now);
            }
            None
        }
    }
}

/// Player first if in strike range, otherwise the core if close enough
fn resolve_strike(hostile: &Hostile, player: Vec2, core: Vec2, config: &BehaviorConfig) -> StrikeResult {
    let stats = hostile.class.stats();
    let landed = if hostile.position.distance(player) <= stats.strike_range {
        StrikeTarget::Player
    } else if hostile.position.distance(core) <= config.core_strike_radius {
        StrikeTarget::Core
    } else {
        StrikeTarget::Nothing
    };

    StrikeResult {
        attacker: hostile.id,
        position: hostile.position,
        landed,
        damage: stats.strike_damage,
        intensity: stats.impact_intensity,
    }
}
