//! Per-tick hostile behavior: locomotion state, attack phases and movement

pub mod attack;
pub mod locomotion;

pub use attack::{advance_attack, can_begin_attack, phase_speed_multiplier, StrikeResult, StrikeTarget};
pub use locomotion::{engaged_target, locomotion_multiplier, move_target, next_behavior_state, patrol_waypoints, vision_radius};

use glam::Vec2;
use tracing::trace;

use crate::core::config::BehaviorConfig;
use crate::core::types::SimTime;
use crate::entity::{AttackPhase, Population};
use crate::simulation::context::TickContext;
use crate::simulation::events::SimulationEvent;
use crate::spatial::{steer, SteeringParams};

/// Advance every hostile by `dt` seconds
///
/// Entities are processed in population order. Separation only considers
/// active hostiles already moved this tick, so results do not depend on
/// anything but that order.
pub fn update_hostiles(
    population: &mut Population,
    ctx: &TickContext,
    config: &BehaviorConfig,
    now: SimTime,
    dt: f32,
    events: &mut Vec<SimulationEvent>,
) {
    let vision = vision_radius(config, ctx.progression.level);
    let steering = SteeringParams {
        separation_radius: config.separation_radius,
        separation_weight: config.separation_weight,
        avoid_radius: config.obstacle_avoid_radius,
        repulsion: config.obstacle_repulsion,
    };
    let mut processed: Vec<Vec2> = Vec::with_capacity(population.len());

    for hostile in population.iter_mut() {
        hostile.enforce_invariants();

        if hostile.dying {
            hostile.jitter = hostile.cosmetic_jitter(now, config.jitter_amplitude);
            continue;
        }

        if hostile.is_stunned(now) {
            // Frozen in place; the shake is render-only
            hostile.attack.interrupt();
            hostile.jitter = hostile.cosmetic_jitter(now, config.jitter_amplitude);
            processed.push(hostile.position);
            continue;
        }
        hostile.jitter = Vec2::ZERO;

        let player_distance = hostile.position.distance(ctx.player_position);
        let previous = hostile.behavior;
        hostile.behavior = next_behavior_state(previous, player_distance, vision, config.vision_hysteresis);
        if hostile.behavior != previous {
            trace!(id = %hostile.id, from = ?previous, to = ?hostile.behavior, "behavior transition");
        }

        let target = move_target(hostile, ctx, config);
        let engaged = engaged_target(hostile, ctx);

        if let Some(strike) = advance_attack(hostile, engaged, ctx.player_position, ctx.core_position, now, config) {
            emit_strike(&strike, events);
        }

        let direction = if hostile.attack.phase == AttackPhase::Strike {
            hostile.heading
        } else {
            steer(hostile.position, target, &processed, &ctx.obstacles, &steering)
        };

        let multiplier = locomotion_multiplier(hostile.behavior, config) * phase_speed_multiplier(hostile.attack.phase, config);
        let displacement = direction * hostile.speed * multiplier * dt;
        if displacement.length_squared() > 0.0 {
            hostile.position += displacement;
            hostile.heading = direction;
        }

        processed.push(hostile.position);
    }
}

fn emit_strike(strike: &StrikeResult, events: &mut Vec<SimulationEvent>) {
    match strike.landed {
        StrikeTarget::Player => events.push(SimulationEvent::PlayerDamaged {
            attacker: strike.attacker,
            damage: strike.damage,
        }),
        StrikeTarget::Core => events.push(SimulationEvent::CoreDamaged {
            attacker: strike.attacker,
            damage: strike.damage,
        }),
        StrikeTarget::Nothing => {}
    }
    events.push(SimulationEvent::Impact {
        position: strike.position,
        intensity: strike.intensity,
    });
}
