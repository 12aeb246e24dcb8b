//! PATROL / CHASE locomotion state and move-target selection

use glam::Vec2;

use crate::core::config::BehaviorConfig;
use crate::entity::{BehaviorState, Hostile, Target};
use crate::simulation::context::TickContext;

/// Vision radius grows with difficulty level
pub fn vision_radius(config: &BehaviorConfig, level: u32) -> f32 {
    config.base_vision_radius + level.saturating_sub(1) as f32 * config.vision_per_level
}

/// Hysteresis transition between PATROL and CHASE
///
/// Entry requires `distance < vision`, exit requires
/// `distance > vision + hysteresis`, so a stationary player on the
/// boundary never makes the state flip back and forth.
pub fn next_behavior_state(current: BehaviorState, player_distance: f32, vision: f32, hysteresis: f32) -> BehaviorState {
    match current {
        BehaviorState::Patrol if player_distance < vision => BehaviorState::Chase,
        BehaviorState::Chase if player_distance > vision + hysteresis => BehaviorState::Patrol,
        state => state,
    }
}

pub fn locomotion_multiplier(state: BehaviorState, config: &BehaviorConfig) -> f32 {
    match state {
        BehaviorState::Patrol => config.patrol_speed_multiplier,
        BehaviorState::Chase => config.chase_speed_multiplier,
    }
}

/// North, east, south, west around `center`
pub fn patrol_waypoints(center: Vec2, radius: f32) -> [Vec2; 4] {
    [
        center + Vec2::new(0.0, radius),
        center + Vec2::new(radius, 0.0),
        center + Vec2::new(0.0, -radius),
        center + Vec2::new(-radius, 0.0),
    ]
}

/// Where the hostile is heading this tick
///
/// CHASE goes for the player. In PATROL, core-targeting hostiles march on
/// the core while roamers cycle the compass waypoints around it, moving on
/// once a waypoint is within reach.
pub fn move_target(hostile: &mut Hostile, ctx: &TickContext, config: &BehaviorConfig) -> Vec2 {
    match (hostile.behavior, hostile.target) {
        (BehaviorState::Chase, _) => ctx.player_position,
        (BehaviorState::Patrol, Target::Core) => ctx.core_position,
        (BehaviorState::Patrol, Target::Player) => {
            let waypoints = patrol_waypoints(ctx.core_position, config.patrol_radius);
            let slot = hostile.patrol_index % waypoints.len();
            if hostile.position.distance(waypoints[slot]) <= config.waypoint_reach {
                hostile.patrol_index = (slot + 1) % waypoints.len();
            }
            waypoints[hostile.patrol_index % waypoints.len()]
        }
    }
}

/// What an attack would be aimed at, if anything
///
/// A roamer walking its patrol loop has nothing to swing at; only the core
/// proximity check can start its attack.
pub fn engaged_target(hostile: &Hostile, ctx: &TickContext) -> Option<Vec2> {
    match (hostile.behavior, hostile.target) {
        (BehaviorState::Chase, _) => Some(ctx.player_position),
        (BehaviorState::Patrol, Target::Core) => Some(ctx.core_position),
        (BehaviorState::Patrol, Target::Player) => None,
    }
}
