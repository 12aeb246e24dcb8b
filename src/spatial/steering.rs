//! Steering kernel: seek, separation and obstacle avoidance
//!
//! Pure functions with no shared state. The behavior updater composes them
//! with [`steer`] and scales the unit result by speed and delta time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

const MIN_DISTANCE_SQ: f32 = 1e-8;

/// Static world geometry entities steer around (resource nodes, structures)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }
}

/// Weights and radii for one steering evaluation
#[derive(Debug, Clone, Copy)]
pub struct SteeringParams {
    pub separation_radius: f32,
    pub separation_weight: f32,
    pub avoid_radius: f32,
    pub repulsion: f32,
}

/// Unit vector from `position` toward `target` (zero when already there)
pub fn seek(position: Vec2, target: Vec2) -> Vec2 {
    (target - position).normalize_or_zero()
}

/// Sum of unit vectors pointing away from every neighbor inside `radius`
///
/// The sum is deliberately left unnormalized so crowding pushes harder.
pub fn separate(position: Vec2, neighbors: &[Vec2], radius: f32) -> Vec2 {
    let radius_sq = radius * radius;
    neighbors
        .iter()
        .filter_map(|&neighbor| {
            let away = position - neighbor;
            let distance_sq = away.length_squared();
            (distance_sq > MIN_DISTANCE_SQ && distance_sq < radius_sq).then(|| away / distance_sq.sqrt())
        })
        .fold(Vec2::ZERO, |acc, push| acc + push)
}

/// Lateral push away from obstacles lying ahead along `desired`
///
/// For each obstacle within its radius plus `radius`, the offset is
/// projected onto the desired direction and the projection subtracted,
/// leaving the lateral component; the entity is pushed the opposite way.
/// An obstacle dead ahead has no lateral component, so the push falls back
/// to a fixed perpendicular of `desired`.
pub fn avoid(position: Vec2, desired: Vec2, obstacles: &[Obstacle], radius: f32, repulsion: f32) -> Vec2 {
    let mut force = Vec2::ZERO;

    for obstacle in obstacles {
        let offset = obstacle.position - position;
        let reach = obstacle.radius + radius;
        if offset.length_squared() >= reach * reach {
            continue;
        }

        let ahead = offset.dot(desired);
        if ahead <= 0.0 {
            continue;
        }

        let lateral = offset - desired * ahead;
        let push = if lateral.length_squared() > MIN_DISTANCE_SQ {
            lateral.normalize()
        } else {
            -desired.perp()
        };
        force -= push * repulsion;
    }

    force
}

/// Compose seek + avoid + separate and renormalize to a unit heading
pub fn steer(position: Vec2, target: Vec2, neighbors: &[Vec2], obstacles: &[Obstacle], params: &SteeringParams) -> Vec2 {
    let desired = seek(position, target);
    let avoidance = avoid(position, desired, obstacles, params.avoid_radius, params.repulsion);
    let separation = separate(position, neighbors, params.separation_radius) * params.separation_weight;

    (desired + avoidance + separation).normalize_or_zero()
}
