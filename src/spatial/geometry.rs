//! Heading and angle helpers on the ground plane
//!
//! Positions are `glam::Vec2` where `x` is world x and `y` is world z.
//! A heading of 0 rad faces +z; positive headings turn toward +x.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

/// Heading (radians) of a direction vector
pub fn heading_of(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}

/// Unit vector for a heading
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Wrap an angle into (-pi, pi]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle % TAU;
    if wrapped > PI {
        wrapped - TAU
    } else if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed angle from `facing` to the direction of `offset`, in (-pi, pi]
pub fn signed_angle_to(facing: f32, offset: Vec2) -> f32 {
    normalize_angle(heading_of(offset) - facing)
}

/// Distance to `point` if it lies inside the cone, `None` otherwise
///
/// A point exactly at the origin has no direction and counts as inside.
pub fn cone_distance(origin: Vec2, facing: f32, tolerance: f32, range: f32, point: Vec2) -> Option<f32> {
    let offset = point - origin;
    let distance = offset.length();
    if distance > range {
        return None;
    }
    if distance <= f32::EPSILON {
        return Some(distance);
    }
    (signed_angle_to(facing, offset).abs() <= tolerance).then_some(distance)
}
