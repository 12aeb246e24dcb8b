//! Ground-plane geometry and crowd steering

pub mod geometry;
pub mod steering;

pub use geometry::{cone_distance, heading_of, heading_vector, normalize_angle, signed_angle_to};
pub use steering::{avoid, seek, separate, steer, Obstacle, SteeringParams};
