// Re-export glam for convenience
pub use glam::*;

// Prism math types
mod aabb;
mod interval;
mod ray;
mod vector;

pub use aabb::{Aabb, SlabHit};
pub use interval::Interval;
pub use ray::Ray;
pub use vector::{normalize_or, reflect, refract, schlick, DEFAULT_DIRECTION};

/// Color type alias (linear RGB, nominally 0-1).
pub type Color = Vec3;

/// Self-intersection bias applied to secondary ray origins and `t` acceptance.
pub const EPSILON: f32 = 1e-4;
