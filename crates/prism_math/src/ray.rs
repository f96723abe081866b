use crate::{normalize_or, Vec3, DEFAULT_DIRECTION};

/// A ray in 3D space with an origin and a unit-length direction.
///
/// The direction is normalized on construction so intersection and shading
/// code can rely on `|direction| == 1`. A zero-length direction falls back to
/// [`DEFAULT_DIRECTION`] instead of propagating NaNs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: normalize_or(direction, DEFAULT_DIRECTION),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: DEFAULT_DIRECTION,
        }
    }
}
