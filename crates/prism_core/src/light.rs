//! Point and disk-area lights.

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Maximum number of lights alive in a scene.
pub const MAX_LIGHTS: usize = 4;

/// A point light, optionally widened into a disk for soft shadows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub position: Vec3,
    /// Light color, RGB 0-1
    pub color: Color,
    /// Brightness multiplier (>= 0)
    pub intensity: f32,
    /// Disk radius; 0 means an ideal point light
    pub radius: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            position: Vec3::new(2.0, 2.0, -1.0),
            color: Color::ONE,
            intensity: 1.0,
            radius: 0.0,
        }
    }
}

impl Light {
    /// White point light at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.set_intensity(intensity);
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.set_radius(radius);
        self
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color.clamp(Color::ZERO, Color::ONE);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.max(0.0);
    }

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }

    /// True if the light has an area that soft shadows can sample.
    pub fn is_area(&self) -> bool {
        self.radius > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_setters_clamp() {
        let light = Light::new(Vec3::Y)
            .with_color(Color::new(2.0, 0.5, -1.0))
            .with_intensity(-3.0)
            .with_radius(-1.0);

        assert_eq!(light.color, Color::new(1.0, 0.5, 0.0));
        assert_eq!(light.intensity, 0.0);
        assert_eq!(light.radius, 0.0);
        assert!(!light.is_area());
    }

    #[test]
    fn test_area_light() {
        let light = Light::default().with_radius(0.5);
        assert!(light.is_area());
    }
}
