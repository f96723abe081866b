//! Surface material for Blinn-Phong shading with mirror and glass terms.

use std::fmt;
use std::str::FromStr;

use prism_math::Color;
use serde::{Deserialize, Serialize};

use crate::preset::PresetError;

/// Lowest accepted specular exponent.
pub const MIN_SHININESS: f32 = 2.0;
/// Highest accepted specular exponent.
pub const MAX_SHININESS: f32 = 512.0;

/// Surface material properties.
///
/// `reflectivity` and `transparency` are independent knobs; they are not
/// required to sum to one. The shader blends the two with a Fresnel term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Base color (albedo), RGB 0-1
    pub color: Color,
    /// Specular highlight strength (0 = matte, 1 = very shiny)
    pub specular: f32,
    /// Blinn-Phong exponent (higher = tighter highlight)
    pub shininess: f32,
    /// Mirror reflection amount (0-1)
    pub reflectivity: f32,
    /// Transmission amount (0-1)
    pub transparency: f32,
    /// Index of refraction (glass ~1.5)
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: palette::RED,
            specular: 0.5,
            shininess: 32.0,
            reflectivity: 0.0,
            transparency: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// Create a material with a color and highlight settings.
    pub fn new(color: Color, specular: f32, shininess: f32) -> Self {
        Self {
            color,
            specular,
            shininess,
            ..Default::default()
        }
        .clamped()
    }

    /// Set mirror reflectivity.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> Self {
        self.reflectivity = reflectivity;
        self.clamped()
    }

    /// Set transparency and index of refraction.
    pub fn with_transparency(mut self, transparency: f32, ior: f32) -> Self {
        self.transparency = transparency;
        self.ior = ior;
        self.clamped()
    }

    /// Diffuse plastic.
    pub fn plastic(color: Color) -> Self {
        Self::new(color, 0.3, 16.0)
    }

    /// Polished metal.
    pub fn metal(color: Color) -> Self {
        Self::new(color, 0.9, 128.0).with_reflectivity(0.6)
    }

    /// Clear glass.
    pub fn glass() -> Self {
        Self::new(Color::ONE, 1.0, 256.0).with_transparency(0.9, 1.5)
    }

    /// Near-perfect mirror.
    pub fn mirror() -> Self {
        Self::new(Color::splat(0.95), 1.0, 512.0).with_reflectivity(0.95)
    }

    /// Return a copy with every field forced into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            color: self.color.clamp(Color::ZERO, Color::ONE),
            specular: self.specular.clamp(0.0, 1.0),
            shininess: self.shininess.clamp(MIN_SHININESS, MAX_SHININESS),
            reflectivity: self.reflectivity.clamp(0.0, 1.0),
            transparency: self.transparency.clamp(0.0, 1.0),
            ior: self.ior.max(1.0),
        }
    }

    /// True if the material spawns reflection rays.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// True if the material spawns refraction rays.
    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}

/// Named material settings offered by the control surface.
///
/// Applying a preset changes the highlight, reflectivity and transparency of a
/// material but keeps its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialPreset {
    Matte,
    Plastic,
    Glossy,
    Metal,
    Mirror,
    Glass,
}

impl MaterialPreset {
    pub const ALL: [MaterialPreset; 6] = [
        MaterialPreset::Matte,
        MaterialPreset::Plastic,
        MaterialPreset::Glossy,
        MaterialPreset::Metal,
        MaterialPreset::Mirror,
        MaterialPreset::Glass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MaterialPreset::Matte => "matte",
            MaterialPreset::Plastic => "plastic",
            MaterialPreset::Glossy => "glossy",
            MaterialPreset::Metal => "metal",
            MaterialPreset::Mirror => "mirror",
            MaterialPreset::Glass => "glass",
        }
    }

    /// Overwrite the non-color properties of `material`.
    pub fn apply(self, material: &mut Material) {
        let (specular, shininess, reflectivity, transparency, ior) = match self {
            MaterialPreset::Matte => (0.1, 8.0, 0.0, 0.0, 1.0),
            MaterialPreset::Plastic => (0.4, 32.0, 0.1, 0.0, 1.0),
            MaterialPreset::Glossy => (0.6, 64.0, 0.3, 0.0, 1.0),
            MaterialPreset::Metal => (0.9, 128.0, 0.7, 0.0, 1.0),
            MaterialPreset::Mirror => (1.0, 256.0, 0.95, 0.0, 1.0),
            MaterialPreset::Glass => (1.0, 256.0, 0.0, 0.9, 1.5),
        };
        material.specular = specular;
        material.shininess = shininess;
        material.reflectivity = reflectivity;
        material.transparency = transparency;
        material.ior = ior;
    }
}

impl fmt::Display for MaterialPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MaterialPreset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MaterialPreset::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| PresetError::UnknownMaterial(s.to_string()))
    }
}

/// Color swatches used by the presets and the control surface.
pub mod palette {
    use prism_math::Color;

    pub const RED: Color = Color::new(0.9, 0.2, 0.15);
    pub const ORANGE: Color = Color::new(0.95, 0.5, 0.1);
    pub const YELLOW: Color = Color::new(0.95, 0.85, 0.2);
    pub const GREEN: Color = Color::new(0.2, 0.85, 0.3);
    pub const BLUE: Color = Color::new(0.2, 0.4, 0.9);
    pub const INDIGO: Color = Color::new(0.3, 0.2, 0.7);
    pub const PURPLE: Color = Color::new(0.6, 0.2, 0.9);
    pub const GOLD: Color = Color::new(1.0, 0.84, 0.0);
    pub const WHITE: Color = Color::new(0.95, 0.95, 0.95);
    pub const FLOOR: Color = Color::new(0.15, 0.15, 0.17);
}
