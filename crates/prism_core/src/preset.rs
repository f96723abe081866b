//! Fixed table of demo scenes.
//!
//! Each preset fully specifies its objects, their materials and the light
//! layout. Presets never include the ground plane; the scene keeps its own.

use std::fmt;
use std::str::FromStr;

use prism_math::{Color, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::light::Light;
use crate::material::{palette, Material};
use crate::primitive::{BoxShape, Cylinder, Primitive, Sphere};

/// Errors from parsing preset names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown scene preset: {0}")]
    UnknownScene(String),

    #[error("unknown material preset: {0}")]
    UnknownMaterial(String),
}

/// The built-in scenes, addressed by a stable numeric id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenePreset {
    #[default]
    Single,
    Three,
    Mirror,
    Rainbow,
    Glass,
    Shapes,
}

impl ScenePreset {
    pub const ALL: [ScenePreset; 6] = [
        ScenePreset::Single,
        ScenePreset::Three,
        ScenePreset::Mirror,
        ScenePreset::Rainbow,
        ScenePreset::Glass,
        ScenePreset::Shapes,
    ];

    /// Look up a preset by id. Unknown ids fall back to [`ScenePreset::Single`].
    pub fn from_id(id: i32) -> Self {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or_else(|| {
                log::warn!("Unknown scene preset id {}, using {}", id, ScenePreset::Single);
                ScenePreset::Single
            })
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            ScenePreset::Single => "single",
            ScenePreset::Three => "three",
            ScenePreset::Mirror => "mirror",
            ScenePreset::Rainbow => "rainbow",
            ScenePreset::Glass => "glass",
            ScenePreset::Shapes => "shapes",
        }
    }

    /// Build the objects and lights of this preset.
    pub fn build(self) -> (Vec<Primitive>, Vec<Light>) {
        match self {
            ScenePreset::Single => single(),
            ScenePreset::Three => three(),
            ScenePreset::Mirror => mirror(),
            ScenePreset::Rainbow => rainbow(),
            ScenePreset::Glass => glass(),
            ScenePreset::Shapes => shapes(),
        }
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = PresetError;

    /// Accepts a name (`"glass"`, case-insensitive) or a numeric id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if let Ok(id) = wanted.parse::<usize>() {
            return Self::ALL
                .get(id)
                .copied()
                .ok_or_else(|| PresetError::UnknownScene(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == wanted)
            .ok_or_else(|| PresetError::UnknownScene(s.to_string()))
    }
}

fn key_and_fill() -> Vec<Light> {
    vec![
        Light::new(Vec3::new(3.0, 4.0, -3.0)).with_intensity(0.9),
        Light::new(Vec3::new(-4.0, 3.0, -2.0))
            .with_color(Color::new(0.7, 0.8, 1.0))
            .with_intensity(0.4),
    ]
}

fn single() -> (Vec<Primitive>, Vec<Light>) {
    let objects = vec![Sphere::new(Vec3::ZERO, 1.0, Material::default()).into()];
    (objects, vec![Light::default()])
}

fn three() -> (Vec<Primitive>, Vec<Light>) {
    let objects = vec![
        Sphere::new(Vec3::ZERO, 1.0, Material::default()).into(),
        Sphere::new(Vec3::new(-2.2, -0.4, 0.8), 0.6, Material::plastic(palette::BLUE)).into(),
        Sphere::new(Vec3::new(2.2, -0.4, 0.8), 0.6, Material::plastic(palette::GREEN)).into(),
    ];
    (objects, vec![Light::new(Vec3::new(2.0, 3.0, -2.0))])
}

fn mirror() -> (Vec<Primitive>, Vec<Light>) {
    let objects = vec![
        Sphere::new(Vec3::ZERO, 1.0, Material::mirror()).into(),
        Sphere::new(Vec3::new(-2.0, -0.5, -1.0), 0.5, Material::plastic(palette::RED)).into(),
        Sphere::new(Vec3::new(1.8, -0.5, -1.5), 0.5, Material::metal(palette::GOLD)).into(),
    ];
    (objects, key_and_fill())
}

fn rainbow() -> (Vec<Primitive>, Vec<Light>) {
    let colors = [
        palette::RED,
        palette::ORANGE,
        palette::YELLOW,
        palette::GREEN,
        palette::BLUE,
        palette::INDIGO,
        palette::PURPLE,
    ];
    let count = colors.len();
    let objects = colors
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            // Spread along a shallow arc facing the default camera
            let a = (i as f32 / (count - 1) as f32 - 0.5) * std::f32::consts::PI * 0.8;
            let center = Vec3::new(3.0 * a.sin(), -0.55, 3.0 * (1.0 - a.cos()));
            Sphere::new(center, 0.45, Material::new(color, 0.6, 64.0).with_reflectivity(0.15)).into()
        })
        .collect();
    (objects, key_and_fill())
}

fn glass() -> (Vec<Primitive>, Vec<Light>) {
    let objects = vec![
        Sphere::new(Vec3::ZERO, 1.0, Material::glass()).into(),
        Sphere::new(Vec3::new(-1.5, -0.4, 2.5), 0.6, Material::plastic(palette::RED)).into(),
        Sphere::new(Vec3::new(1.5, -0.4, 2.5), 0.6, Material::plastic(palette::BLUE)).into(),
    ];
    (objects, key_and_fill())
}

fn shapes() -> (Vec<Primitive>, Vec<Light>) {
    let objects = vec![
        Sphere::new(Vec3::ZERO, 1.0, Material::default()).into(),
        Sphere::new(Vec3::new(0.0, -0.6, -1.8), 0.4, Material::glass()).into(),
        BoxShape::cube(Vec3::new(-2.3, -0.4, 0.5), 1.2, Material::plastic(palette::BLUE))
            .with_yaw(30.0)
            .into(),
        BoxShape::new(Vec3::new(0.0, -0.85, 2.2), Vec3::new(1.5, 0.15, 0.6), Material::metal(palette::WHITE))
            .into(),
        Cylinder::new(Vec3::new(2.3, -1.0, 0.5), 0.5, 1.5, Material::plastic(palette::GREEN)).into(),
        Cylinder::new(Vec3::new(1.4, -1.0, -1.6), 0.3, 0.8, Material::metal(palette::GOLD)).into(),
    ];
    (objects, key_and_fill())
}
