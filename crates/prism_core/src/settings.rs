//! Serde-backed view and render settings.
//!
//! `ViewSettings` are the global toggles the control surface flips between
//! frames. `RenderSettings` bundles everything a headless run needs and can be
//! loaded from a JSON file.

use std::path::Path;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::MaterialPreset;
use crate::preset::ScenePreset;

/// Deepest recursion the tracer allows.
pub const MAX_BOUNCES: u32 = 8;
/// Highest anti-aliasing level (4x4 samples).
pub const MAX_AA_LEVEL: u32 = 2;
/// Upper bound on shadow rays per light.
pub const MAX_SHADOW_SAMPLES: u32 = 64;

/// Errors that can occur while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Global view toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub show_ground_plane: bool,
    pub show_grid: bool,
    /// Maximum reflection/refraction depth, 0..=8
    pub max_bounces: u32,
    /// 0, 1 or 2 for 1, 4 or 16 samples per pixel
    pub anti_aliasing: u32,
    pub soft_shadows: bool,
    /// Shadow rays per light when soft shadows are on
    pub shadow_samples: u32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_ground_plane: true,
            show_grid: true,
            max_bounces: 3,
            anti_aliasing: 0,
            soft_shadows: false,
            shadow_samples: 8,
        }
    }
}

impl ViewSettings {
    /// Return a copy with every field forced into its valid range.
    pub fn clamped(self) -> Self {
        Self {
            max_bounces: self.max_bounces.min(MAX_BOUNCES),
            anti_aliasing: self.anti_aliasing.min(MAX_AA_LEVEL),
            shadow_samples: self.shadow_samples.clamp(1, MAX_SHADOW_SAMPLES),
            ..self
        }
    }

    /// Sub-pixel grid resolution: 1, 2 or 4 (per axis).
    pub fn aa_grid_size(&self) -> u32 {
        1 << self.anti_aliasing.min(MAX_AA_LEVEL)
    }

    /// Primary rays per pixel: 1, 4 or 16.
    pub fn samples_per_pixel(&self) -> u32 {
        let n = self.aa_grid_size();
        n * n
    }
}

/// Camera placement for a headless run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -3.0),
            target: Vec3::ZERO,
            fov: 60.0,
        }
    }
}

/// Everything needed to produce a frame without a control surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub preset: ScenePreset,
    /// Material preset applied to the primary object after the scene loads
    pub material: Option<MaterialPreset>,
    pub camera: CameraSettings,
    pub view: ViewSettings,
    pub grid_scale: f32,
    pub ground_reflectivity: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            preset: ScenePreset::Single,
            material: None,
            camera: CameraSettings::default(),
            view: ViewSettings::default(),
            grid_scale: 1.0,
            ground_reflectivity: 0.0,
        }
    }
}

impl RenderSettings {
    /// Parse settings from a JSON string. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&text)?;
        log::debug!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
