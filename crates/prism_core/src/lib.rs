//! Prism Core - scene model for the Prism ray tracer.
//!
//! This crate provides:
//!
//! - **Surface types**: `Material`, `MaterialPreset`, `Light`
//! - **Geometry**: `Sphere`, `BoxShape`, `Cylinder`, `GroundPlane` and the
//!   closed `Primitive` sum type over them
//! - **Scene**: the live collection of primitives, lights and view flags,
//!   plus the fixed `ScenePreset` table
//! - **Settings**: serde-backed `ViewSettings` / `RenderSettings`
//!
//! # Example
//!
//! ```
//! use prism_core::{Scene, ScenePreset};
//!
//! let mut scene = Scene::default();
//! scene.load_preset(ScenePreset::Three);
//! assert_eq!(scene.object_counts().spheres, 3);
//! ```

pub mod light;
pub mod material;
pub mod preset;
pub mod primitive;
pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use light::{Light, MAX_LIGHTS};
pub use material::{palette, Material, MaterialPreset};
pub use preset::{PresetError, ScenePreset};
pub use primitive::{BoxShape, Cylinder, GroundPlane, ObjectCounts, Primitive, Sphere};
pub use scene::Scene;
pub use settings::{CameraSettings, RenderSettings, SettingsError, ViewSettings};
