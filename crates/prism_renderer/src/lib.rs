//! Prism Renderer - CPU Whitted ray tracing
//!
//! Turns a [`prism_core::Scene`] and a [`Camera`] into an RGBA8 buffer using
//! analytic ray/primitive intersection, Blinn-Phong shading with hard or soft
//! shadows, Fresnel-weighted reflection and refraction, and stratified
//! anti-aliasing. [`RenderEngine`] wraps it all behind the setter API a
//! control surface drives between frames.
//!
//! # Example
//!
//! ```
//! use prism_renderer::RenderEngine;
//!
//! let mut engine = RenderEngine::new();
//! engine.load_scene_preset(1);
//! engine.set_anti_aliasing(1);
//! let pixels = engine.render(32, 24);
//! assert_eq!(pixels.len(), 32 * 24 * 4);
//! ```

mod box_shape;
mod bucket;
mod camera;
mod cylinder;
mod engine;
mod ground;
mod hittable;
mod renderer;
mod sampling;
mod shading;
mod sphere;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, MAX_DISTANCE, MAX_FOV, MAX_PITCH, MIN_DISTANCE, MIN_FOV};
pub use engine::RenderEngine;
pub use ground::grid_color;
pub use hittable::{HitRecord, Hittable};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_pixel, Frame, BACKGROUND,
    MIN_CONTRIBUTION,
};
pub use sampling::{disk_points, disk_sample, pixel_offsets};
pub use shading::{local_color, shadow_factor, AMBIENT, DIFFUSE};

/// Re-export the math types used throughout the public API
pub use prism_math::{Color, Interval, Ray, Vec3};
