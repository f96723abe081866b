//! Core Whitted-style ray tracer.
//!
//! Implements recursive ray tracing with:
//! - Blinn-Phong local shading with hard or soft shadows
//! - Schlick-weighted reflection and refraction
//! - Stratified anti-aliasing and gamma correction

use std::path::Path;
use std::time::Instant;

use image::{ImageResult, RgbaImage};
use prism_core::Scene;
use prism_math::{reflect, refract, schlick, Color, Interval, Ray, EPSILON};
use rand::RngCore;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::hittable::Hittable;
use crate::sampling::pixel_offsets;
use crate::shading::local_color;
use crate::Camera;

/// Sky color returned by rays that escape the scene.
pub const BACKGROUND: Color = Color::new(0.08, 0.08, 0.1);

/// Secondary rays with a smaller accumulated weight are not traced.
pub const MIN_CONTRIBUTION: f32 = 1e-3;

/// Compute the color seen by a ray.
///
/// `depth` counts bounces already taken; secondary rays are only spawned
/// while it is below the scene's `max_bounces`. `weight` is the product of
/// the blend factors along the path and only serves to cut off negligible
/// branches early.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    weight: f32,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = scene.hit(ray, Interval::from_min(EPSILON)) else {
        return BACKGROUND;
    };

    let mut color = local_color(scene, ray, &rec, rng);
    if depth >= scene.view.max_bounces {
        return color;
    }

    let material = rec.material;
    let cos_theta = (-ray.direction).dot(rec.normal).clamp(0.0, 1.0);
    let mirror_dir = reflect(ray.direction, rec.normal);

    let mut kr = if material.reflectivity > 0.0 {
        schlick(cos_theta, material.reflectivity)
    } else {
        0.0
    };

    let mut transmitted = Color::ZERO;
    if material.transparency > 0.0 {
        let ior = material.ior;
        let eta = if rec.front_face { 1.0 / ior } else { ior };
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        let fresnel = schlick(cos_theta, r0);

        match refract(ray.direction, rec.normal, eta) {
            Some(direction) => {
                kr += material.transparency * fresnel;
                let kt = material.transparency * (1.0 - fresnel);
                let next = weight * kt;
                if next > MIN_CONTRIBUTION {
                    // Leave through the far side of the surface
                    let origin = rec.p - rec.normal * EPSILON;
                    let refracted = Ray::new(origin, direction);
                    transmitted = rec.albedo * kt * ray_color(&refracted, scene, depth + 1, next, rng);
                }
            }
            // Total internal reflection
            None => kr += material.transparency,
        }
    }

    let kr = kr.min(1.0);
    let next = weight * kr;
    if next > MIN_CONTRIBUTION {
        let reflected = Ray::new(rec.p + rec.normal * EPSILON, mirror_dir);
        color += kr * ray_color(&reflected, scene, depth + 1, next, rng);
    }

    color + transmitted
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    // Apply gamma correction and convert to 0-255
    let r = (255.0 * clamp_01(linear_to_gamma(color.x))) as u8;
    let g = (255.0 * clamp_01(linear_to_gamma(color.y))) as u8;
    let b = (255.0 * clamp_01(linear_to_gamma(color.z))) as u8;
    [r, g, b, 255]
}

/// Render a single pixel, averaging the stratified anti-aliasing samples.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let n = scene.view.aa_grid_size();
    let mut pixel_color = Color::ZERO;

    for offset in pixel_offsets(n) {
        let ray = camera.ray_for_pixel(x as f32 + offset.x, y as f32 + offset.y, width, height);
        pixel_color += ray_color(&ray, scene, 0, 1.0, rng);
    }

    pixel_color / (n * n) as f32
}

/// A finished RGBA8 image, row-major with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// A frame filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = vec![0; width as usize * height as usize * 4];
        for alpha in pixels.iter_mut().skip(3).step_by(4) {
            *alpha = 255;
        }
        Self { width, height, pixels }
    }

    /// True when the frame has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// RGBA of the pixel at (x, y), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[i..i + 4]);
        Some(rgba)
    }

    /// Copy a rendered bucket into place.
    pub fn blit(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for local_y in 0..bucket.height {
            for local_x in 0..bucket.width {
                let color = result.pixels[(local_y * bucket.width + local_x) as usize];
                let x = (bucket.x + local_x) as usize;
                let y = (bucket.y + local_y) as usize;
                let i = (y * self.width as usize + x) * 4;
                self.pixels[i..i + 4].copy_from_slice(&color_to_rgba(color));
            }
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Write the frame as a PNG (format chosen from the extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ImageResult<()> {
        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                image::ImageError::Parameter(image::error::ParameterError::from_kind(
                    image::error::ParameterErrorKind::DimensionMismatch,
                ))
            })?;
        image.save(path)
    }
}

/// Render the whole scene.
///
/// Buckets are traced in parallel, each with its own RNG seeded from the
/// bucket index, so identical state always produces identical bytes. A zero
/// width or height yields an empty frame.
pub fn render(camera: &Camera, scene: &Scene, width: u32, height: u32) -> Frame {
    if width == 0 || height == 0 {
        log::warn!("Skipping render of empty {}x{} frame", width, height);
        return Frame::new(width, height);
    }

    let start = Instant::now();
    let buckets = generate_buckets(width, height, DEFAULT_BUCKET_SIZE);

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| render_bucket(bucket, camera, scene, width, height))
        .collect();

    let mut frame = Frame::new(width, height);
    for result in &results {
        frame.blit(result);
    }

    log::debug!(
        "Rendered {}x{} ({} buckets, {} spp) in {:.1?}",
        width,
        height,
        results.len(),
        scene.view.samples_per_pixel(),
        start.elapsed()
    );

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Material, ScenePreset, Sphere};
    use prism_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere_only(material: Material) -> Scene {
        let mut scene = Scene::empty();
        scene.view.show_ground_plane = false;
        scene.add_object(Sphere::new(Vec3::ZERO, 1.0, material).into());
        scene.add_light(prism_core::Light::new(Vec3::new(2.0, 2.0, -2.0)));
        scene
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba_clamps() {
        assert_eq!(color_to_rgba(Color::new(-1.0, 4.0, 0.25)), [0, 255, 127, 255]);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = sphere_only(Material::default());
        let mut rng = StdRng::seed_from_u64(0);
        let ray = Ray::new(Vec3::new(0.0, 5.0, -5.0), Vec3::Z);
        assert_eq!(ray_color(&ray, &scene, 0, 1.0, &mut rng), BACKGROUND);
    }

    #[test]
    fn test_zero_bounces_ignores_reflectivity() {
        let mut matte = sphere_only(Material::default());
        let mut mirror = sphere_only(Material::default().with_reflectivity(1.0));
        matte.view.max_bounces = 0;
        mirror.view.max_bounces = 0;

        let ray = Ray::new(Vec3::new(0.3, 0.2, -4.0), Vec3::Z);
        let a = ray_color(&ray, &matte, 0, 1.0, &mut StdRng::seed_from_u64(1));
        let b = ray_color(&ray, &mirror, 0, 1.0, &mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mirror_picks_up_reflection() {
        let mut scene = sphere_only(Material::mirror());
        scene.view.max_bounces = 2;
        // A bright sphere behind the camera shows up in the mirror
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, Material::plastic(Vec3::ONE)).into());

        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
        let bounced = ray_color(&ray, &scene, 0, 1.0, &mut StdRng::seed_from_u64(2));
        scene.view.max_bounces = 0;
        let flat = ray_color(&ray, &scene, 0, 1.0, &mut StdRng::seed_from_u64(2));
        assert!(bounced.length() > flat.length());
    }

    #[test]
    fn test_glass_lets_background_through() {
        let mut scene = sphere_only(Material::glass());
        scene.view.max_bounces = 4;

        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
        let color = ray_color(&ray, &scene, 0, 1.0, &mut StdRng::seed_from_u64(3));
        assert!(color.is_finite());
        assert!(color.length() > 0.0);
    }

    #[test]
    fn test_render_pixel_center_hits() {
        let scene = Scene::from_preset(ScenePreset::Single);
        let camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &scene, 5, 5, 10, 10, &mut rng);
        assert_ne!(color, BACKGROUND);
    }

    #[test]
    fn test_render_size_and_alpha() {
        let scene = Scene::default();
        let frame = render(&Camera::default(), &scene, 70, 33);

        assert_eq!(frame.pixels.len(), 70 * 33 * 4);
        assert!(frame.pixels.iter().skip(3).step_by(4).all(|&a| a == 255));
        assert_eq!(frame.pixel(70, 0), None);
    }

    #[test]
    fn test_render_zero_size() {
        let scene = Scene::default();
        assert!(render(&Camera::default(), &scene, 0, 16).is_empty());
        assert!(render(&Camera::default(), &scene, 16, 0).is_empty());
    }
}
