//! Ground plane intersection and its grid overlay.

use prism_core::GroundPlane;
use prism_math::{Color, Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};

/// Rays more parallel to the floor than this never hit it.
const PARALLEL_EPSILON: f32 = 1e-6;
/// Half-width of a grid line, in grid cells.
const LINE_WIDTH: f32 = 0.02;
/// Major grid lines every this many cells.
const MAJOR_EVERY: f32 = 5.0;
/// Exponential fade rate of the grid with distance from the origin.
const FADE_RATE: f32 = 0.05;

const X_AXIS_COLOR: Color = Color::new(0.5, 0.2, 0.2);
const Z_AXIS_COLOR: Color = Color::new(0.2, 0.5, 0.5);

impl Hittable for GroundPlane {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if ray.direction.y.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = (self.y - ray.origin.y) / ray.direction.y;
        if !ray_t.surrounds(t) {
            return None;
        }

        Some(HitRecord::new(ray, t, Vec3::Y, &self.material))
    }
}

/// Floor color at `p` with grid lines drawn over it.
///
/// Minor lines every `grid_scale` units, brighter major lines every five
/// cells, and tinted lines along the world X and Z axes. Lines fade out with
/// distance from the origin.
pub fn grid_color(ground: &GroundPlane, p: Vec3) -> Color {
    let base = ground.material.color;
    let scale = ground.grid_scale.max(GroundPlane::MIN_GRID_SCALE);

    let sx = p.x / scale;
    let sz = p.z / scale;
    let fade = (-(p.x * p.x + p.z * p.z).sqrt() * FADE_RATE).exp().clamp(0.0, 1.0);

    let line_dist = |v: f32| (v - v.round()).abs();
    let on_minor = line_dist(sx) < LINE_WIDTH || line_dist(sz) < LINE_WIDTH;
    let on_major = line_dist(sx / MAJOR_EVERY) < LINE_WIDTH * 0.6
        || line_dist(sz / MAJOR_EVERY) < LINE_WIDTH * 0.6;

    if p.x.abs() < LINE_WIDTH * 2.0 {
        // The line x = 0 runs along the Z axis
        Z_AXIS_COLOR * fade + base * (1.0 - fade)
    } else if p.z.abs() < LINE_WIDTH * 2.0 {
        X_AXIS_COLOR * fade + base * (1.0 - fade)
    } else if on_major {
        base + Color::splat(0.25 * fade)
    } else if on_minor {
        base + Color::splat(0.08 * fade)
    } else {
        base
    }
}
