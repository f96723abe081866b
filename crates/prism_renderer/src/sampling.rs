//! Deterministic sample patterns for anti-aliasing and soft shadows.

use prism_math::{Vec2, Vec3};
use std::f32::consts::PI;

/// Angle between successive points of a Vogel spiral.
const GOLDEN_ANGLE: f32 = PI * (3.0 - 2.236_068);

/// Sub-pixel offsets of an `n x n` stratified grid, at cell centres.
///
/// Offsets are in `[0, 1)` relative to the pixel's top-left corner, so
/// `n == 1` yields the pixel centre.
pub fn pixel_offsets(n: u32) -> impl Iterator<Item = Vec2> {
    let n = n.max(1);
    let step = 1.0 / n as f32;
    (0..n * n).map(move |i| {
        let (col, row) = (i % n, i / n);
        Vec2::new((col as f32 + 0.5) * step, (row as f32 + 0.5) * step)
    })
}

/// Point `i` of `n` stratified over the unit disk.
///
/// Samples sit on a Vogel spiral: each occupies an equal-area ring, spaced
/// by the golden angle. `rotation` (radians) spins the whole pattern. A lone
/// sample sits at the centre.
pub fn disk_sample(i: u32, n: u32, rotation: f32) -> Vec2 {
    if n <= 1 {
        return Vec2::ZERO;
    }
    let n = n as f32;
    let r = ((i as f32 + 0.5) / n).sqrt();
    let theta = i as f32 * GOLDEN_ANGLE + rotation;
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Points on a disk of `radius` centred at `center`, facing along `axis`.
pub fn disk_points(
    center: Vec3,
    axis: Vec3,
    radius: f32,
    count: u32,
    rotation: f32,
) -> impl Iterator<Item = Vec3> {
    let (u, v) = axis.any_orthonormal_pair();
    (0..count.max(1)).map(move |i| {
        let d = disk_sample(i, count, rotation) * radius;
        center + u * d.x + v * d.y
    })
}
