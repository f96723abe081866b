use crate::{Interval, Ray, Vec3};

/// Directions with an absolute component below this are treated as parallel
/// to that slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Axis-Aligned Bounding Box.
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Entry and exit parameters of a ray crossing an [`Aabb`].
///
/// `enter_axis`/`exit_axis` are the slab (0=X, 1=Y, 2=Z) that bounded the
/// interval, and the signs give the outward face normal along that axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlabHit {
    pub t_enter: f32,
    pub t_exit: f32,
    pub enter_axis: usize,
    pub enter_sign: f32,
    pub exit_axis: usize,
    pub exit_sign: f32,
}

impl SlabHit {
    /// Outward normal of the face the ray entered through.
    pub fn enter_normal(&self) -> Vec3 {
        axis_normal(self.enter_axis, self.enter_sign)
    }

    /// Outward normal of the face the ray leaves through.
    pub fn exit_normal(&self) -> Vec3 {
        axis_normal(self.exit_axis, self.exit_sign)
    }
}

fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    let mut n = Vec3::ZERO;
    n[axis] = sign;
    n
}

impl Aabb {
    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB centred on `center` with the given half extents.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        Self::from_points(center - h, center + h)
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Intersect a ray with the box using the slab method.
    ///
    /// Tracks the entry and exit parameter across the three axis slabs.
    /// Returns `None` if the slabs do not overlap (`t_enter > t_exit`) or the
    /// box lies entirely behind `ray_t.min`.
    pub fn slab(&self, r: &Ray, ray_t: Interval) -> Option<SlabHit> {
        let mut hit = SlabHit {
            t_enter: f32::NEG_INFINITY,
            t_exit: f32::INFINITY,
            enter_axis: 0,
            enter_sign: -1.0,
            exit_axis: 0,
            exit_sign: 1.0,
        };

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let orig = r.origin[axis];
            let dir = r.direction[axis];

            if dir.abs() < PARALLEL_EPSILON {
                // Parallel: the origin must already be inside this slab
                if orig < slab.min || orig > slab.max {
                    return None;
                }
                continue;
            }

            let adinv = 1.0 / dir;
            let mut t0 = (slab.min - orig) * adinv;
            let mut t1 = (slab.max - orig) * adinv;
            // Entering through the min face means an outward normal of -axis
            let mut near_sign = -1.0;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
                near_sign = 1.0;
            }

            if t0 > hit.t_enter {
                hit.t_enter = t0;
                hit.enter_axis = axis;
                hit.enter_sign = near_sign;
            }
            if t1 < hit.t_exit {
                hit.t_exit = t1;
                hit.exit_axis = axis;
                hit.exit_sign = -near_sign;
            }
        }

        if hit.t_enter > hit.t_exit || hit.t_exit < ray_t.min || hit.t_enter > ray_t.max {
            return None;
        }

        Some(hit)
    }
}
