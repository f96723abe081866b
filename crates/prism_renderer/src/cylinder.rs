//! Capped cylinder intersection.

use prism_core::Cylinder;
use prism_math::{Interval, Ray, Vec3};

use crate::hittable::{HitRecord, Hittable};

/// Directions closer than this to the cylinder axis (or to the cap plane)
/// skip the corresponding surface.
const AXIS_EPSILON: f32 = 1e-8;

impl Hittable for Cylinder {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let y_min = self.base_center.y;
        let y_max = self.top_y();
        let ro = ray.origin - self.base_center;
        let rd = ray.direction;

        let mut best: Option<(f32, Vec3)> = None;
        let mut consider = |t: f32, normal: Vec3| {
            if ray_t.surrounds(t) && best.map_or(true, |(bt, _)| t < bt) {
                best = Some((t, normal));
            }
        };

        // Lateral surface: x^2 + z^2 = r^2 in the cylinder's frame
        let a = rd.x * rd.x + rd.z * rd.z;
        if a > AXIS_EPSILON {
            let half_b = ro.x * rd.x + ro.z * rd.z;
            let c = ro.x * ro.x + ro.z * ro.z - self.radius * self.radius;
            let discriminant = half_b * half_b - a * c;

            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                for t in [(-half_b - sqrtd) / a, (-half_b + sqrtd) / a] {
                    let p = ray.at(t);
                    if p.y >= y_min && p.y <= y_max {
                        let outward = Vec3::new(p.x - self.base_center.x, 0.0, p.z - self.base_center.z)
                            / self.radius;
                        consider(t, outward);
                    }
                }
            }
        }

        // End caps
        if self.capped && rd.y.abs() > AXIS_EPSILON {
            for (cap_y, outward) in [(y_min, Vec3::NEG_Y), (y_max, Vec3::Y)] {
                let t = (cap_y - ray.origin.y) / rd.y;
                let p = ray.at(t);
                let dx = p.x - self.base_center.x;
                let dz = p.z - self.base_center.z;
                if dx * dx + dz * dz <= self.radius * self.radius {
                    consider(t, outward);
                }
            }
        }

        let (t, outward) = best?;
        Some(HitRecord::new(ray, t, outward, &self.material))
    }
}
