//! Box intersection via the slab method in the box's local frame.

use prism_core::BoxShape;
use prism_math::{Interval, Ray};

use crate::hittable::{HitRecord, Hittable};

impl Hittable for BoxShape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        // Rotations preserve length, so t is the same in both frames
        let to_local = self.rotation.inverse();
        let local = Ray::new(
            to_local * (ray.origin - self.center),
            to_local * ray.direction,
        );

        let slab = self.local_bounds().slab(&local, ray_t)?;

        // Starting inside the box reports the exit face
        let (t, local_normal) = if ray_t.surrounds(slab.t_enter) {
            (slab.t_enter, slab.enter_normal())
        } else if ray_t.surrounds(slab.t_exit) {
            (slab.t_exit, slab.exit_normal())
        } else {
            return None;
        };

        Some(HitRecord::new(ray, t, self.rotation * local_normal, &self.material))
    }
}
