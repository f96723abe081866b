//! Sphere intersection.

use prism_core::Sphere;
use prism_math::{Interval, Ray};

use crate::hittable::{HitRecord, Hittable};

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Material;
    use prism_math::{Vec3, EPSILON};

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, Material::default())
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&ray, Interval::from_min(EPSILON)).unwrap();

        assert!((rec.t - 0.5).abs() < 0.001); // Should hit at t=0.5
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(unit_sphere().hit(&ray, Interval::from_min(EPSILON)).is_none());
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        let rec = sphere.hit(&ray, Interval::from_min(EPSILON)).unwrap();

        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!(!rec.front_face);
        // Normal faces back toward the centre
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
    }

    #[test]
    fn test_sphere_behind_ray() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::NEG_Z);
        assert!(unit_sphere().hit(&ray, Interval::from_min(EPSILON)).is_none());
    }

    #[test]
    fn test_sphere_ray_leaving_surface() {
        // Starts on the +Z pole and points outward: the root at t = 0 is rejected
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::Z);
        assert!(unit_sphere().hit(&ray, Interval::from_min(EPSILON)).is_none());
    }
}
