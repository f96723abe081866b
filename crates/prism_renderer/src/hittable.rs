//! Hittable trait and HitRecord for ray-object intersection.

use prism_core::{Material, Primitive, Scene};
use prism_math::{Color, Interval, Ray, Vec3};

use crate::ground::grid_color;

/// Record of a ray-object intersection.
///
/// Lives only for the duration of one shading evaluation.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Vec3,
    /// Surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a Material,
    /// Surface color at the hit; the material color unless an overlay applies
    pub albedo: Color,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Index of the object in the scene
    pub object: usize,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the outward surface normal at `t`.
    pub fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            albedo: material.color,
            t,
            front_face: true,
            object: 0,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction.dot(outward_normal) < 0.0;

        // Normal always points against the ray
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Closest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// True if anything blocks the ray within `ray_t`.
    fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.hit(ray, ray_t).is_some()
    }
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(s) => s.hit(ray, ray_t),
            Primitive::Box(b) => b.hit(ray, ray_t),
            Primitive::Cylinder(c) => c.hit(ray, ray_t),
            Primitive::GroundPlane(g) => g.hit(ray, ray_t),
        }
    }
}

impl Hittable for Scene {
    /// Nearest hit over every visible object.
    ///
    /// Ties keep the first-enumerated object. The ground grid overlay is
    /// applied here because it depends on the view flags.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for (index, object) in self.visible_objects() {
            if let Some(mut rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                rec.object = index;
                closest = Some(rec);
            }
        }

        if self.view.show_grid {
            if let Some(rec) = closest.as_mut() {
                if let Some(Primitive::GroundPlane(ground)) = self.objects().get(rec.object) {
                    rec.albedo = grid_color(ground, rec.p);
                }
            }
        }

        closest
    }

    fn occluded(&self, ray: &Ray, ray_t: Interval) -> bool {
        self.visible_objects()
            .any(|(_, object)| object.hit(ray, ray_t).is_some())
    }
}
