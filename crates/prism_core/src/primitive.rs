//! Geometric primitives.
//!
//! The set of shapes is closed, so they are modelled as a sum type rather
//! than trait objects. Ray intersection for each variant lives in the
//! renderer crate; this module only owns the geometry and its invariants.

use prism_math::{Aabb, Quat, Vec3};

use crate::material::{palette, Material};

/// A sphere with a positive radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Smallest radius a sphere may shrink to.
    pub const MIN_RADIUS: f32 = 1e-3;

    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(Self::MIN_RADIUS),
            material,
        }
    }
}

/// A box given by its center and half extents, optionally rotated.
///
/// With an identity `rotation` the box is axis-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub center: Vec3,
    pub half_extents: Vec3,
    pub rotation: Quat,
    pub material: Material,
}

impl BoxShape {
    pub fn new(center: Vec3, half_extents: Vec3, material: Material) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
            rotation: Quat::IDENTITY,
            material,
        }
    }

    /// Axis-aligned cube with edge length `size`.
    pub fn cube(center: Vec3, size: f32, material: Material) -> Self {
        Self::new(center, Vec3::splat(size * 0.5), material)
    }

    /// Rotate the box about the world Y axis.
    pub fn with_yaw(mut self, degrees: f32) -> Self {
        self.rotation = Quat::from_rotation_y(degrees.to_radians());
        self
    }

    /// Bounds of the box in its local (unrotated, origin-centred) frame.
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_center(Vec3::ZERO, self.half_extents)
    }
}

/// A Y-aligned cylinder standing on `base_center`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    pub base_center: Vec3,
    pub radius: f32,
    pub height: f32,
    /// Whether the end caps are closed
    pub capped: bool,
    pub material: Material,
}

impl Cylinder {
    pub fn new(base_center: Vec3, radius: f32, height: f32, material: Material) -> Self {
        Self {
            base_center,
            radius: radius.max(Sphere::MIN_RADIUS),
            height: height.max(0.0),
            capped: true,
            material,
        }
    }

    pub fn top_y(&self) -> f32 {
        self.base_center.y + self.height
    }
}

/// The infinite horizontal floor.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundPlane {
    pub y: f32,
    /// World units per grid cell
    pub grid_scale: f32,
    pub material: Material,
}

impl GroundPlane {
    pub const MIN_GRID_SCALE: f32 = 0.1;
    pub const MAX_GRID_SCALE: f32 = 10.0;

    pub fn new(y: f32) -> Self {
        Self {
            y,
            ..Default::default()
        }
    }

    pub fn reflectivity(&self) -> f32 {
        self.material.reflectivity
    }

    pub fn set_reflectivity(&mut self, reflectivity: f32) {
        self.material.reflectivity = reflectivity.clamp(0.0, 1.0);
    }

    pub fn set_grid_scale(&mut self, scale: f32) {
        self.grid_scale = scale.clamp(Self::MIN_GRID_SCALE, Self::MAX_GRID_SCALE);
    }
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            y: -1.0,
            grid_scale: 1.0,
            material: Material::new(palette::FLOOR, 0.1, 16.0),
        }
    }
}

/// Any object the tracer can hit.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
    Box(BoxShape),
    Cylinder(Cylinder),
    GroundPlane(GroundPlane),
}

impl Primitive {
    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Box(b) => &b.material,
            Primitive::Cylinder(c) => &c.material,
            Primitive::GroundPlane(g) => &g.material,
        }
    }

    pub fn material_mut(&mut self) -> &mut Material {
        match self {
            Primitive::Sphere(s) => &mut s.material,
            Primitive::Box(b) => &mut b.material,
            Primitive::Cylinder(c) => &mut c.material,
            Primitive::GroundPlane(g) => &mut g.material,
        }
    }

    pub fn is_ground(&self) -> bool {
        matches!(self, Primitive::GroundPlane(_))
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<BoxShape> for Primitive {
    fn from(b: BoxShape) -> Self {
        Primitive::Box(b)
    }
}

impl From<Cylinder> for Primitive {
    fn from(c: Cylinder) -> Self {
        Primitive::Cylinder(c)
    }
}

impl From<GroundPlane> for Primitive {
    fn from(g: GroundPlane) -> Self {
        Primitive::GroundPlane(g)
    }
}

/// Per-type object counts, excluding the ground plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    pub spheres: usize,
    pub boxes: usize,
    pub cylinders: usize,
}

impl ObjectCounts {
    pub fn total(&self) -> usize {
        self.spheres + self.boxes + self.cylinders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_radius_stays_positive() {
        let s = Sphere::new(Vec3::ZERO, -2.0, Material::default());
        assert!(s.radius > 0.0);
    }

    #[test]
    fn test_box_half_extents_are_positive() {
        let b = BoxShape::new(Vec3::ZERO, Vec3::new(-1.0, 2.0, -3.0), Material::default());
        assert_eq!(b.half_extents, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.rotation, Quat::IDENTITY);

        let cube = BoxShape::cube(Vec3::ONE, 2.0, Material::default());
        assert_eq!(cube.half_extents, Vec3::ONE);
    }

    #[test]
    fn test_ground_setters_clamp() {
        let mut g = GroundPlane::default();
        g.set_reflectivity(4.0);
        g.set_grid_scale(0.0);

        assert_eq!(g.reflectivity(), 1.0);
        assert_eq!(g.grid_scale, GroundPlane::MIN_GRID_SCALE);
    }

    #[test]
    fn test_primitive_material_access() {
        let mut p: Primitive = Cylinder::new(Vec3::ZERO, 0.5, 1.0, Material::default()).into();
        p.material_mut().reflectivity = 0.5;

        assert_eq!(p.material().reflectivity, 0.5);
        assert!(!p.is_ground());
        assert!(Primitive::from(GroundPlane::default()).is_ground());
    }
}
