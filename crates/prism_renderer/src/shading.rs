//! Local Blinn-Phong shading and shadow sampling.

use prism_core::{Light, Scene};
use prism_math::{normalize_or, Color, Interval, Ray, Vec3, EPSILON};
use rand::{Rng, RngCore};
use std::f32::consts::TAU;

use crate::hittable::{HitRecord, Hittable};
use crate::sampling::disk_points;

/// Ambient light level, as a fraction of the surface color.
pub const AMBIENT: f32 = 0.1;
/// Diffuse weight of each light.
pub const DIFFUSE: f32 = 0.7;

/// Ambient plus direct lighting from every light at the hit point.
///
/// Diffuse and ambient terms are scaled by `1 - transparency`; transparent
/// surfaces pass that light on through the refraction ray instead. Specular
/// highlights are unaffected.
pub fn local_color(scene: &Scene, ray: &Ray, rec: &HitRecord<'_>, rng: &mut dyn RngCore) -> Color {
    let material = rec.material;
    let opacity = 1.0 - material.transparency;
    let view_dir = -ray.direction;

    let mut color = rec.albedo * AMBIENT * opacity;

    for light in scene.lights() {
        let light_dir = normalize_or(light.position - rec.p, rec.normal);
        let n_dot_l = rec.normal.dot(light_dir);
        if n_dot_l <= 0.0 {
            continue;
        }

        let shadow = shadow_factor(scene, rec, light, rng);
        if shadow <= 0.0 {
            continue;
        }

        let radiance = light.color * light.intensity;
        let diffuse = rec.albedo * radiance * (DIFFUSE * n_dot_l * opacity);

        let half_dir = normalize_or(light_dir + view_dir, rec.normal);
        let spec = rec.normal.dot(half_dir).max(0.0).powf(material.shininess);
        let specular = radiance * (spec * material.specular);

        color += (diffuse + specular) * shadow;
    }

    color
}

/// Fraction of `light` visible from the hit point, in `[0, 1]`.
///
/// Hard shadows test a single ray and return 0 or 1. With soft shadows on
/// and a light radius above zero, `shadow_samples` points on the light's
/// disk are tested and the unoccluded fraction is returned.
pub fn shadow_factor(scene: &Scene, rec: &HitRecord<'_>, light: &Light, rng: &mut dyn RngCore) -> f32 {
    let origin = rec.p + rec.normal * EPSILON;

    if !scene.view.soft_shadows || !light.is_area() {
        return if occluded(scene, origin, light.position) { 0.0 } else { 1.0 };
    }

    let samples = scene.view.shadow_samples.max(1);
    let axis = normalize_or(light.position - origin, rec.normal);
    let rotation = rng.gen::<f32>() * TAU;

    let visible = disk_points(light.position, axis, light.radius, samples, rotation)
        .filter(|&target| !occluded(scene, origin, target))
        .count();

    visible as f32 / samples as f32
}

/// True if any visible object lies between `origin` and `target`.
fn occluded(scene: &Scene, origin: Vec3, target: Vec3) -> bool {
    let to_target = target - origin;
    let distance = to_target.length();
    if distance <= EPSILON {
        return false;
    }
    let ray = Ray::new(origin, to_target);
    scene.occluded(&ray, Interval::new(EPSILON, distance - EPSILON))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{Material, ScenePreset, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Floor hit point directly below a blocker sphere, lit from above.
    fn shadowed_floor() -> Scene {
        let mut scene = Scene::empty();
        scene.view.show_grid = false;
        scene.add_object(Sphere::new(Vec3::new(0.0, 0.5, 0.0), 0.5, Material::default()).into());
        scene.add_light(Light::new(Vec3::new(0.0, 4.0, 0.0)));
        scene
    }

    fn floor_hit(scene: &Scene, x: f32) -> HitRecord<'_> {
        let ray = Ray::new(Vec3::new(x, 3.0, 0.0), Vec3::NEG_Y);
        scene.ground().unwrap().hit(&ray, Interval::from_min(EPSILON)).unwrap()
    }

    #[test]
    fn test_hard_shadow_is_binary() {
        let scene = shadowed_floor();
        let mut rng = StdRng::seed_from_u64(7);

        // Straight under the blocker
        let under = floor_hit(&scene, 0.0);
        assert_eq!(shadow_factor(&scene, &under, &scene.lights()[0], &mut rng), 0.0);

        let open = floor_hit(&scene, 3.0);
        assert_eq!(shadow_factor(&scene, &open, &scene.lights()[0], &mut rng), 1.0);
    }

    #[test]
    fn test_soft_single_sample_matches_hard_for_point_light() {
        let mut scene = shadowed_floor();
        let mut rng = StdRng::seed_from_u64(1);

        let hard: Vec<f32> = [-2.0, -0.3, 0.0, 0.4, 2.5]
            .iter()
            .map(|&x| shadow_factor(&scene, &floor_hit(&scene, x), &scene.lights()[0], &mut rng))
            .collect();

        scene.view.soft_shadows = true;
        scene.view.shadow_samples = 1;
        let soft: Vec<f32> = [-2.0, -0.3, 0.0, 0.4, 2.5]
            .iter()
            .map(|&x| shadow_factor(&scene, &floor_hit(&scene, x), &scene.lights()[0], &mut rng))
            .collect();

        assert_eq!(hard, soft);
    }

    #[test]
    fn test_single_sample_area_light_matches_hard() {
        let mut scene = shadowed_floor();
        let xs = [-2.0, -0.6, -0.3, 0.0, 0.4, 0.75, 2.5];
        let mut rng = StdRng::seed_from_u64(11);

        let hard: Vec<f32> = xs
            .iter()
            .map(|&x| shadow_factor(&scene, &floor_hit(&scene, x), &scene.lights()[0], &mut rng))
            .collect();

        scene.view.soft_shadows = true;
        scene.view.shadow_samples = 1;
        if let Some(light) = scene.light_mut(0) {
            light.set_radius(0.8);
        }
        let soft: Vec<f32> = xs
            .iter()
            .map(|&x| shadow_factor(&scene, &floor_hit(&scene, x), &scene.lights()[0], &mut rng))
            .collect();

        assert_eq!(hard, soft);
    }

    #[test]
    fn test_area_light_gives_penumbra() {
        let mut scene = shadowed_floor();
        scene.view.soft_shadows = true;
        scene.view.shadow_samples = 32;
        if let Some(light) = scene.light_mut(0) {
            light.set_radius(1.5);
        }
        let mut rng = StdRng::seed_from_u64(3);

        // Near the shadow edge part of the disk is hidden
        let rec = floor_hit(&scene, 0.75);
        let factor = shadow_factor(&scene, &rec, &scene.lights()[0], &mut rng);
        assert!(factor > 0.0 && factor < 1.0, "factor = {}", factor);
    }

    #[test]
    fn test_local_color_lit_side_brighter() {
        let mut scene = Scene::from_preset(ScenePreset::Single);
        scene.view.show_ground_plane = false;
        let mut rng = StdRng::seed_from_u64(0);

        let lit_ray = Ray::new(Vec3::new(2.0, 2.0, -2.0), -Vec3::new(2.0, 2.0, -2.0));
        let dark_ray = Ray::new(Vec3::new(-2.0, -2.0, 2.0), Vec3::new(2.0, 2.0, -2.0));
        let lit_hit = scene.hit(&lit_ray, Interval::from_min(EPSILON)).unwrap();
        let dark_hit = scene.hit(&dark_ray, Interval::from_min(EPSILON)).unwrap();

        let lit = local_color(&scene, &lit_ray, &lit_hit, &mut rng);
        let dark = local_color(&scene, &dark_ray, &dark_hit, &mut rng);
        assert!(lit.x > dark.x);
        // The unlit side still gets ambient light
        assert!((dark - lit_hit.albedo * AMBIENT).length() < 1e-5);
    }
}
