//! The live scene: objects, lights and view toggles.
//!
//! A scene always holds at most one ground plane. Presets swap the other
//! objects and the lights wholesale and leave the ground plane and view
//! settings alone.

use crate::light::{Light, MAX_LIGHTS};
use crate::preset::ScenePreset;
use crate::primitive::{GroundPlane, ObjectCounts, Primitive};
use crate::settings::ViewSettings;

/// Ordered collection of primitives and lights plus global view flags.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<Primitive>,
    lights: Vec<Light>,
    preset: ScenePreset,

    /// Global view toggles
    pub view: ViewSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_preset(ScenePreset::Single)
    }
}

impl Scene {
    /// An empty scene with only the ground plane.
    pub fn empty() -> Self {
        Self {
            objects: vec![GroundPlane::default().into()],
            lights: Vec::new(),
            preset: ScenePreset::Single,
            view: ViewSettings::default(),
        }
    }

    /// A scene populated from `preset` with default view settings.
    pub fn from_preset(preset: ScenePreset) -> Self {
        let mut scene = Self::empty();
        scene.load_preset(preset);
        scene
    }

    /// Replace every non-ground object and every light with the preset's.
    pub fn load_preset(&mut self, preset: ScenePreset) {
        let (objects, lights) = preset.build();
        self.objects.retain(Primitive::is_ground);
        self.objects.extend(objects);
        self.lights = lights;
        self.lights.truncate(MAX_LIGHTS);
        self.preset = preset;

        log::debug!(
            "Loaded preset {}: {} objects, {} lights",
            preset,
            self.object_counts().total(),
            self.lights.len()
        );
    }

    /// The preset most recently loaded.
    pub fn preset(&self) -> ScenePreset {
        self.preset
    }

    /// Add an object. A second ground plane is refused.
    ///
    /// Returns true if the object was added.
    pub fn add_object(&mut self, object: Primitive) -> bool {
        if object.is_ground() && self.ground().is_some() {
            log::warn!("Scene already has a ground plane, ignoring");
            return false;
        }
        self.objects.push(object);
        true
    }

    /// Every object, including a hidden ground plane.
    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    /// Objects that take part in rendering with the current view flags.
    pub fn visible_objects(&self) -> impl Iterator<Item = (usize, &Primitive)> + '_ {
        let show_ground = self.view.show_ground_plane;
        self.objects
            .iter()
            .enumerate()
            .filter(move |(_, o)| show_ground || !o.is_ground())
    }

    pub fn ground(&self) -> Option<&GroundPlane> {
        self.objects.iter().find_map(|o| match o {
            Primitive::GroundPlane(g) => Some(g),
            _ => None,
        })
    }

    pub fn ground_mut(&mut self) -> Option<&mut GroundPlane> {
        self.objects.iter_mut().find_map(|o| match o {
            Primitive::GroundPlane(g) => Some(g),
            _ => None,
        })
    }

    /// The first non-ground object; material setters act on it.
    pub fn primary_object(&self) -> Option<&Primitive> {
        self.objects.iter().find(|o| !o.is_ground())
    }

    pub fn primary_object_mut(&mut self) -> Option<&mut Primitive> {
        self.objects.iter_mut().find(|o| !o.is_ground())
    }

    pub fn object_counts(&self) -> ObjectCounts {
        let mut counts = ObjectCounts::default();
        for object in &self.objects {
            match object {
                Primitive::Sphere(_) => counts.spheres += 1,
                Primitive::Box(_) => counts.boxes += 1,
                Primitive::Cylinder(_) => counts.cylinders += 1,
                Primitive::GroundPlane(_) => {}
            }
        }
        counts
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// Add a light. No-op once [`MAX_LIGHTS`] are alive.
    ///
    /// Returns the new light's index.
    pub fn add_light(&mut self, light: Light) -> Option<usize> {
        if self.lights.len() >= MAX_LIGHTS {
            log::warn!("Already at {} lights, ignoring add", MAX_LIGHTS);
            return None;
        }
        self.lights.push(light);
        Some(self.lights.len() - 1)
    }

    /// Remove a light. No-op if the index is out of range or it is the last one.
    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        if index >= self.lights.len() || self.lights.len() <= 1 {
            log::warn!("Cannot remove light {} of {}", index, self.lights.len());
            return None;
        }
        Some(self.lights.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::primitive::Sphere;
    use prism_math::Vec3;

    #[test]
    fn test_default_scene() {
        let scene = Scene::default();
        assert_eq!(scene.preset(), ScenePreset::Single);
        assert_eq!(scene.object_counts().spheres, 1);
        assert_eq!(scene.lights().len(), 1);
        assert!(scene.ground().is_some());
    }

    #[test]
    fn test_documented_preset_counts() {
        // (preset, spheres, boxes, cylinders, lights)
        let table = [
            (ScenePreset::Single, 1, 0, 0, 1),
            (ScenePreset::Three, 3, 0, 0, 1),
            (ScenePreset::Mirror, 3, 0, 0, 2),
            (ScenePreset::Rainbow, 7, 0, 0, 2),
            (ScenePreset::Glass, 3, 0, 0, 2),
            (ScenePreset::Shapes, 2, 2, 2, 2),
        ];

        let mut scene = Scene::default();
        for (preset, spheres, boxes, cylinders, lights) in table {
            scene.load_preset(preset);
            let counts = scene.object_counts();
            assert_eq!(counts.spheres, spheres, "{}", preset);
            assert_eq!(counts.boxes, boxes, "{}", preset);
            assert_eq!(counts.cylinders, cylinders, "{}", preset);
            assert_eq!(scene.lights().len(), lights, "{}", preset);
        }
    }

    #[test]
    fn test_load_preset_keeps_ground_and_view() {
        let mut scene = Scene::default();
        scene.view.max_bounces = 7;
        scene.ground_mut().unwrap().set_reflectivity(0.5);

        scene.load_preset(ScenePreset::Shapes);

        assert_eq!(scene.view.max_bounces, 7);
        assert_eq!(scene.ground().unwrap().reflectivity(), 0.5);
        assert_eq!(scene.objects().iter().filter(|o| o.is_ground()).count(), 1);
    }

    #[test]
    fn test_single_ground_plane() {
        let mut scene = Scene::default();
        assert!(!scene.add_object(GroundPlane::new(-2.0).into()));
        assert!(scene.add_object(Sphere::new(Vec3::Y, 0.5, Material::default()).into()));
        assert_eq!(scene.object_counts().spheres, 2);
    }

    #[test]
    fn test_hidden_ground_is_not_visible() {
        let mut scene = Scene::default();
        assert_eq!(scene.visible_objects().count(), 2);

        scene.view.show_ground_plane = false;
        assert_eq!(scene.visible_objects().count(), 1);
        assert!(scene.visible_objects().all(|(_, o)| !o.is_ground()));
    }

    #[test]
    fn test_light_limits() {
        let mut scene = Scene::default();
        for _ in 0..10 {
            scene.add_light(Light::default());
        }
        assert_eq!(scene.lights().len(), MAX_LIGHTS);

        assert!(scene.remove_light(MAX_LIGHTS).is_none());
        for _ in 0..10 {
            scene.remove_light(0);
        }
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn test_primary_object_skips_ground() {
        let mut scene = Scene::default();
        let primary = scene.primary_object_mut().unwrap();
        assert!(matches!(primary, Primitive::Sphere(_)));
    }
}
