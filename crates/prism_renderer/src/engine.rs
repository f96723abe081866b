//! `RenderEngine`: the stateful facade a control surface drives.
//!
//! The engine owns the scene and camera outright. Setters take `&mut self`
//! and `render` takes `&self`, so no state can change while a frame is being
//! traced. Every numeric setter clamps instead of failing, and an invalid
//! light index is ignored.

use prism_core::{
    Light, Material, MaterialPreset, ObjectCounts, RenderSettings, Scene, ScenePreset,
    ViewSettings, MAX_LIGHTS,
};
use prism_core::settings::{MAX_AA_LEVEL, MAX_BOUNCES, MAX_SHADOW_SAMPLES};
use prism_math::{Color, Vec3};

use crate::renderer::{render, Frame};
use crate::Camera;

/// Scene, camera and view state plus the render entry point.
#[derive(Debug, Clone, Default)]
pub struct RenderEngine {
    scene: Scene,
    camera: Camera,
}

/// Clamp a signed control value into `0..=max`.
fn clamp_count(value: i32, max: u32) -> u32 {
    (value.max(0) as u32).min(max)
}

impl RenderEngine {
    /// The default scene (single sphere) seen from the default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine configured from headless settings.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let mut engine = Self::new();
        engine.apply_settings(settings);
        engine
    }

    /// Load the preset, camera and view described by `settings`.
    pub fn apply_settings(&mut self, settings: &RenderSettings) {
        self.scene.load_preset(settings.preset);
        if let Some(preset) = settings.material {
            self.apply_material_preset(preset);
        }
        self.camera = Camera::from_settings(&settings.camera);
        self.apply_view(settings.view);
        self.set_grid_scale(settings.grid_scale);
        self.update_ground_reflectivity(settings.ground_reflectivity);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    // --- Lights ---

    pub fn update_light(&mut self, index: usize, x: f32, y: f32, z: f32) {
        if let Some(light) = self.light_mut(index) {
            light.position = Vec3::new(x, y, z);
        }
    }

    pub fn set_light_color(&mut self, index: usize, r: f32, g: f32, b: f32) {
        if let Some(light) = self.light_mut(index) {
            light.set_color(Color::new(r, g, b));
        }
    }

    pub fn set_light_intensity(&mut self, index: usize, intensity: f32) {
        if let Some(light) = self.light_mut(index) {
            light.set_intensity(intensity);
        }
    }

    pub fn set_light_radius(&mut self, index: usize, radius: f32) {
        if let Some(light) = self.light_mut(index) {
            light.set_radius(radius);
        }
    }

    /// Add a white light. Ignored once [`MAX_LIGHTS`] exist.
    pub fn add_light(&mut self, x: f32, y: f32, z: f32) -> Option<usize> {
        self.scene.add_light(Light::new(Vec3::new(x, y, z)))
    }

    /// Remove a light. Ignored for a bad index or the last remaining light.
    pub fn remove_light(&mut self, index: usize) {
        self.scene.remove_light(index);
    }

    pub fn light_count(&self) -> usize {
        self.scene.lights().len()
    }

    pub fn lights(&self) -> &[Light] {
        self.scene.lights()
    }

    fn light_mut(&mut self, index: usize) -> Option<&mut Light> {
        let count = self.scene.lights().len();
        let light = self.scene.light_mut(index);
        if light.is_none() {
            log::warn!("Ignoring light index {} (have {}, max {})", index, count, MAX_LIGHTS);
        }
        light
    }

    // --- Material of the primary object ---

    pub fn update_material(&mut self, specular: f32, shininess: f32, reflectivity: f32) {
        self.edit_material(|m| {
            m.specular = specular;
            m.shininess = shininess;
            m.reflectivity = reflectivity;
        });
    }

    pub fn update_material_transparency(&mut self, transparency: f32, ior: f32) {
        self.edit_material(|m| {
            m.transparency = transparency;
            m.ior = ior;
        });
    }

    pub fn update_sphere_color(&mut self, r: f32, g: f32, b: f32) {
        self.edit_material(|m| m.color = Color::new(r, g, b));
    }

    pub fn apply_material_preset(&mut self, preset: MaterialPreset) {
        self.edit_material(|m| preset.apply(m));
    }

    /// Material of the primary object, if the scene has one.
    pub fn material(&self) -> Option<&Material> {
        self.scene.primary_object().map(|o| o.material())
    }

    fn edit_material(&mut self, edit: impl FnOnce(&mut Material)) {
        match self.scene.primary_object_mut() {
            Some(object) => {
                let material = object.material_mut();
                edit(material);
                *material = material.clamped();
            }
            None => log::warn!("No object to apply material to"),
        }
    }

    // --- Camera ---

    pub fn update_camera(&mut self, x: f32, y: f32, z: f32) {
        self.camera.set_position(Vec3::new(x, y, z));
    }

    pub fn set_camera_target(&mut self, x: f32, y: f32, z: f32) {
        self.camera.set_target(Vec3::new(x, y, z));
    }

    pub fn set_camera_fov(&mut self, degrees: f32) {
        self.camera.set_fov(degrees);
    }

    /// Orbit around the target by yaw/pitch deltas in degrees.
    pub fn orbit_camera(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.camera.orbit(delta_yaw, delta_pitch);
    }

    pub fn zoom_camera(&mut self, delta: f32) {
        self.camera.zoom(delta);
    }

    pub fn camera_x(&self) -> f32 {
        self.camera.position().x
    }

    pub fn camera_y(&self) -> f32 {
        self.camera.position().y
    }

    pub fn camera_z(&self) -> f32 {
        self.camera.position().z
    }

    pub fn camera_fov(&self) -> f32 {
        self.camera.fov()
    }

    // --- View ---

    pub fn set_show_ground_plane(&mut self, show: bool) {
        self.scene.view.show_ground_plane = show;
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.scene.view.show_grid = show;
    }

    pub fn set_grid_scale(&mut self, scale: f32) {
        if let Some(ground) = self.scene.ground_mut() {
            ground.set_grid_scale(scale);
        }
    }

    pub fn update_ground_reflectivity(&mut self, reflectivity: f32) {
        if let Some(ground) = self.scene.ground_mut() {
            ground.set_reflectivity(reflectivity);
        }
    }

    pub fn set_max_reflection_depth(&mut self, depth: i32) {
        self.scene.view.max_bounces = clamp_count(depth, MAX_BOUNCES);
    }

    /// 0, 1 or 2 for 1, 4 or 16 samples per pixel.
    pub fn set_anti_aliasing(&mut self, level: i32) {
        self.scene.view.anti_aliasing = clamp_count(level, MAX_AA_LEVEL);
    }

    pub fn set_soft_shadows(&mut self, enabled: bool) {
        self.scene.view.soft_shadows = enabled;
    }

    pub fn set_shadow_samples(&mut self, samples: i32) {
        self.scene.view.shadow_samples = clamp_count(samples, MAX_SHADOW_SAMPLES).max(1);
    }

    pub fn view(&self) -> ViewSettings {
        self.scene.view
    }

    pub fn apply_view(&mut self, view: ViewSettings) {
        self.scene.view = view.clamped();
    }

    // --- Scene ---

    /// Swap in a preset by id. Unknown ids load the default preset.
    pub fn load_scene_preset(&mut self, id: i32) {
        self.scene.load_preset(ScenePreset::from_id(id));
    }

    pub fn active_preset(&self) -> ScenePreset {
        self.scene.preset()
    }

    pub fn object_counts(&self) -> ObjectCounts {
        self.scene.object_counts()
    }

    pub fn sphere_count(&self) -> usize {
        self.object_counts().spheres
    }

    pub fn box_count(&self) -> usize {
        self.object_counts().boxes
    }

    pub fn cylinder_count(&self) -> usize {
        self.object_counts().cylinders
    }

    // --- Render ---

    /// Trace a frame and return its RGBA8 bytes, `width * height * 4` long.
    pub fn render(&self, width: u32, height: u32) -> Vec<u8> {
        self.render_frame(width, height).into_bytes()
    }

    pub fn render_frame(&self, width: u32, height: u32) -> Frame {
        render(&self.camera, &self.scene, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_index_out_of_range_is_ignored() {
        let mut engine = RenderEngine::new();
        let before = engine.lights().to_vec();

        engine.update_light(7, 1.0, 1.0, 1.0);
        engine.set_light_intensity(4, 3.0);
        engine.set_light_color(1, 0.0, 0.0, 0.0);
        engine.remove_light(0);

        assert_eq!(engine.lights(), &before[..]);
    }

    #[test]
    fn test_light_limits() {
        let mut engine = RenderEngine::new();
        assert_eq!(engine.light_count(), 1);

        for _ in 0..6 {
            engine.add_light(0.0, 5.0, 0.0);
        }
        assert_eq!(engine.light_count(), MAX_LIGHTS);
        assert_eq!(engine.add_light(0.0, 5.0, 0.0), None);

        for _ in 0..6 {
            engine.remove_light(0);
        }
        assert_eq!(engine.light_count(), 1);
    }

    #[test]
    fn test_light_setters_clamp() {
        let mut engine = RenderEngine::new();
        engine.set_light_color(0, 2.0, -1.0, 0.5);
        engine.set_light_intensity(0, -4.0);
        engine.set_light_radius(0, -1.0);

        let light = engine.lights()[0];
        assert_eq!(light.color, Color::new(1.0, 0.0, 0.5));
        assert_eq!(light.intensity, 0.0);
        assert_eq!(light.radius, 0.0);
    }

    #[test]
    fn test_material_setters_clamp() {
        let mut engine = RenderEngine::new();
        engine.update_material(3.0, 10_000.0, -1.0);
        engine.update_material_transparency(0.5, 0.2);
        engine.update_sphere_color(0.1, 0.2, 1.5);

        let material = engine.material().unwrap();
        assert_eq!(material.specular, 1.0);
        assert_eq!(material.shininess, prism_core::material::MAX_SHININESS);
        assert_eq!(material.reflectivity, 0.0);
        assert_eq!(material.transparency, 0.5);
        assert_eq!(material.ior, 1.0);
        assert_eq!(material.color, Color::new(0.1, 0.2, 1.0));
    }

    #[test]
    fn test_view_setters_clamp() {
        let mut engine = RenderEngine::new();
        engine.set_max_reflection_depth(99);
        engine.set_anti_aliasing(-3);
        engine.set_shadow_samples(0);

        let view = engine.view();
        assert_eq!(view.max_bounces, MAX_BOUNCES);
        assert_eq!(view.anti_aliasing, 0);
        assert_eq!(view.shadow_samples, 1);

        engine.set_anti_aliasing(7);
        assert_eq!(engine.view().samples_per_pixel(), 16);
    }

    #[test]
    fn test_preset_keeps_camera_and_view() {
        let mut engine = RenderEngine::new();
        engine.update_camera(1.0, 2.0, -5.0);
        engine.set_show_grid(false);

        engine.load_scene_preset(5);
        assert_eq!(engine.active_preset(), ScenePreset::Shapes);
        assert_eq!(engine.box_count(), 2);
        assert_eq!(engine.camera_x(), 1.0);
        assert!(!engine.view().show_grid);

        engine.load_scene_preset(42);
        assert_eq!(engine.active_preset(), ScenePreset::Single);
        assert_eq!(engine.sphere_count(), 1);
    }

    #[test]
    fn test_ground_setters() {
        let mut engine = RenderEngine::new();
        engine.update_ground_reflectivity(2.0);
        engine.set_grid_scale(100.0);

        let ground = engine.scene().ground().unwrap();
        assert_eq!(ground.reflectivity(), 1.0);
        assert_eq!(ground.grid_scale, prism_core::GroundPlane::MAX_GRID_SCALE);
    }

    #[test]
    fn test_apply_settings() {
        let settings = RenderSettings {
            preset: ScenePreset::Glass,
            material: Some(MaterialPreset::Metal),
            ..Default::default()
        };
        let engine = RenderEngine::from_settings(&settings);

        assert_eq!(engine.active_preset(), ScenePreset::Glass);
        assert_eq!(engine.material().unwrap().reflectivity, 0.7);
        assert_eq!(engine.camera_z(), settings.camera.position.z);
    }
}
