//! Orbiting look-at camera for primary ray generation.

use prism_core::CameraSettings;
use prism_math::{normalize_or, Ray, Vec3, DEFAULT_DIRECTION};

/// Narrowest accepted field of view, in degrees.
pub const MIN_FOV: f32 = 20.0;
/// Widest accepted field of view, in degrees.
pub const MAX_FOV: f32 = 120.0;
/// Closest the camera may zoom toward its target.
pub const MIN_DISTANCE: f32 = 0.5;
/// Farthest the camera may zoom away from its target.
pub const MAX_DISTANCE: f32 = 50.0;
/// Orbit pitch limit in degrees; keeps the camera off the poles.
pub const MAX_PITCH: f32 = 89.0;

/// Camera for generating rays into the scene.
///
/// The orthonormal basis is cached and rebuilt whenever the position or
/// target changes.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    vup: Vec3,
    /// Vertical field of view in degrees
    fov: f32,

    // Cached basis (set by update_basis())
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking at `target`.
    pub fn new(position: Vec3, target: Vec3, fov: f32) -> Self {
        let mut camera = Self {
            position,
            target,
            vup: Vec3::Y,
            fov: fov.clamp(MIN_FOV, MAX_FOV),
            forward: DEFAULT_DIRECTION,
            right: Vec3::X,
            up: Vec3::Y,
        };
        camera.update_basis();
        camera
    }

    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self::new(settings.position, settings.target, settings.fov)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Distance from the camera to its target.
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_basis();
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        self.update_basis();
    }

    /// Set the vertical field of view, clamped to [`MIN_FOV`, `MAX_FOV`].
    pub fn set_fov(&mut self, degrees: f32) {
        if !degrees.is_finite() {
            log::warn!("Ignoring non-finite fov");
            return;
        }
        self.fov = degrees.clamp(MIN_FOV, MAX_FOV);
    }

    /// Rotate the camera around its target.
    ///
    /// Deltas are in degrees. Pitch is clamped to ±[`MAX_PITCH`] and the
    /// distance to the target is preserved.
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        if delta_yaw == 0.0 && delta_pitch == 0.0 {
            return;
        }

        let offset = self.position - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        let yaw = offset.x.atan2(offset.z) + delta_yaw.to_radians();
        let max_pitch = MAX_PITCH.to_radians();
        let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + delta_pitch.to_radians())
            .clamp(-max_pitch, max_pitch);

        self.position = self.target
            + radius * Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos());
        self.update_basis();
    }

    /// Move along the view axis by `delta` world units.
    ///
    /// Positive values move away from the target. The resulting distance is
    /// clamped to [`MIN_DISTANCE`, `MAX_DISTANCE`].
    pub fn zoom(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        let direction = normalize_or(self.position - self.target, -self.forward);
        let distance = (self.distance() + delta).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.position = self.target + direction * distance;
        self.update_basis();
    }

    /// Generate the primary ray through continuous pixel coordinates.
    ///
    /// `(px, py)` are measured from the top-left corner of the image, so the
    /// centre of pixel `(x, y)` is `(x + 0.5, y + 0.5)`.
    pub fn ray_for_pixel(&self, px: f32, py: f32, width: u32, height: u32) -> Ray {
        let width = width.max(1) as f32;
        let height = height.max(1) as f32;

        let half_height = (self.fov.to_radians() / 2.0).tan();
        let half_width = half_height * (width / height);

        let ndc_x = 2.0 * px / width - 1.0;
        let ndc_y = 1.0 - 2.0 * py / height;

        let direction =
            self.forward + self.right * (ndc_x * half_width) + self.up * (ndc_y * half_height);
        Ray::new(self.position, direction)
    }

    fn update_basis(&mut self) {
        self.forward = normalize_or(self.target - self.position, DEFAULT_DIRECTION);
        // Looking straight up or down leaves the cross product degenerate
        self.right = normalize_or(self.forward.cross(self.vup), Vec3::X);
        self.up = self.right.cross(self.forward).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}
