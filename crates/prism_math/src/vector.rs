//! Vector helpers that glam does not provide in the form the tracer needs.

use crate::Vec3;

/// Direction used when a zero-length vector has to be normalized.
pub const DEFAULT_DIRECTION: Vec3 = Vec3::NEG_Z;

/// Normalize `v`, returning `fallback` when `v` is zero-length or non-finite.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n` facing the
/// incoming side, using the ratio `eta = n_incident / n_transmitted`.
///
/// Returns `None` on total internal reflection.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = (-uv).dot(n).min(1.0);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * uv + (eta * cos_i - k.sqrt()) * n)
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `r0` is the reflectance at normal incidence.
#[inline]
pub fn schlick(cosine: f32, r0: f32) -> f32 {
    let c = (1.0 - cosine.clamp(0.0, 1.0)).powi(5);
    r0 + (1.0 - r0) * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect_flips_normal_component() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let d = Vec3::NEG_Y;
        let out = refract(d, Vec3::Y, 1.0 / 1.5).unwrap();
        assert!((out - Vec3::NEG_Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(d, Vec3::Y, 1.0 / 1.5).unwrap();

        assert!((out.length() - 1.0).abs() < 1e-5);
        // Entering a denser medium: smaller tangential component
        assert!(out.x < d.x);
        assert!(out.y < 0.0);
    }

    #[test]
    fn test_total_internal_reflection() {
        // Leaving glass at a grazing angle
        let d = Vec3::new(0.9, -0.1, 0.0).normalize();
        assert!(refract(d, Vec3::Y, 1.5).is_none());
    }

    #[test]
    fn test_schlick_bounds() {
        assert!((schlick(1.0, 0.04) - 0.04).abs() < 1e-6);
        assert!((schlick(0.0, 0.04) - 1.0).abs() < 1e-6);
        assert!((schlick(1.0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_or_zero() {
        assert_eq!(normalize_or(Vec3::ZERO, Vec3::Y), Vec3::Y);
        assert_eq!(normalize_or(Vec3::new(0.0, 0.0, 3.0), Vec3::Y), Vec3::Z);
    }
}
