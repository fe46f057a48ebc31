use glam::{Mat4, Vec4};

/// Point light orbiting the origin in the XZ plane, in eye space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Light {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    /// Orbit radius.
    pub distance: f32,
    /// Orbit angle about Y in degrees.
    pub orbit_deg: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            ambient: Vec4::new(0.1, 0.1, 0.1, 1.0),
            diffuse: Vec4::new(0.8, 0.8, 0.8, 1.0),
            specular: Vec4::ONE,
            distance: 5.0,
            orbit_deg: 0.0,
        }
    }
}

/// `rotate_y(orbit_deg) · (0, 0, -distance, 1)`.
pub fn position(light: &Light) -> Vec4 {
    Mat4::from_rotation_y(light.orbit_deg.to_radians()) * Vec4::new(0.0, 0.0, -light.distance, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(orbit_deg: f32) -> Vec4 {
        position(&Light { orbit_deg, ..Light::default() })
    }

    #[test]
    fn starts_behind_the_origin() {
        assert!(at(0.0).abs_diff_eq(Vec4::new(0.0, 0.0, -5.0, 1.0), 1e-6));
    }

    #[test]
    fn quarter_orbit_moves_to_negative_x() {
        assert!(at(90.0).abs_diff_eq(Vec4::new(-5.0, 0.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn full_orbit_returns() {
        assert!(at(360.0).abs_diff_eq(at(0.0), 1e-5));
        assert!(at(-90.0).abs_diff_eq(at(270.0), 1e-5));
    }

    #[test]
    fn stays_on_its_circle() {
        for deg in [13.0, 97.0, 181.0, 300.0] {
            assert!((at(deg).truncate().length() - 5.0).abs() < 1e-5);
        }
    }
}
