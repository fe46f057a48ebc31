use glam::{Mat4, Vec3};

/// Perspective camera looking down -Z at a target `distance` away, tilted
/// about X.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Distance from the eye to the origin.
    pub distance: f32,
    /// Tilt about X in degrees.
    pub tilt_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            z_near: 0.1,
            z_far: 1000.0,
            distance: 10.0,
            tilt_deg: 45.0,
        }
    }
}

/// `perspective(fov_y, aspect, near, far) · translate(0, 0, -distance) · rotate_x(tilt)`.
///
/// Depth maps to wgpu's `[0, 1]` range.
pub fn projection_matrix(camera: &Camera, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(camera.fov_y, aspect, camera.z_near, camera.z_far)
        * Mat4::from_translation(Vec3::new(0.0, 0.0, -camera.distance))
        * Mat4::from_rotation_x(camera.tilt_deg.to_radians())
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn ndc(m: Mat4, p: Vec3) -> Vec3 {
        let clip = m * p.extend(1.0);
        clip.truncate() / clip.w
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::default();
        let p = ndc(projection_matrix(&cam, 1.5), Vec3::ZERO);
        assert!(p.truncate().abs_diff_eq(glam::Vec2::ZERO, 1e-6));
        assert!(p.z > 0.0 && p.z < 1.0);
    }

    #[test]
    fn distance_moves_the_eye_back() {
        let cam = Camera { tilt_deg: 0.0, distance: 7.0, ..Camera::default() };
        let view = Mat4::perspective_rh(cam.fov_y, 1.0, cam.z_near, cam.z_far).inverse()
            * projection_matrix(&cam, 1.0);
        let eye_space = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(eye_space.abs_diff_eq(Vec4::new(0.0, 0.0, -7.0, 1.0), 1e-4));
    }

    #[test]
    fn tilt_rotates_about_x() {
        let cam = Camera { tilt_deg: 90.0, distance: 0.0, ..Camera::default() };
        let persp = Mat4::perspective_rh(cam.fov_y, 1.0, cam.z_near, cam.z_far);
        let view = persp.inverse() * projection_matrix(&cam, 1.0);
        // +Y turns into +Z under a quarter turn about X.
        assert!(view.transform_vector3(Vec3::Y).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn aspect_squeezes_x() {
        let cam = Camera { tilt_deg: 0.0, ..Camera::default() };
        let p = Vec3::new(1.0, 1.0, 0.0);
        let square = ndc(projection_matrix(&cam, 1.0), p);
        let wide = ndc(projection_matrix(&cam, 2.0), p);
        assert!((wide.x - square.x / 2.0).abs() < 1e-5);
        assert!((wide.y - square.y).abs() < 1e-5);
    }
}
