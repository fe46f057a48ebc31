use glam::{Mat4, Vec4};

/// Euler rotation in degrees, applied as `Rx · Ry · Rz`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rotation {
    pub x_deg: f32,
    pub y_deg: f32,
    pub z_deg: f32,
}

impl Rotation {
    /// Same angle about all three axes.
    pub const fn uniform(deg: f32) -> Self {
        Self { x_deg: deg, y_deg: deg, z_deg: deg }
    }
}

/// Phong material coefficients.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Material {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Vec4::ONE,
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            shininess: 32.0,
        }
    }
}

pub fn model_view(rotation: &Rotation) -> Mat4 {
    Mat4::from_rotation_x(rotation.x_deg.to_radians())
        * Mat4::from_rotation_y(rotation.y_deg.to_radians())
        * Mat4::from_rotation_z(rotation.z_deg.to_radians())
}

/// Transforms normals consistently with `model_view`: `transpose(inverse(m))`.
pub fn normal_matrix(model_view: Mat4) -> Mat4 {
    model_view.inverse().transpose()
}
