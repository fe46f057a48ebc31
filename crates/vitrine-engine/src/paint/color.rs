/// Straight-alpha RGBA color with `f32` components in `[0, 1]`.
///
/// Components are written to the surface unconverted; with a non-sRGB
/// surface (the default) they are interpreted as sRGB values.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from sRGB bytes (`0`–`255`).
    #[inline]
    pub fn from_srgb_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn to_vec4(self) -> glam::Vec4 {
        glam::Vec4::from_array(self.to_array())
    }

    /// Clear value for a render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_srgb_u8(r, g, b, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_map_to_unit_range() {
        let c = Color::from_srgb_u8(255, 0, 51, 255);
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn rgb_triplet_is_opaque() {
        let c = Color::from([246, 215, 82]);
        assert_eq!(c.a, 1.0);
        assert!((c.r - 246.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn clear_color_keeps_components() {
        let w = Color::rgb(0.95, 0.95, 0.95).to_wgpu();
        assert!((w.r - 0.95).abs() < 1e-6);
        assert_eq!(w.a, 1.0);
    }
}
