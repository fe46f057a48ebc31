use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Picks a surface format from `formats` (adapter preference order).
///
/// With `prefer_srgb` the first sRGB format wins, otherwise the first linear
/// one; either way the adapter's first format is the fallback.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Applies a new drawable size. Returns `false` when the surface was left
/// unconfigured because the size is zero (minimized window).
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) -> bool {
    *size = new_size;
    if new_size.width == 0 || new_size.height == 0 {
        return false;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
    true
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: &wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = surface_error_action(err);
    if action == SurfaceErrorAction::Reconfigured && size.width > 0 && size.height > 0 {
        surface.configure(device, config);
    }
    action
}

/// Classifies a surface error without touching the surface.
pub(crate) fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn srgb_format_when_requested() {
        let formats = [F::Rgba8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats, true), Some(F::Rgba8UnormSrgb));
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(choose_surface_format(&[F::Rgba16Float], true), Some(F::Rgba16Float));
        assert_eq!(choose_surface_format(&[], false), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        use wgpu::CompositeAlphaMode as A;
        assert_eq!(choose_alpha_mode(&[A::Opaque], Some(A::PreMultiplied)), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::Opaque, A::PreMultiplied], Some(A::PreMultiplied)), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[], None), A::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(surface_error_action(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(surface_error_action(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&E::Other), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}
