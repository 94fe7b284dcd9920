use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

const SRGB_PREFERENCE: [wgpu::TextureFormat; 2] = [
    wgpu::TextureFormat::Bgra8UnormSrgb,
    wgpu::TextureFormat::Rgba8UnormSrgb,
];

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        if let Some(f) = SRGB_PREFERENCE.iter().find(|f| caps.formats.contains(f)) {
            return Some(*f);
        }
    }
    caps.formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// FIFO is the only mode every surface is required to support.
pub(crate) fn choose_present_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if caps.present_modes.contains(&requested) {
        requested
    } else {
        log::debug!("present mode {requested:?} unsupported; using Fifo");
        wgpu::PresentMode::Fifo
    }
}

/// Records the new size and reconfigures; zero-area sizes (minimized window)
/// are recorded but not applied, wgpu rejects them.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;
    if !is_drawable(new_size) {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    surface.configure(device, config);
}

pub(crate) fn map_surface_error(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    err: wgpu::SurfaceError,
) -> SurfaceErrorAction {
    let action = classify_surface_error(&err);
    if action == SurfaceErrorAction::Reconfigured && is_drawable(size) {
        surface.configure(device, config);
    }
    action
}

pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[inline]
pub(crate) fn is_drawable(size: PhysicalSize<u32>) -> bool {
    size.width > 0 && size.height > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, PresentMode, SurfaceError, TextureFormat};

    fn caps(
        formats: Vec<TextureFormat>,
        present_modes: Vec<PresentMode>,
        alpha_modes: Vec<CompositeAlphaMode>,
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            present_modes,
            alpha_modes,
            usages: wgpu::TextureUsages::RENDER_ATTACHMENT,
        }
    }

    #[test]
    fn srgb_format_is_preferred() {
        let formats = vec![TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        let c = caps(formats, vec![], vec![]);
        let srgb = choose_surface_format(&c, true);
        assert_eq!(srgb, Some(TextureFormat::Rgba8UnormSrgb));
        let first = choose_surface_format(&c, false);
        assert_eq!(first, Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn no_formats_means_no_surface() {
        let c = caps(vec![], vec![], vec![]);
        assert_eq!(choose_surface_format(&c, true), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let c = caps(vec![], vec![], vec![CompositeAlphaMode::Opaque]);
        assert_eq!(
            choose_alpha_mode(&c, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_alpha_mode(&caps(vec![], vec![], vec![]), None),
            CompositeAlphaMode::Auto
        );
    }

    #[test]
    fn unsupported_present_mode_falls_back_to_fifo() {
        let modes = vec![PresentMode::Fifo, PresentMode::Mailbox];
        let c = caps(vec![], modes, vec![]);
        let mailbox = choose_present_mode(&c, PresentMode::Mailbox);
        assert_eq!(mailbox, PresentMode::Mailbox);
        let immediate = choose_present_mode(&c, PresentMode::Immediate);
        assert_eq!(immediate, PresentMode::Fifo);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        let cases = [
            (SurfaceError::Lost, SurfaceErrorAction::Reconfigured),
            (SurfaceError::Outdated, SurfaceErrorAction::Reconfigured),
            (SurfaceError::OutOfMemory, SurfaceErrorAction::Fatal),
            (SurfaceError::Timeout, SurfaceErrorAction::SkipFrame),
        ];
        for (error, action) in cases {
            assert_eq!(classify_surface_error(&error), action, "{error:?}");
        }
    }

    #[test]
    fn minimized_window_is_not_drawable() {
        assert!(!is_drawable(PhysicalSize::new(0, 480)));
        assert!(is_drawable(PhysicalSize::new(640, 640)));
    }
}
