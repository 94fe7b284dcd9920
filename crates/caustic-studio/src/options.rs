//! Viewer options, read from a TOML file.
//!
//! Every field has a default, so a missing section or a missing key falls
//! back to the classic fixed build: Q=200, P=37, A=B=1 in a 640×640 window.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use caustic_engine::device::GpuInit;
use caustic_engine::paint::Color;
use caustic_geometry::CurveParameters;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "caustic.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioOptions {
    pub curve: CurveParameters,
    pub window: WindowOptions,
    pub style: StyleOptions,
    pub text: TextOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Logical pixels.
    pub width: f64,
    pub height: f64,
    /// Defaults to the curve caption, e.g. `Caustic  Q=200  P=37  A=1  B=1`.
    pub title: Option<String>,
    pub vsync: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 640.0,
            title: None,
            vsync: true,
        }
    }
}

/// Colors are sRGB-encoded RGB in `[0, 1]`, the values a color picker shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleOptions {
    /// Dot diameter in logical pixels.
    pub point_size: f32,
    /// Line width in logical pixels.
    pub line_width: f32,
    /// Half-size of the visible world square, centered on the origin.
    pub view_extent: f32,
    pub background: [f32; 3],
    pub point_color: [f32; 3],
    pub boundary_color: [f32; 3],
    pub chord_color: [f32; 3],
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            point_size: 5.0,
            line_width: 1.0,
            view_extent: 1.1,
            background: [1.0, 1.0, 1.0],
            point_color: [0.0, 0.0, 1.0],
            boundary_color: [0.0, 1.0, 0.0],
            chord_color: [1.0, 0.0, 0.0],
        }
    }
}

impl StyleOptions {
    pub fn background(&self) -> Color {
        srgb(self.background)
    }

    pub fn point(&self) -> Color {
        srgb(self.point_color)
    }

    pub fn boundary(&self) -> Color {
        srgb(self.boundary_color)
    }

    pub fn chord(&self) -> Color {
        srgb(self.chord_color)
    }
}

fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::from_srgb(r, g, b)
}

/// Font used by the greeting scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextOptions {
    /// TrueType/OpenType file. `None` searches the usual system font paths.
    pub font: Option<PathBuf>,
    /// Logical pixels.
    pub size: f32,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font: None,
            size: 16.0,
        }
    }
}

impl StudioOptions {
    /// Parses options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Loads the file named on the command line, or the default file.
    ///
    /// A file the user named must exist and parse. The default file is
    /// optional and falls back to defaults, see [`Self::load_from_file`].
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = explicit else {
            return Ok(Self::load_from_file(&Self::default_path()));
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read options file {}", path.display()))?;
        let opts = Self::from_toml_str(&content)
            .with_context(|| format!("malformed options file {}", path.display()))?;
        log::info!("options loaded from {}", path.display());
        Ok(opts)
    }

    /// Loads options from `path`. A missing, unreadable or malformed file
    /// yields defaults.
    pub fn load_from_file(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(opts) => {
                    log::info!("options loaded from {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!(
                        "options file {} is malformed, using defaults: {e}",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no options file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!(
                    "options file {} is unreadable, using defaults: {e}",
                    path.display()
                );
                Self::default()
            }
        }
    }

    pub fn default_path() -> PathBuf {
        PathBuf::from(DEFAULT_CONFIG_FILE)
    }

    pub fn window_title(&self) -> String {
        self.window
            .title
            .clone()
            .unwrap_or_else(|| self.curve.title())
    }

    pub fn gpu_init(&self) -> GpuInit {
        let present_mode = if self.window.vsync {
            wgpu::PresentMode::Fifo
        } else {
            wgpu::PresentMode::AutoNoVsync
        };
        GpuInit {
            present_mode,
            ..GpuInit::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Writes `content` to a file unique to this test process and `name`.
    fn temp_options_file(name: &str, content: &str) -> PathBuf {
        let file = format!("caustic-studio-{}-{name}.toml", std::process::id());
        let path = std::env::temp_dir().join(file);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_file_is_the_fixed_build() {
        let opts = StudioOptions::from_toml_str("").unwrap();
        assert_eq!(opts, StudioOptions::default());
        assert_eq!(opts.curve, CurveParameters::new(200, 37, 1, 1));
        assert_eq!(opts.window_title(), "Caustic  Q=200  P=37  A=1  B=1");
    }

    #[test]
    fn partial_curve_section_keeps_other_defaults() {
        let opts = StudioOptions::from_toml_str(
            r#"
            [curve]
            chord_stride = 2
            freq_y = 3
            "#,
        )
        .unwrap();
        assert_eq!(opts.curve, CurveParameters::new(200, 2, 1, 3));
        assert_eq!(opts.window, WindowOptions::default());
    }

    #[test]
    fn window_and_style_overrides() {
        let opts = StudioOptions::from_toml_str(
            r#"
            [window]
            width = 1024
            height = 768
            title = "Nephroid"

            [style]
            line_width = 0.5
            chord_color = [0.2, 0.2, 0.2]
            "#,
        )
        .unwrap();
        assert_eq!(opts.window.width, 1024.0);
        assert_eq!(opts.window_title(), "Nephroid");
        assert_eq!(opts.style.line_width, 0.5);
        assert_eq!(opts.style.point_size, 5.0);
    }

    #[test]
    fn style_colors_are_decoded_as_srgb() {
        let style = StyleOptions {
            chord_color: [0.2, 0.7, 0.3],
            ..StyleOptions::default()
        };
        let chord = style.chord();
        assert_relative_eq!(chord.r, 0.0331, epsilon = 1e-3);
        assert_relative_eq!(chord.g, 0.4480, epsilon = 1e-3);
        assert_relative_eq!(chord.b, 0.0656, epsilon = 1e-3);
    }

    #[test]
    fn text_section() {
        let opts = StudioOptions::from_toml_str(
            r#"
            [text]
            font = "/opt/fonts/Inter.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(opts.text.font, Some(PathBuf::from("/opt/fonts/Inter.ttf")));
        assert_eq!(opts.text.size, 16.0);
    }

    #[test]
    fn negative_point_count_still_parses() {
        // Rejected later by the generator, not by the parser.
        let opts = StudioOptions::from_toml_str("[curve]\npoint_count = -3\n").unwrap();
        assert_eq!(opts.curve.point_count, -3);
    }

    #[test]
    fn wrong_types_are_rejected() {
        let parsed = StudioOptions::from_toml_str("[curve]\npoint_count = \"many\"\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let opts = StudioOptions::load_from_file(Path::new("/nonexistent/caustic.toml"));
        assert_eq!(opts, StudioOptions::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = StudioOptions::load(Some(Path::new("/nonexistent/typo.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/typo.toml"));
    }

    #[test]
    fn malformed_explicit_file_is_an_error() {
        let path = temp_options_file("malformed", "[curve]\npoint_count = \"many\"\n");
        let result = StudioOptions::load(Some(&path));
        std::fs::remove_file(&path).ok();

        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("malformed options file"));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let path = temp_options_file("valid", "[curve]\npoint_count = 12\n");
        let result = StudioOptions::load(Some(&path));
        std::fs::remove_file(&path).ok();

        assert_eq!(result.unwrap().curve.point_count, 12);
    }

    #[test]
    fn vsync_selects_present_mode() {
        let mut opts = StudioOptions::default();
        assert_eq!(opts.gpu_init().present_mode, wgpu::PresentMode::Fifo);
        opts.window.vsync = false;
        assert_eq!(opts.gpu_init().present_mode, wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn default_style_matches_the_classic_palette() {
        let style = StyleOptions::default();
        assert_eq!(style.background(), Color::WHITE);
        assert_eq!(style.point(), Color::BLUE);
        assert_eq!(style.boundary(), Color::GREEN);
        assert_eq!(style.chord(), Color::RED);
    }
}
