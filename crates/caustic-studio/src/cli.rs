use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Draws a caustic curve, a test triangle or a greeting in a window.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "caustic-studio", version, about)]
pub struct Cli {
    /// Scene to run
    #[arg(value_enum, default_value_t = SceneKind::Caustic)]
    pub scene: SceneKind,

    /// Options file (default: caustic.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// env_logger filter, overrides RUST_LOG
    #[arg(long, value_name = "FILTER")]
    pub log: Option<String>,
}

/// Which program the window runs.
#[derive(ValueEnum, Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum SceneKind {
    /// Points, boundary and chords of the configured curve
    #[default]
    Caustic,
    /// A single filled triangle
    Triangle,
    /// A centered greeting label
    Hello,
}
