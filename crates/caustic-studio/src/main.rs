//! `caustic-studio`: draws a caustic curve, a test triangle or a greeting in a
//! window.

mod caustic;
mod cli;
mod hello;
mod options;
mod triangle;

use anyhow::Result;
use clap::Parser;

use caustic_engine::logging::{LoggingConfig, init_logging};

use cli::{Cli, SceneKind};
use options::StudioOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(match &cli.log {
        Some(filter) => LoggingConfig::with_filter(filter.clone()),
        None => LoggingConfig::default(),
    });

    let options = StudioOptions::load(cli.config.as_deref())?;

    match cli.scene {
        SceneKind::Caustic => caustic::run(&options),
        SceneKind::Triangle => triangle::run(&options),
        SceneKind::Hello => hello::run(&options),
    }
}
