//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

pub mod profiles;
pub mod timelapse;

use crate::cli::GlobalArgs;
use crate::error::{CliErrorContext, CliResult};

use framelapse_core::{CoreConfig, default_base_dir};

use std::env;

/// Builds the core configuration from global flags and their environment
/// variables, falling back to the built-in defaults.
pub fn build_config(global: &GlobalArgs) -> CliResult<CoreConfig> {
    let base_dir = match &global.base_dir {
        Some(dir) => dir.clone(),
        None => default_base_dir().cli_context("Failed to find user home directory")?,
    };
    let output_dir = match &global.output_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().cli_context("Failed to determine current directory")?,
    };

    let mut config = CoreConfig::new(base_dir, output_dir);
    if let Some(ffmpeg) = &global.ffmpeg {
        config.ffmpeg_path = ffmpeg.clone();
    }
    if let Some(extension) = &global.extension {
        config.image_extension = extension.clone();
    }

    config.validate()?;
    log::debug!("Using configuration: {:?}", config);
    Ok(config)
}
