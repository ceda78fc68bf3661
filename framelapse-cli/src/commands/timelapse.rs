//! Implementation of the `timelapse` command (the default).
//!
//! Resolves the profile (menu or `--profile`), the input frame rate (prompt or
//! `--framerate`), then hands over to the core pipeline with the reporter
//! selected by `--json`.

use crate::cli::{GlobalArgs, TimelapseArgs};
use crate::commands::build_config;
use crate::error::CliResult;
use crate::prompt::{prompt_framerate, render_profile_menu, select_profile};

use framelapse_core::reporting::{JsonReporter, Reporter, TerminalReporter};
use framelapse_core::{
    CoreError, TimelapseResult, check_dependency, discover_profiles, find_profile,
    run_timelapse_with_ffmpeg,
};

use log::{debug, info};

use std::fs;
use std::io::{BufRead, Write};

/// Picks the reporter for the requested output mode.
pub fn make_reporter(json: bool) -> Box<dyn Reporter> {
    if json {
        Box::new(JsonReporter::new())
    } else {
        Box::new(TerminalReporter::new())
    }
}

/// Runs one timelapse. Prompts are read from `input` and written to `prompt_out`.
pub fn run_timelapse_command<R: BufRead, W: Write>(
    global: &GlobalArgs,
    args: &TimelapseArgs,
    input: &mut R,
    prompt_out: &mut W,
) -> CliResult<TimelapseResult> {
    let config = build_config(global)?;
    let profiles = discover_profiles(&config.base_dir)?;
    debug!("Discovered {} profile(s)", profiles.len());

    let profile = match &args.profile {
        Some(name) => find_profile(&profiles, name)?.clone(),
        None => {
            render_profile_menu(prompt_out, &profiles)?;
            select_profile(input, prompt_out, &profiles)?.clone()
        }
    };

    let framerate = match &args.framerate {
        Some(rate) => rate.clone(),
        None => prompt_framerate(input, prompt_out)?,
    };
    info!("Profile '{}' at {} fps", profile.name, framerate);

    check_dependency(&config.ffmpeg_path)?;

    fs::create_dir_all(&config.output_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to create output directory '{}': {}",
            config.output_dir.display(),
            e
        ))
    })?;

    let reporter = make_reporter(global.json);
    reporter.profile_selected(&profile);

    run_timelapse_with_ffmpeg(&config, &profile, &framerate, reporter.as_ref())
}
