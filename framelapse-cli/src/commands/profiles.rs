//! Implementation of the `profiles` command.

use crate::cli::GlobalArgs;
use crate::commands::build_config;
use crate::error::CliResult;

use console::style;
use framelapse_core::{CoreError, Profile, discover_profiles};

use std::io::Write;

/// Writes the profile list, as a table or as a JSON array.
pub fn write_profiles<W: Write>(out: &mut W, profiles: &[Profile], json: bool) -> CliResult<()> {
    if json {
        let text = serde_json::to_string_pretty(profiles)
            .map_err(|e| CoreError::OperationFailed(format!("Failed to serialize profiles: {}", e)))?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    let name_width = profiles.iter().map(|p| p.name.len()).max().unwrap_or(0);
    for (index, profile) in profiles.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {}  {}",
            index + 1,
            style(format!("{:<width$}", profile.name, width = name_width)).bold(),
            style(profile.root.display()).dim()
        )?;
    }
    Ok(())
}

pub fn run_profiles_command<W: Write>(global: &GlobalArgs, out: &mut W) -> CliResult<()> {
    let config = build_config(global)?;
    let profiles = discover_profiles(&config.base_dir)?;
    write_profiles(out, &profiles, global.json)
}
