// framelapse-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use framelapse_core::{CoreError, InputFramerate};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Framelapse: screenshot timelapse builder",
    long_about = "Builds a timelapse video from a screenshot profile by streaming its captures, \
                  oldest first, into ffmpeg."
)]
pub struct Cli {
    /// Defaults to `timelapse` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// The subcommand to run, with `timelapse` as the default.
    pub fn selected_command(&self) -> Commands {
        self.command.clone().unwrap_or_default()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding one folder per profile (defaults to ~/.runelite/screenshots)
    #[arg(long, global = true, value_name = "DIR", env = "FRAMELAPSE_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Directory the video is written to (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR", env = "FRAMELAPSE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// ffmpeg executable to run
    #[arg(long, global = true, value_name = "PATH", env = "FRAMELAPSE_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Capture file extension, matched case-sensitively (default: png)
    #[arg(long, global = true, value_name = "EXT", env = "FRAMELAPSE_EXTENSION")]
    pub extension: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Optional: write a run log into this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not wait for a key press before exiting
    #[arg(long, global = true)]
    pub no_pause: bool,

    /// Emit machine-readable JSON instead of the terminal UI
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Builds a timelapse for one profile
    Timelapse(TimelapseArgs),
    /// Lists the available profiles
    Profiles,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Timelapse(TimelapseArgs::default())
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TimelapseArgs {
    /// Profile to build; skips the selection menu
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Input frame rate (e.g. 5, 29.97, 30000/1001); skips the prompt
    #[arg(short = 'r', long, value_name = "RATE", value_parser = parse_framerate)]
    pub framerate: Option<InputFramerate>,
}

fn parse_framerate(value: &str) -> Result<InputFramerate, String> {
    value.parse().map_err(|e: CoreError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_defaults_to_timelapse() {
        let cli = Cli::parse_from(["framelapse"]);
        assert!(cli.command.is_none());
        match cli.selected_command() {
            Commands::Timelapse(args) => {
                assert!(args.profile.is_none());
                assert!(args.framerate.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn timelapse_flags_are_parsed() {
        let cli = Cli::parse_from([
            "framelapse",
            "timelapse",
            "--profile",
            "main",
            "--framerate",
            "30000/1001",
            "--no-pause",
            "--output-dir",
            "/videos",
        ]);
        assert!(cli.global.no_pause);
        assert_eq!(cli.global.output_dir, Some(PathBuf::from("/videos")));
        match cli.selected_command() {
            Commands::Timelapse(args) => {
                assert_eq!(args.profile.as_deref(), Some("main"));
                assert_eq!(args.framerate.unwrap().as_str(), "30000/1001");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn invalid_framerate_is_rejected() {
        let result = Cli::try_parse_from(["framelapse", "timelapse", "-r", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = Cli::parse_from(["framelapse", "profiles", "--json", "--base-dir", "/shots"]);
        assert!(matches!(cli.selected_command(), Commands::Profiles));
        assert!(cli.global.json);
        assert_eq!(cli.global.base_dir, Some(PathBuf::from("/shots")));
    }
}
