// framelapse-cli/src/lib.rs
//
// Library portion of the Framelapse CLI application.
// Contains argument definitions, prompts and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod prompt;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, GlobalArgs, TimelapseArgs};
pub use commands::profiles::run_profiles_command;
pub use commands::timelapse::run_timelapse_command;
