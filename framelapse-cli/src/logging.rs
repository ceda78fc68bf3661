// ============================================================================
// framelapse-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console or File Logging for a Run
//
// Console logging goes through env_logger and defaults to errors only, since
// the reporter already shows progress and skipped frames. `-v` raises it to
// debug and RUST_LOG overrides both. With `--log-dir` all records go to a
// log4rs file appender instead.

use crate::cli::GlobalArgs;
use crate::error::CliResult;

use framelapse_core::CoreError;
use framelapse_core::file_logging::setup_file_logging;
use log::LevelFilter;

use std::path::PathBuf;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Default console filter for the given verbosity.
pub fn console_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "error" }
}

/// Installs the global logger. Returns the log file path when logging to a file.
pub fn init_logging(global: &GlobalArgs) -> CliResult<Option<PathBuf>> {
    if let Some(log_dir) = &global.log_dir {
        let level = if global.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let path = setup_file_logging(log_dir, &get_timestamp(), level).map_err(|e| {
            CoreError::OperationFailed(format!("Failed to set up file logging: {:#}", e))
        })?;
        log::info!("framelapse {} started", env!("CARGO_PKG_VERSION"));
        return Ok(Some(path));
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(console_filter(global.verbose)),
    )
    .format_timestamp(None)
    .try_init()
    .map_err(|e| CoreError::OperationFailed(format!("Failed to set up logging: {}", e)))?;

    Ok(None)
}
