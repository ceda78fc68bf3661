// ============================================================================
// framelapse-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// This module provides error handling utilities for the CLI that integrate
// with the framelapse-core error types while adding CLI-specific error contexts.

// ---- Internal crate imports ----
use framelapse_core::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::fmt;

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Extension trait for adding context to errors in the CLI.
///
/// Similar to anyhow's `context`, but converts to `CoreError::OperationFailed`.
pub trait CliErrorContext<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", context, core_error))
        })
    }
}

impl<T> CliErrorContext<T> for Option<T> {
    fn cli_context<C>(self, context: C) -> CliResult<T>
    where
        C: fmt::Display,
    {
        self.ok_or_else(|| CoreError::OperationFailed(context.to_string()))
    }
}

/// Message printed after `Error:` when the CLI exits on `err`.
///
/// The encoder's output has already been shown by the reporter when it fails,
/// so only its exit status is repeated here.
pub fn describe_error(err: &CoreError) -> String {
    match err {
        CoreError::EncoderFailed { status, .. } => format!("ffmpeg failed with {}", status),
        other => other.to_string(),
    }
}
