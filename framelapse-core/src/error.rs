// ============================================================================
// framelapse-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// Every fallible operation in the core library returns `CoreResult<T>`.
// Per-entry discovery failures and per-frame read failures never surface here:
// they are absorbed and counted by the scanner and the streamer. Only the
// failures that end a run (bad paths, encoder launch, encoder exit) do.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the framelapse core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid frame rate '{0}': expected a positive number such as 5, 29.97 or 30000/1001")]
    InvalidFramerate(String),

    #[error("No profiles found in {}", .0.display())]
    NoProfiles(PathBuf),

    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Required dependency '{0}' not found. Please install it and ensure it's in your PATH.")]
    DependencyNotFound(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Failed to wait for '{0}': {1}")]
    CommandWait(String, io::Error),

    #[error("Encoder exited with {status}\n{output}")]
    EncoderFailed { status: String, output: String },

    #[error("Frame stream interrupted at '{}': {reason}", .path.display())]
    StreamInterrupted { path: PathBuf, reason: String },

    #[error("{0}")]
    OperationFailed(String),
}

/// Result type for framelapse core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Wraps a spawn failure, mapping a missing executable to `DependencyNotFound`.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    let cmd = cmd.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd)
    } else {
        CoreError::CommandStart(cmd, err)
    }
}

pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds the failure for an encoder that exited unsuccessfully.
///
/// `output` is the encoder's combined stdout/stderr and is kept verbatim so the
/// operator sees exactly what ffmpeg printed.
pub fn command_failed_error(status: impl Into<String>, output: impl Into<String>) -> CoreError {
    CoreError::EncoderFailed {
        status: status.into(),
        output: output.into(),
    }
}
