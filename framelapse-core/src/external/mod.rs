// ============================================================================
// framelapse-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffmpeg Executable
//
// This module encapsulates everything that touches the external encoder: the
// argument template, the process abstraction the pipeline writes frames into,
// and a dependency check used before a run starts.
//
// KEY COMPONENTS:
// - ffmpeg: argument building for the timelapse encode
// - ffmpeg_executor: EncoderSpawner/EncoderProcess traits and the sidecar implementation
// - mocks: in-memory spawner, source and sink for tests
// - check_dependency: verifies that the configured ffmpeg can be executed

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains ffmpeg argument building logic and encoder settings
pub mod ffmpeg;

/// Contains traits and implementations for running the encoder process
pub mod ffmpeg_executor;

pub mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{EncoderSettings, build_timelapse_args, output_path};
pub use ffmpeg_executor::{
    EncoderExit, EncoderProcess, EncoderSpawner, SidecarProcess, SidecarSpawner,
};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that `cmd` can be executed by running it with `-version`.
///
/// The exit status is not inspected; a command that starts is considered
/// available.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - If the command is not found
/// * `CoreError::CommandStart` - If the command exists but fails to start
pub fn check_dependency(cmd: &Path) -> CoreResult<()> {
    let result = Command::new(cmd)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd.display());
            Err(CoreError::DependencyNotFound(cmd.display().to_string()))
        }
        Err(e) => {
            log::error!(
                "Failed to start dependency check command '{}': {}",
                cmd.display(),
                e
            );
            Err(CoreError::CommandStart(cmd.display().to_string(), e))
        }
    }
}
