// ============================================================================
// framelapse-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration consumed by the timelapse pipeline.
// Process-wide state that the encoder depends on (the output directory, which
// defaults to the current working directory, and the ffmpeg executable) is
// captured here once by the caller instead of being read ad hoc while the
// encoder command is assembled.
//
// KEY COMPONENTS:
// - CoreConfig: Main configuration structure for the library
// - Default constants: Predefined values for common settings
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// framelapse-cli) and passed to `run_timelapse`.

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::EncoderSettings;

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Extension of the captures written by the screenshot source (matched case-sensitively).
pub const DEFAULT_IMAGE_EXTENSION: &str = "png";

/// Executable used when no explicit ffmpeg path is configured.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Location of the screenshot profiles relative to the user's home directory.
pub const DEFAULT_BASE_DIR_COMPONENTS: [&str; 2] = [".runelite", "screenshots"];

/// Returns the default base directory (`~/.runelite/screenshots`), if a home
/// directory can be determined for the current user.
pub fn default_base_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| {
        DEFAULT_BASE_DIR_COMPONENTS
            .iter()
            .fold(home, |path, component| path.join(component))
    })
}

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for the framelapse-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use framelapse_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("/home/me/.runelite/screenshots"),
///     PathBuf::from("."),
/// );
/// config.image_extension = "jpg".to_string();
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----

    /// Directory holding one subdirectory per profile
    pub base_dir: PathBuf,

    /// Directory the finished video is written to
    pub output_dir: PathBuf,

    // ---- Discovery Settings ----

    /// File extension (without the dot) a capture must carry to become a frame
    pub image_extension: String,

    // ---- Encoder Settings ----

    /// ffmpeg executable, either a bare name resolved through PATH or a full path
    pub ffmpeg_path: PathBuf,
}

impl CoreConfig {
    /// Creates a configuration with default discovery and encoder settings.
    pub fn new(base_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            base_dir,
            output_dir,
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
        }
    }

    /// Checks the configuration for values the pipeline cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        validate_extension(&self.image_extension)?;

        if !self.base_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "base directory '{}' does not exist or is not a directory",
                self.base_dir.display()
            )));
        }

        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "output directory '{}' is not a directory",
                self.output_dir.display()
            )));
        }

        Ok(())
    }

    /// Settings handed to the encoder supervisor for one run.
    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            ffmpeg_path: self.ffmpeg_path.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn validate_extension(extension: &str) -> CoreResult<()> {
    if extension.is_empty() {
        return Err(CoreError::Config("image extension must not be empty".to_string()));
    }
    if extension.starts_with('.') {
        return Err(CoreError::Config(format!(
            "image extension '{extension}' must be given without the leading dot"
        )));
    }
    if extension.contains(['/', '\\']) {
        return Err(CoreError::Config(format!(
            "image extension '{extension}' must not contain path separators"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_uses_defaults() {
        let config = CoreConfig::new(PathBuf::from("base"), PathBuf::from("out"));
        assert_eq!(config.image_extension, "png");
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.base_dir, PathBuf::from("base"));
    }

    #[test]
    fn validate_accepts_existing_base_dir() {
        let dir = tempdir().unwrap();
        let config = CoreConfig::new(dir.path().to_path_buf(), dir.path().to_path_buf());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_base_dir() {
        let dir = tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("missing"), dir.path().to_path_buf());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_extensions() {
        let dir = tempdir().unwrap();
        for ext in ["", ".png", "a/b"] {
            let mut config = CoreConfig::new(dir.path().to_path_buf(), dir.path().to_path_buf());
            config.image_extension = ext.to_string();
            assert!(
                matches!(config.validate(), Err(CoreError::Config(_))),
                "extension {ext:?} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_file_as_output_dir() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();
        let config = CoreConfig::new(dir.path().to_path_buf(), file);
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn encoder_settings_carry_paths() {
        let mut config = CoreConfig::new(PathBuf::from("base"), PathBuf::from("videos"));
        config.ffmpeg_path = PathBuf::from("/opt/ffmpeg/bin/ffmpeg");
        let settings = config.encoder_settings();
        assert_eq!(settings.output_dir, PathBuf::from("videos"));
        assert_eq!(settings.ffmpeg_path, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
    }

    #[test]
    fn default_base_dir_ends_with_screenshots() {
        if let Some(path) = default_base_dir() {
            assert!(path.ends_with(".runelite/screenshots"));
        }
    }
}
