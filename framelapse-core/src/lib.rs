//! Core library for building timelapse videos from screenshot folders with ffmpeg.
//!
//! This crate provides profile enumeration, recursive frame discovery, ordering
//! by capture time, and streaming of the ordered frames into an ffmpeg process.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use framelapse_core::reporting::TerminalReporter;
//! use framelapse_core::{CoreConfig, InputFramerate, discover_profiles, run_timelapse_with_ffmpeg};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/home/me/.runelite/screenshots"),
//!     PathBuf::from("."),
//! );
//! config.validate().unwrap();
//!
//! let profiles = discover_profiles(&config.base_dir).unwrap();
//! let framerate = InputFramerate::parse_or_default("").unwrap();
//!
//! let result = run_timelapse_with_ffmpeg(
//!     &config,
//!     &profiles[0],
//!     &framerate,
//!     &TerminalReporter::new(),
//! ).unwrap();
//! println!("Wrote {}", result.output_path.display());
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod framerate;
pub mod profiles;
pub mod reporting;
pub mod sequence;
pub mod session;
pub mod streaming;
pub mod timelapse;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, default_base_dir};
pub use discovery::{Catalog, Frame, scan_frames};
pub use error::{CoreError, CoreResult};
pub use external::check_dependency;
pub use framerate::{DEFAULT_INPUT_FRAMERATE, InputFramerate};
pub use profiles::{Profile, discover_profiles, find_profile};
pub use sequence::FrameSequence;
pub use streaming::{FrameSink, FrameSource, FsFrameSource, StreamStats, stream_frames};
pub use timelapse::{TimelapseResult, run_timelapse, run_timelapse_with_ffmpeg};
pub use utils::{format_bytes, format_duration};
