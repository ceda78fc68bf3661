//! Capture discovery for a single profile.
//!
//! This module walks a profile directory recursively and records every
//! capture whose extension matches the configured image extension. Only
//! metadata is read here; file contents are left to the frame streamer.

use crate::error::{CoreError, CoreResult};
use crate::utils::has_extension;

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// One qualifying capture and the metadata captured at discovery time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub path: PathBuf,
    /// Filesystem modification time; image content is never consulted.
    pub captured_at: SystemTime,
    pub size: u64,
}

/// Result of scanning a profile: frames in discovery order plus the number of
/// entries that could not be inspected.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub frames: Vec<Frame>,
    pub skipped_entries: usize,
}

impl Catalog {
    pub fn total_bytes(&self) -> u64 {
        self.frames.iter().map(|frame| frame.size).sum()
    }
}

/// Finds all captures beneath `root` whose extension equals `extension`.
///
/// Symlinks are not followed. An entry that cannot be read (permission
/// denied, vanished mid-walk, unreadable metadata) is logged, counted in
/// `Catalog::skipped_entries` and otherwise ignored.
///
/// # Errors
///
/// * `CoreError::PathError` - If `root` is not a directory
///
/// # Examples
///
/// ```rust,no_run
/// use framelapse_core::scan_frames;
/// use std::path::Path;
///
/// let catalog = scan_frames(Path::new("/home/me/.runelite/screenshots/main"), "png").unwrap();
/// println!("{} captures, {} bytes", catalog.frames.len(), catalog.total_bytes());
/// ```
pub fn scan_frames(root: &Path, extension: &str) -> CoreResult<Catalog> {
    if !root.is_dir() {
        return Err(CoreError::PathError(format!(
            "Profile directory '{}' does not exist or is not a directory",
            root.display()
        )));
    }

    let mut catalog = Catalog::default();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry during scan: {}", e);
                catalog.skipped_entries += 1;
                continue;
            }
        };

        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("Skipping '{}': {}", entry.path().display(), e);
                catalog.skipped_entries += 1;
                continue;
            }
        };

        let captured_at = match metadata.modified() {
            Ok(time) => time,
            Err(e) => {
                log::warn!(
                    "Skipping '{}': modification time unavailable: {}",
                    entry.path().display(),
                    e
                );
                catalog.skipped_entries += 1;
                continue;
            }
        };

        catalog.frames.push(Frame {
            path: entry.into_path(),
            captured_at,
            size: metadata.len(),
        });
    }

    log::debug!(
        "Scanned {}: {} frame(s), {} skipped entr(ies)",
        root.display(),
        catalog.frames.len(),
        catalog.skipped_entries
    );

    Ok(catalog)
}
