//! Profile enumeration.
//!
//! A profile is one subdirectory of the base capture directory; the screenshot
//! source writes each account's captures into its own folder.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A named collection of captures rooted at one subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub name: String,
    pub root: PathBuf,
}

impl Profile {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Lists the profiles under `base_dir`, sorted by name.
///
/// Only directories become profiles; files in the base directory are ignored,
/// as are entries whose type cannot be determined.
///
/// # Errors
///
/// * `CoreError::PathError` - If `base_dir` cannot be read
/// * `CoreError::NoProfiles` - If `base_dir` contains no subdirectories
pub fn discover_profiles(base_dir: &Path) -> CoreResult<Vec<Profile>> {
    let read_dir = fs::read_dir(base_dir).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to open screenshots folder '{}': {}",
            base_dir.display(),
            e
        ))
    })?;

    let mut profiles: Vec<Profile> = read_dir
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry in {}: {}", base_dir.display(), e);
                    return None;
                }
            };

            if !entry.file_type().ok()?.is_dir() {
                return None;
            }

            Some(Profile::new(
                entry.file_name().to_string_lossy().into_owned(),
                entry.path(),
            ))
        })
        .collect();

    if profiles.is_empty() {
        return Err(CoreError::NoProfiles(base_dir.to_path_buf()));
    }

    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    log::debug!("Found {} profile(s) in {}", profiles.len(), base_dir.display());
    Ok(profiles)
}

/// Finds a profile by exact name.
pub fn find_profile<'a>(profiles: &'a [Profile], name: &str) -> CoreResult<&'a Profile> {
    profiles
        .iter()
        .find(|profile| profile.name == name)
        .ok_or_else(|| CoreError::ProfileNotFound(name.to_string()))
}
