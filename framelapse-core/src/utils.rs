//! Utility functions for formatting and file operations.
//!
//! This module provides general-purpose helpers used by the reporters and the
//! CLI: duration formatting, byte formatting, and capture-time rendering.

use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Local};

/// Checks whether `path` carries exactly the given extension (case-sensitive).
#[must_use]
pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Formats a duration as HH:MM:SS, or as fractional seconds when under a minute
/// (e.g. 3725s -> "01:02:05", 1.5s -> "1.50s").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    if total_seconds < 60 {
        return format!("{:.2}s", duration.as_secs_f64());
    }

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Renders a capture time in local time, e.g. "2024-06-01 12:30:45".
#[must_use]
pub fn format_capture_time(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M:%S").to_string()
}
