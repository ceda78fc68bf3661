//! Progress reporting for the timelapse pipeline.
//!
//! The pipeline never prints directly; it tells a `Reporter` what happened and
//! the reporter decides how to present it. A terminal reporter (progress bar
//! plus styled summaries), a JSON-lines reporter and a no-op reporter are
//! provided.

use crate::discovery::Frame;
use crate::external::ffmpeg_executor::EncoderExit;
use crate::profiles::Profile;
use crate::streaming::StreamStats;
use crate::timelapse::TimelapseResult;
use crate::utils::{format_bytes, format_capture_time, format_duration};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// What the scanner found for a profile, reported before streaming begins.
#[derive(Clone, Debug)]
pub struct CatalogSummary {
    pub profile: String,
    pub frame_count: usize,
    pub total_bytes: u64,
    pub skipped_entries: usize,
    pub first_capture: Option<SystemTime>,
    pub last_capture: Option<SystemTime>,
}

/// Reporter interface implemented by both human-readable and JSON reporters.
pub trait Reporter: Send + Sync {
    fn profile_selected(&self, _profile: &Profile) {}
    fn catalog_scanned(&self, _summary: &CatalogSummary) {}
    fn encoder_started(&self, _command_line: &str) {}
    fn stream_started(&self, _total_frames: usize) {}
    /// Called once per attempted frame, whether or not it could be read.
    fn frame_processed(&self, _position: usize, _total: usize, _frame: &Frame) {}
    fn frame_skipped(&self, _frame: &Frame, _reason: &str) {}
    fn stream_finished(&self, _stats: &StreamStats) {}
    fn encoder_failed(&self, _exit: &EncoderExit) {}
    fn timelapse_complete(&self, _result: &TimelapseResult) {}
    /// Non-fatal condition the operator should know about.
    fn warning(&self, _message: &str) {}
}

/// No-op reporter that discards all updates.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Human-friendly reporter that prints concise text output.
pub struct TerminalReporter {
    progress: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(None),
        }
    }

    fn with_progress<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&ProgressBar) -> T,
    {
        let guard = self.progress.lock().ok()?;
        guard.as_ref().map(f)
    }

    fn finish_progress(&self) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn profile_selected(&self, profile: &Profile) {
        println!("\n{}", style("PROFILE").bold().cyan());
        println!("  {:<10} {}", style("Name:").bold(), profile.name);
        println!("  {:<10} {}", style("Folder:").bold(), profile.root.display());
    }

    fn catalog_scanned(&self, summary: &CatalogSummary) {
        println!(
            "  Found {} screenshots. Total size: {}",
            style(summary.frame_count.to_string()).bold(),
            style(format_bytes(summary.total_bytes)).bold()
        );
        if let (Some(first), Some(last)) = (summary.first_capture, summary.last_capture) {
            println!(
                "  {:<10} {} -> {}",
                style("Captured:").bold(),
                format_capture_time(first),
                format_capture_time(last)
            );
        }
        if summary.skipped_entries > 0 {
            println!(
                "  {}",
                style(format!(
                    "{} entries could not be read during the scan",
                    summary.skipped_entries
                ))
                .yellow()
            );
        }
    }

    fn encoder_started(&self, command_line: &str) {
        println!("\n{}", style("ENCODING").bold().cyan());
        println!("  {}", style(command_line).dim());
    }

    fn stream_started(&self, total_frames: usize) {
        self.finish_progress();
        let pb = ProgressBar::new(total_frames as u64);
        let style = ProgressStyle::default_bar()
            .template("Streaming [{bar:40}] {pos}/{len} frames | {elapsed_precise} | eta {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(pb);
        }
    }

    fn frame_processed(&self, position: usize, _total: usize, _frame: &Frame) {
        self.with_progress(|pb| pb.set_position(position as u64));
    }

    fn frame_skipped(&self, frame: &Frame, reason: &str) {
        let line = format!(
            "{} Failed to read '{}', skipping. Error: {}",
            style("WARN:").yellow().bold(),
            frame.path.display(),
            reason
        );
        // A hidden bar (no terminal) swallows println.
        let shown = self
            .with_progress(|pb| {
                if pb.is_hidden() {
                    false
                } else {
                    pb.println(&line);
                    true
                }
            })
            .unwrap_or(false);
        if !shown {
            eprintln!("{}", line);
        }
    }

    fn stream_finished(&self, stats: &StreamStats) {
        self.finish_progress();
        println!(
            "  Streamed {} frame(s) ({}) in {}",
            style(stats.frames_written.to_string()).bold(),
            format_bytes(stats.bytes_written),
            style(format_duration(stats.elapsed)).bold()
        );
        if stats.skipped > 0 {
            println!(
                "  {}",
                style(format!(
                    "Skipped {} screenshots. See output for info",
                    stats.skipped
                ))
                .yellow()
                .bold()
            );
        }
    }

    fn encoder_failed(&self, exit: &EncoderExit) {
        self.finish_progress();
        eprintln!(
            "\n{} {}",
            style("ERROR").red().bold(),
            style(format!("ffmpeg error: {}", exit.status_description())).red().bold()
        );
        eprintln!("{}", exit.output);
    }

    fn timelapse_complete(&self, result: &TimelapseResult) {
        println!("\n{}", style("RESULTS").bold().cyan());
        println!(
            "  {:<8} {}",
            style("Output:").bold(),
            style(result.output_path.display()).bold()
        );
        println!(
            "  {:<8} {} of {} written",
            style("Frames:").bold(),
            result.stats.frames_written,
            result.frame_count
        );
        println!("  {:<8} {}", style("Input:").bold(), format_bytes(result.total_bytes));
        println!(
            "  {:<8} {}",
            style("Time:").bold(),
            format_duration(result.total_elapsed)
        );
        println!("\n{} {}", style("✓").green().bold(), style("Timelapse complete").bold());
    }

    fn warning(&self, message: &str) {
        println!("\n{}", style(format!("WARN: {}", message)).yellow().bold());
    }
}

/// Reporter that writes one JSON object per line, for wrapping tools.
pub struct JsonReporter {
    writer: Mutex<Box<dyn Write + Send>>,
    last_progress_bucket: Mutex<i64>,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            last_progress_bucket: Mutex::new(-1),
        }
    }

    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn unix_seconds(time: Option<SystemTime>) -> Option<u64> {
        time.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
    }

    fn write_value(&self, value: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn profile_selected(&self, profile: &Profile) {
        self.write_value(json!({
            "type": "profile_selected",
            "profile": profile.name,
            "root": profile.root.display().to_string(),
            "timestamp": Self::timestamp(),
        }));
    }

    fn catalog_scanned(&self, summary: &CatalogSummary) {
        self.write_value(json!({
            "type": "catalog_scanned",
            "profile": summary.profile,
            "frame_count": summary.frame_count,
            "total_bytes": summary.total_bytes,
            "skipped_entries": summary.skipped_entries,
            "first_capture": Self::unix_seconds(summary.first_capture),
            "last_capture": Self::unix_seconds(summary.last_capture),
            "timestamp": Self::timestamp(),
        }));
    }

    fn encoder_started(&self, command_line: &str) {
        self.write_value(json!({
            "type": "encoder_started",
            "command": command_line,
            "timestamp": Self::timestamp(),
        }));
    }

    fn stream_started(&self, total_frames: usize) {
        if let Ok(mut bucket) = self.last_progress_bucket.lock() {
            *bucket = -1;
        }
        self.write_value(json!({
            "type": "stream_started",
            "total_frames": total_frames,
            "timestamp": Self::timestamp(),
        }));
    }

    fn frame_processed(&self, position: usize, total: usize, _frame: &Frame) {
        let percent = if total == 0 {
            100.0
        } else {
            position as f64 / total as f64 * 100.0
        };
        let bucket = (percent as i64) / 5;
        if let Ok(mut last) = self.last_progress_bucket.lock() {
            if bucket <= *last && position < total {
                return;
            }
            *last = bucket;
        }

        self.write_value(json!({
            "type": "stream_progress",
            "position": position,
            "total_frames": total,
            "percent": percent,
            "timestamp": Self::timestamp(),
        }));
    }

    fn frame_skipped(&self, frame: &Frame, reason: &str) {
        self.write_value(json!({
            "type": "frame_skipped",
            "path": frame.path.display().to_string(),
            "reason": reason,
            "timestamp": Self::timestamp(),
        }));
    }

    fn stream_finished(&self, stats: &StreamStats) {
        self.write_value(json!({
            "type": "stream_finished",
            "frames_written": stats.frames_written,
            "skipped": stats.skipped,
            "bytes_written": stats.bytes_written,
            "elapsed_seconds": stats.elapsed.as_secs_f64(),
            "interrupted": stats.interruption.is_some(),
            "timestamp": Self::timestamp(),
        }));
    }

    fn encoder_failed(&self, exit: &EncoderExit) {
        self.write_value(json!({
            "type": "encoder_failed",
            "exit_code": exit.code,
            "output": exit.output,
            "timestamp": Self::timestamp(),
        }));
    }

    fn timelapse_complete(&self, result: &TimelapseResult) {
        self.write_value(json!({
            "type": "timelapse_complete",
            "profile": result.profile,
            "output_file": result.output_path.display().to_string(),
            "frame_count": result.frame_count,
            "frames_written": result.stats.frames_written,
            "skipped": result.stats.skipped,
            "total_bytes": result.total_bytes,
            "duration_seconds": result.total_elapsed.as_secs_f64(),
            "timestamp": Self::timestamp(),
        }));
    }

    fn warning(&self, message: &str) {
        self.write_value(json!({
            "type": "warning",
            "message": message,
            "timestamp": Self::timestamp(),
        }));
    }
}
