// ============================================================================
// framelapse-core/src/timelapse.rs
// ============================================================================
//
// TIMELAPSE PIPELINE: Orchestration of a Single Timelapse Run
//
// WORKFLOW:
// 1. Scan the profile folder for frames with the configured extension
// 2. Order them by capture time
// 3. Launch the encoder with the output settings for the profile
// 4. Stream every frame into the encoder input, skipping unreadable ones
// 5. Close the input, wait for the encoder and classify the outcome
//
// The pipeline is generic over the encoder spawner and the frame source so it
// can run against mocks in tests.

use crate::config::CoreConfig;
use crate::discovery::scan_frames;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::external::ffmpeg_executor::{EncoderSpawner, SidecarSpawner};
use crate::framerate::InputFramerate;
use crate::profiles::Profile;
use crate::reporting::{CatalogSummary, Reporter};
use crate::sequence::FrameSequence;
use crate::session::EncoderSession;
use crate::streaming::{FrameSource, FsFrameSource, StreamStats, stream_frames};

use log::{error, info, warn};

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Outcome of a successful timelapse run.
#[derive(Debug, Clone)]
pub struct TimelapseResult {
    pub profile: String,
    pub output_path: PathBuf,
    /// Frames discovered and ordered for the run.
    pub frame_count: usize,
    /// Combined size of the discovered frames.
    pub total_bytes: u64,
    pub stats: StreamStats,
    /// Everything the encoder printed.
    pub encoder_output: String,
    pub total_elapsed: Duration,
}

/// Builds the timelapse for `profile`.
///
/// # Errors
///
/// * `CoreError::PathError` - If the profile folder cannot be scanned
/// * `CoreError::DependencyNotFound` / `CoreError::CommandStart` - If the encoder cannot be launched
/// * `CoreError::EncoderFailed` - If the encoder exits unsuccessfully; carries its full output
/// * `CoreError::StreamInterrupted` - If the encoder stopped reading but still exited cleanly
pub fn run_timelapse<S, F>(
    config: &CoreConfig,
    profile: &Profile,
    framerate: &InputFramerate,
    spawner: &S,
    source: &F,
    reporter: &dyn Reporter,
) -> CoreResult<TimelapseResult>
where
    S: EncoderSpawner,
    F: FrameSource + ?Sized,
{
    let total_start = Instant::now();
    info!("Building timelapse for profile '{}'", profile.name);

    let catalog = scan_frames(&profile.root, &config.image_extension)?;
    let skipped_entries = catalog.skipped_entries;
    let sequence = FrameSequence::from_frames(catalog.frames);

    reporter.catalog_scanned(&CatalogSummary {
        profile: profile.name.clone(),
        frame_count: sequence.len(),
        total_bytes: sequence.total_bytes(),
        skipped_entries,
        first_capture: sequence.first_capture(),
        last_capture: sequence.last_capture(),
    });
    if sequence.is_empty() {
        let message = format!(
            "No .{} files found under {}; the encoder will receive an empty stream",
            config.image_extension,
            profile.root.display()
        );
        warn!("{}", message);
        reporter.warning(&message);
    }

    let settings = config.encoder_settings();
    let mut session = EncoderSession::start(spawner, profile, framerate, &settings)?;
    reporter.encoder_started(session.command_line());
    let output_path = session.output_path().to_path_buf();

    let stats = stream_frames(&sequence, source, &mut session, reporter);
    reporter.stream_finished(&stats);

    let exit = session.wait()?;
    if !exit.success {
        error!("Encoder failed with {}", exit.status_description());
        reporter.encoder_failed(&exit);
        return Err(command_failed_error(exit.status_description(), exit.output));
    }

    if let Some(interruption) = stats.interruption {
        return Err(CoreError::StreamInterrupted {
            path: interruption.path,
            reason: interruption.reason,
        });
    }

    let result = TimelapseResult {
        profile: profile.name.clone(),
        output_path,
        frame_count: sequence.len(),
        total_bytes: sequence.total_bytes(),
        stats,
        encoder_output: exit.output,
        total_elapsed: total_start.elapsed(),
    };
    info!(
        "Timelapse for '{}' written to {}",
        result.profile,
        result.output_path.display()
    );
    reporter.timelapse_complete(&result);
    Ok(result)
}

/// Runs the pipeline with the real ffmpeg process and the filesystem.
pub fn run_timelapse_with_ffmpeg(
    config: &CoreConfig,
    profile: &Profile,
    framerate: &InputFramerate,
    reporter: &dyn Reporter,
) -> CoreResult<TimelapseResult> {
    run_timelapse(
        config,
        profile,
        framerate,
        &SidecarSpawner,
        &FsFrameSource,
        reporter,
    )
}
