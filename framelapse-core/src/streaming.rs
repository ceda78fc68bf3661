//! Frame streaming into the encoder input.
//!
//! Frames are read whole, one at a time and strictly in sequence order, and
//! written to a single sink. A frame that cannot be read is skipped and
//! counted; a sink that stops accepting bytes ends the stream early. Either
//! way the sink is finished exactly once so the consumer sees end-of-stream.

use crate::discovery::Frame;
use crate::reporting::Reporter;
use crate::sequence::FrameSequence;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Produces the raw bytes of a frame.
pub trait FrameSource {
    fn read_frame(&self, frame: &Frame) -> io::Result<Vec<u8>>;
}

/// Reads frames from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFrameSource;

impl FrameSource for FsFrameSource {
    fn read_frame(&self, frame: &Frame) -> io::Result<Vec<u8>> {
        fs::read(&frame.path)
    }
}

/// Accepts ordered frame payloads followed by a single end-of-stream signal.
pub trait FrameSink {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Signals that no more frames follow. Implementations must tolerate
    /// repeated calls; only the first one has an effect.
    fn finish(&mut self) -> io::Result<()>;
}

/// Why a stream ended before every frame was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamInterruption {
    /// Frame being written when the sink failed.
    pub path: PathBuf,
    pub reason: String,
}

/// Statistics for one streaming run. Used only for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames read (successfully or not) before the stream ended.
    pub frames_attempted: usize,
    pub frames_written: usize,
    pub skipped: usize,
    pub bytes_written: u64,
    pub elapsed: Duration,
    pub interruption: Option<StreamInterruption>,
}

/// Streams `sequence` into `sink`, then finishes the sink.
///
/// The reporter is told about every attempted frame whether or not it could be
/// read, and about every skipped frame separately.
pub fn stream_frames<S, K>(
    sequence: &FrameSequence,
    source: &S,
    sink: &mut K,
    reporter: &dyn Reporter,
) -> StreamStats
where
    S: FrameSource + ?Sized,
    K: FrameSink + ?Sized,
{
    let start = Instant::now();
    let total = sequence.len();
    let mut stats = StreamStats::default();

    reporter.stream_started(total);

    for (index, frame) in sequence.iter().enumerate() {
        stats.frames_attempted += 1;

        match source.read_frame(frame) {
            Ok(bytes) => {
                if let Err(e) = sink.write_frame(&bytes) {
                    log::error!(
                        "Encoder stopped accepting input at '{}': {}",
                        frame.path.display(),
                        e
                    );
                    stats.interruption = Some(StreamInterruption {
                        path: frame.path.clone(),
                        reason: e.to_string(),
                    });
                    reporter.frame_processed(index + 1, total, frame);
                    break;
                }
                stats.frames_written += 1;
                stats.bytes_written += bytes.len() as u64;
                log::debug!("Wrote {} ({} bytes)", frame.path.display(), bytes.len());
            }
            Err(e) => {
                log::warn!("Failed to read '{}', skipping: {}", frame.path.display(), e);
                stats.skipped += 1;
                reporter.frame_skipped(frame, &e.to_string());
            }
        }

        reporter.frame_processed(index + 1, total, frame);
    }

    if let Err(e) = sink.finish() {
        // A close failure after a broken pipe is expected; only log it.
        log::warn!("Failed to close encoder input cleanly: {}", e);
    }

    stats.elapsed = start.elapsed();
    log::info!(
        "Streamed {} of {} frame(s) ({} skipped) in {:.2?}",
        stats.frames_written,
        total,
        stats.skipped,
        stats.elapsed
    );
    stats
}
