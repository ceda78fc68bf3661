// ============================================================================
// framelapse-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning the encoder process, writing
// to its standard input, and collecting everything it prints.
//
// KEY COMPONENTS:
// - EncoderProcess: Trait representing a running encoder
// - EncoderSpawner: Trait for creating new encoder processes
// - SidecarSpawner / SidecarProcess: Implementation using ffmpeg-sidecar
// - OutputCapture: Background readers merging stdout and stderr into one buffer
//
// ARCHITECTURE:
// The pipeline only talks to the traits, so tests can substitute a mock
// spawner that records the command and buffers the frame bytes in memory.

use crate::error::{CoreResult, command_start_error, command_wait_error};

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;

use std::io::{self, Read, Write};
use std::process::{ChildStdin, ExitStatus};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

// --- Encoder Execution Abstraction ---

/// How the encoder process ended, together with everything it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderExit {
    pub success: bool,
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Combined stdout and stderr, in arrival order.
    pub output: String,
}

impl EncoderExit {
    pub fn from_status(status: ExitStatus, output: String) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
            output,
        }
    }

    /// Short description of the exit, e.g. "exit status: 1".
    pub fn status_description(&self) -> String {
        match self.code {
            Some(code) => format!("exit status: {code}"),
            None => "termination by signal".to_string(),
        }
    }
}

/// Trait representing a running encoder process.
pub trait EncoderProcess {
    /// Write end of the encoder's standard input.
    type Input: Write;

    /// Hands out the input pipe. Returns `None` once it has been taken.
    fn take_input(&mut self) -> Option<Self::Input>;

    /// Blocks until the process exits. The input pipe must already be closed,
    /// otherwise the encoder keeps waiting for more frames.
    fn wait(&mut self) -> CoreResult<EncoderExit>;

    /// Kills the process and reaps it. Used when a spawned encoder cannot be
    /// fed.
    fn abort(&mut self) -> CoreResult<()>;
}

/// Trait representing something that can spawn an `EncoderProcess`.
pub trait EncoderSpawner {
    type Process: EncoderProcess;

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Output Capture ---

/// Drains a child's stdout and stderr on background threads into one buffer.
///
/// Both pipes must be drained while frames are being written; an encoder that
/// fills its stderr pipe would otherwise stop reading stdin and deadlock the
/// streamer.
pub struct OutputCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
    readers: Vec<JoinHandle<()>>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self {
            buffer: Arc::new(Mutex::new(Vec::new())),
            readers: Vec::new(),
        }
    }

    /// Starts a reader thread copying `source` into the shared buffer.
    pub fn attach<R>(&mut self, mut source: R)
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::clone(&self.buffer);
        self.readers.push(thread::spawn(move || {
            let mut chunk = [0u8; 8192];
            loop {
                match source.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(n) => {
                        if let Ok(mut buffer) = buffer.lock() {
                            buffer.extend_from_slice(&chunk[..n]);
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        log::debug!("Encoder output reader stopped: {}", e);
                        break;
                    }
                }
            }
        }));
    }

    /// Joins the reader threads and returns the captured text.
    ///
    /// Invalid UTF-8 is replaced rather than dropped.
    pub fn finish(&mut self) -> String {
        for reader in self.readers.drain(..) {
            if reader.join().is_err() {
                log::warn!("Encoder output reader panicked; output may be incomplete");
            }
        }
        self.snapshot()
    }

    /// Text captured so far.
    pub fn snapshot(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Default for OutputCapture {
    fn default() -> Self {
        Self::new()
    }
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `EncoderProcess`.
pub struct SidecarProcess {
    child: SidecarChild,
    capture: OutputCapture,
}

impl SidecarProcess {
    fn new(mut child: SidecarChild) -> Self {
        let mut capture = OutputCapture::new();
        if let Some(stdout) = child.take_stdout() {
            capture.attach(stdout);
        }
        if let Some(stderr) = child.take_stderr() {
            capture.attach(stderr);
        }
        Self { child, capture }
    }
}

impl EncoderProcess for SidecarProcess {
    type Input = ChildStdin;

    fn take_input(&mut self) -> Option<ChildStdin> {
        self.child.take_stdin()
    }

    fn wait(&mut self) -> CoreResult<EncoderExit> {
        let status = self
            .child
            .wait()
            .map_err(|e| command_wait_error("ffmpeg", e))?;
        let output = self.capture.finish();
        Ok(EncoderExit::from_status(status, output))
    }

    fn abort(&mut self) -> CoreResult<()> {
        if let Err(e) = self.child.kill() {
            log::warn!("Failed to kill encoder: {}", e);
        }
        self.child
            .wait()
            .map_err(|e| command_wait_error("ffmpeg", e))?;
        self.capture.finish();
        Ok(())
    }
}

/// Concrete implementation of `EncoderSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl EncoderSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let program = cmd.as_inner().get_program().to_string_lossy().into_owned();
        cmd.spawn()
            .map(SidecarProcess::new)
            .map_err(|e| command_start_error(program, e))
    }
}
