// framelapse-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// This module is only compiled for the crate's own tests or when the
// "test-mocks" feature is enabled.
#![cfg(any(test, feature = "test-mocks"))]

use super::ffmpeg_executor::{EncoderExit, EncoderProcess, EncoderSpawner};
use crate::discovery::Frame;
use crate::error::{CoreResult, command_start_error};
use crate::streaming::{FrameSink, FrameSource};

use ffmpeg_sidecar::command::FfmpegCommand;

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

// --- Frame sources and sinks ---

/// In-memory frame source. Frames without registered bytes fail to read
/// with `NotFound`, like a capture deleted after discovery.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSource {
    frames: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryFrameSource {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_frame(mut self, path: impl Into<PathBuf>, bytes: &[u8]) -> Self {
        self.frames.insert(path.into(), bytes.to_vec());
        self
    }
}

impl FrameSource for MemoryFrameSource {
    fn read_frame(&self, frame: &Frame) -> io::Result<Vec<u8>> {
        self.frames.get(&frame.path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such frame: {}", frame.path.display()),
            )
        })
    }
}

/// Sink that buffers every frame and counts end-of-stream signals.
#[derive(Debug, Clone, Default)]
pub struct MemoryFrameSink {
    chunks: Vec<Vec<u8>>,
    finish_calls: usize,
    fail_after: Option<usize>,
}

impl MemoryFrameSink {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sink that accepts `accepted` frames and then reports a broken pipe.
    pub fn failing_after(accepted: usize) -> Self {
        Self {
            fail_after: Some(accepted),
            ..Default::default()
        }
    }

    pub fn chunks(&self) -> Vec<Vec<u8>> {
        self.chunks.clone()
    }

    pub fn finish_calls(&self) -> usize {
        self.finish_calls
    }
}

impl FrameSink for MemoryFrameSink {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.finish_calls > 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink already finished"));
        }
        if self.fail_after.is_some_and(|limit| self.chunks.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock consumer went away"));
        }
        self.chunks.push(bytes.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finish_calls += 1;
        Ok(())
    }
}

// --- Encoder process ---

#[derive(Debug, Default)]
struct MockEncoderState {
    received_calls: Vec<Vec<String>>,
    chunks: Vec<Vec<u8>>,
    input_closes: usize,
    input_closed_at_wait: Option<bool>,
    aborts: usize,
}

#[derive(Debug, Clone)]
enum MockOutcome {
    Exit(EncoderExit),
    SpawnError(io::ErrorKind),
}

/// Write end handed out by `MockEncoderProcess`. Dropping it closes the pipe.
pub struct MockEncoderInput {
    state: Rc<RefCell<MockEncoderState>>,
    fail_after: Option<usize>,
}

impl Write for MockEncoderInput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        if self.fail_after.is_some_and(|limit| state.chunks.len() >= limit) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "Broken pipe (os error 32)"));
        }
        state.chunks.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for MockEncoderInput {
    fn drop(&mut self) {
        self.state.borrow_mut().input_closes += 1;
    }
}

/// Mock implementation of `EncoderProcess`.
pub struct MockEncoderProcess {
    state: Rc<RefCell<MockEncoderState>>,
    input: Option<MockEncoderInput>,
    exit: EncoderExit,
}

impl EncoderProcess for MockEncoderProcess {
    type Input = MockEncoderInput;

    fn take_input(&mut self) -> Option<MockEncoderInput> {
        self.input.take()
    }

    fn wait(&mut self) -> CoreResult<EncoderExit> {
        // Dropping an untaken input here mirrors a real process whose stdin
        // handle is released with the child.
        let untaken = self.input.take();
        let mut state = self.state.borrow_mut();
        state.input_closed_at_wait = Some(untaken.is_none() && state.input_closes > 0);
        drop(state);
        drop(untaken);
        Ok(self.exit.clone())
    }

    fn abort(&mut self) -> CoreResult<()> {
        drop(self.input.take());
        self.state.borrow_mut().aborts += 1;
        Ok(())
    }
}

/// Mock implementation of `EncoderSpawner` that records the command line and
/// buffers all bytes written to the encoder's input.
#[derive(Clone)]
pub struct MockEncoderSpawner {
    state: Rc<RefCell<MockEncoderState>>,
    outcome: MockOutcome,
    fail_after: Option<usize>,
    no_input: bool,
}

impl MockEncoderSpawner {
    /// Encoder that consumes everything and exits 0 printing `output`.
    pub fn succeeding(output: &str) -> Self {
        Self::with_outcome(MockOutcome::Exit(EncoderExit {
            success: true,
            code: Some(0),
            output: output.to_string(),
        }))
    }

    /// Encoder that exits with `code` printing `output`.
    pub fn failing(code: i32, output: &str) -> Self {
        Self::with_outcome(MockOutcome::Exit(EncoderExit {
            success: code == 0,
            code: Some(code),
            output: output.to_string(),
        }))
    }

    /// Encoder whose launch fails with the given error kind.
    pub fn unlaunchable(kind: io::ErrorKind) -> Self {
        Self::with_outcome(MockOutcome::SpawnError(kind))
    }

    /// Makes the encoder input reject writes after `accepted` frames.
    pub fn breaking_pipe_after(mut self, accepted: usize) -> Self {
        self.fail_after = Some(accepted);
        self
    }

    /// Spawns an encoder that hands out no input pipe.
    pub fn without_input(mut self) -> Self {
        self.no_input = true;
        self
    }

    fn with_outcome(outcome: MockOutcome) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockEncoderState::default())),
            outcome,
            fail_after: None,
            no_input: false,
        }
    }

    pub fn received_calls(&self) -> Vec<Vec<String>> {
        self.state.borrow().received_calls.clone()
    }

    /// Frames written to the encoder input, one entry per write.
    pub fn written_chunks(&self) -> Vec<Vec<u8>> {
        self.state.borrow().chunks.clone()
    }

    /// How many times the input pipe was closed.
    pub fn input_closes(&self) -> usize {
        self.state.borrow().input_closes
    }

    /// Whether the input pipe was already closed when `wait` ran; `None` if
    /// `wait` was never called.
    pub fn input_closed_at_wait(&self) -> Option<bool> {
        self.state.borrow().input_closed_at_wait
    }

    /// How many spawned processes were killed and reaped.
    pub fn aborts(&self) -> usize {
        self.state.borrow().aborts
    }
}

impl EncoderSpawner for MockEncoderSpawner {
    type Process = MockEncoderProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        log::info!("MockEncoderSpawner: spawn with args {:?}", args);
        self.state.borrow_mut().received_calls.push(args);

        match &self.outcome {
            MockOutcome::Exit(exit) => Ok(MockEncoderProcess {
                state: Rc::clone(&self.state),
                input: (!self.no_input).then(|| MockEncoderInput {
                    state: Rc::clone(&self.state),
                    fail_after: self.fail_after,
                }),
                exit: exit.clone(),
            }),
            MockOutcome::SpawnError(kind) => {
                Err(command_start_error("ffmpeg", io::Error::from(*kind)))
            }
        }
    }
}
