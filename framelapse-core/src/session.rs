//! Encoder session: one running encoder and the write end of its input.
//!
//! The session is the frame sink for the streamer. Its input pipe is closed
//! exactly once: by `finish`, by `wait` if `finish` was never reached, or by
//! drop on an early return.

use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{
    EncoderSettings, build_timelapse_args, build_timelapse_command, format_command_line,
    output_path,
};
use crate::external::ffmpeg_executor::{EncoderExit, EncoderProcess, EncoderSpawner};
use crate::framerate::InputFramerate;
use crate::profiles::Profile;
use crate::streaming::FrameSink;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// A running encoder fed through its standard input.
pub struct EncoderSession<P: EncoderProcess> {
    process: P,
    input: Option<P::Input>,
    command_line: String,
    output_path: PathBuf,
}

impl<P: EncoderProcess> EncoderSession<P> {
    /// Launches the encoder for `profile`.
    ///
    /// # Errors
    ///
    /// * `CoreError::DependencyNotFound` - If the ffmpeg executable does not exist
    /// * `CoreError::CommandStart` - If the process could not be started
    /// * `CoreError::OperationFailed` - If the process has no input pipe
    pub fn start<S>(
        spawner: &S,
        profile: &Profile,
        framerate: &InputFramerate,
        settings: &EncoderSettings,
    ) -> CoreResult<Self>
    where
        S: EncoderSpawner<Process = P>,
    {
        let args = build_timelapse_args(profile, framerate, settings);
        let command_line = format_command_line(settings, &args);
        log::info!("Starting encoder: {}", command_line);

        let mut process = spawner.spawn(build_timelapse_command(profile, framerate, settings))?;
        let Some(input) = process.take_input() else {
            if let Err(e) = process.abort() {
                log::warn!("Failed to stop encoder without an input pipe: {}", e);
            }
            return Err(CoreError::OperationFailed(
                "encoder was started without an input pipe".to_string(),
            ));
        };

        Ok(Self {
            process,
            input: Some(input),
            command_line,
            output_path: output_path(profile, settings),
        })
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Closes the input pipe (if still open) and waits for the encoder to exit.
    pub fn wait(mut self) -> CoreResult<EncoderExit> {
        if let Err(e) = self.close_input() {
            log::warn!("Failed to flush encoder input before waiting: {}", e);
        }
        let exit = self.process.wait()?;
        log::debug!("Encoder finished with {}", exit.status_description());
        Ok(exit)
    }

    fn close_input(&mut self) -> io::Result<()> {
        match self.input.take() {
            // Dropping the handle closes the pipe even if the flush fails.
            Some(mut input) => input.flush(),
            None => Ok(()),
        }
    }
}

impl<P: EncoderProcess> FrameSink for EncoderSession<P> {
    fn write_frame(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.input.as_mut() {
            Some(input) => input.write_all(bytes),
            None => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "encoder input already closed",
            )),
        }
    }

    fn finish(&mut self) -> io::Result<()> {
        self.close_input()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::mocks::MockEncoderSpawner;

    fn settings() -> EncoderSettings {
        EncoderSettings {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            output_dir: PathBuf::from("/videos"),
        }
    }

    #[test]
    fn start_spawns_the_template_command() {
        let spawner = MockEncoderSpawner::succeeding("");
        let profile = Profile::new("p1", "/shots/p1");
        let rate = InputFramerate::default();

        let session = EncoderSession::start(&spawner, &profile, &rate, &settings()).unwrap();

        let calls = spawner.received_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], build_timelapse_args(&profile, &rate, &settings()));
        assert_eq!(session.output_path(), Path::new("/videos/p1.mp4"));
        assert!(session.command_line().starts_with("ffmpeg -f image2pipe -framerate 5"));
    }

    #[test]
    fn finish_closes_input_once_and_wait_sees_it_closed() {
        let spawner = MockEncoderSpawner::succeeding("done");
        let profile = Profile::new("p1", "/shots/p1");
        let mut session =
            EncoderSession::start(&spawner, &profile, &InputFramerate::default(), &settings())
                .unwrap();

        session.write_frame(b"one").unwrap();
        session.finish().unwrap();
        session.finish().unwrap();
        assert!(session.write_frame(b"late").is_err());

        let exit = session.wait().unwrap();
        assert!(exit.success);
        assert_eq!(exit.output, "done");
        assert_eq!(spawner.input_closes(), 1);
        assert_eq!(spawner.input_closed_at_wait(), Some(true));
        assert_eq!(spawner.written_chunks(), vec![b"one".to_vec()]);
    }

    #[test]
    fn wait_closes_input_when_finish_was_skipped() {
        let spawner = MockEncoderSpawner::succeeding("");
        let profile = Profile::new("p1", "/shots/p1");
        let session =
            EncoderSession::start(&spawner, &profile, &InputFramerate::default(), &settings())
                .unwrap();

        session.wait().unwrap();
        assert_eq!(spawner.input_closes(), 1);
        assert_eq!(spawner.input_closed_at_wait(), Some(true));
    }

    #[test]
    fn dropping_a_session_closes_input() {
        let spawner = MockEncoderSpawner::succeeding("");
        let profile = Profile::new("p1", "/shots/p1");
        let session =
            EncoderSession::start(&spawner, &profile, &InputFramerate::default(), &settings())
                .unwrap();
        drop(session);
        assert_eq!(spawner.input_closes(), 1);
    }

    #[test]
    fn encoder_without_input_pipe_is_stopped() {
        let spawner = MockEncoderSpawner::succeeding("").without_input();
        let profile = Profile::new("p1", "/shots/p1");
        let result =
            EncoderSession::start(&spawner, &profile, &InputFramerate::default(), &settings());
        assert!(matches!(result, Err(CoreError::OperationFailed(_))));
        assert_eq!(spawner.aborts(), 1);
    }

    #[test]
    fn missing_executable_is_reported() {
        let spawner = MockEncoderSpawner::unlaunchable(io::ErrorKind::NotFound);
        let profile = Profile::new("p1", "/shots/p1");
        let result =
            EncoderSession::start(&spawner, &profile, &InputFramerate::default(), &settings());
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }
}
