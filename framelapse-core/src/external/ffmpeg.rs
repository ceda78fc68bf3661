//! FFmpeg command building for timelapse encoding
//!
//! The encoder reads concatenated image files from standard input
//! (`image2pipe`) and writes an H.264 MP4 named after the profile. The
//! argument list is a pure function of the profile, the operator's input frame
//! rate and the `EncoderSettings`; nothing here touches the environment.

use crate::framerate::InputFramerate;
use crate::profiles::Profile;

use ffmpeg_sidecar::command::FfmpegCommand;

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Output frame size.
pub const OUTPUT_RESOLUTION: &str = "1920x1080";
/// Output frame rate; input frames are duplicated or dropped to reach it.
pub const OUTPUT_FRAMERATE: u32 = 60;
pub const VIDEO_CODEC: &str = "libx264";
pub const PIXEL_FORMAT_FILTER: &str = "format=yuv422p";
/// Container extension of the finished video.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// Process-wide state the encoder depends on, captured once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    pub ffmpeg_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Path of the video produced for `profile`.
pub fn output_path(profile: &Profile, settings: &EncoderSettings) -> PathBuf {
    settings
        .output_dir
        .join(format!("{}.{}", profile.name, OUTPUT_EXTENSION))
}

/// Builds the ffmpeg argument list (without the program name).
///
/// ```text
/// -f image2pipe -framerate <rate> -i - -s:v 1920x1080 -c:v libx264
/// -vf format=yuv422p -r 60 -movflags +faststart -y <output_dir>/<profile>.mp4
/// ```
pub fn build_timelapse_args(
    profile: &Profile,
    framerate: &InputFramerate,
    settings: &EncoderSettings,
) -> Vec<String> {
    let output = output_path(profile, settings);

    vec![
        "-f".to_string(),
        "image2pipe".to_string(),
        "-framerate".to_string(),
        framerate.as_str().to_string(),
        "-i".to_string(),
        "-".to_string(),
        "-s:v".to_string(),
        OUTPUT_RESOLUTION.to_string(),
        "-c:v".to_string(),
        VIDEO_CODEC.to_string(),
        "-vf".to_string(),
        PIXEL_FORMAT_FILTER.to_string(),
        "-r".to_string(),
        OUTPUT_FRAMERATE.to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        // Overwrite any previous video for this profile.
        "-y".to_string(),
        output.to_string_lossy().into_owned(),
    ]
}

/// Builds the ffmpeg command with all three standard streams piped.
///
/// The argv is exactly the template: `FfmpegCommand::new_with_path` would
/// prepend its own `-loglevel` flag, so the command is built from a plain
/// `Command` instead.
pub fn build_timelapse_command(
    profile: &Profile,
    framerate: &InputFramerate,
    settings: &EncoderSettings,
) -> FfmpegCommand {
    let mut inner = Command::new(&settings.ffmpeg_path);
    inner
        .args(build_timelapse_args(profile, framerate, settings))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    FfmpegCommand::from(inner)
}

/// Human-readable command line, used for logging and reporting.
pub fn format_command_line(settings: &EncoderSettings, args: &[String]) -> String {
    let mut line = settings.ffmpeg_path.display().to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push('"');
            line.push_str(arg);
            line.push('"');
        } else {
            line.push_str(arg);
        }
    }
    line
}
