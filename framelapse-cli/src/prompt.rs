//! Interactive prompts: profile menu, frame-rate prompt and the exit pause.
//!
//! All prompts read from any `BufRead` and write to any `Write` so they can be
//! driven from tests; the binary passes stdin and stderr.

use crate::error::CliResult;

use framelapse_core::{CoreError, InputFramerate, Profile};

use std::io::{BufRead, Write};

pub const PROFILE_PROMPT: &str =
    "Type the number corresponding to the profile you want to timelapse.\n: ";
pub const FRAMERATE_PROMPT: &str = "Specify a framerate. Leave empty for a default of 5.\n> ";
pub const PAUSE_PROMPT: &str = "Press any key to continue...";

/// Writes the numbered profile list (1-based).
pub fn render_profile_menu<W: Write>(out: &mut W, profiles: &[Profile]) -> CliResult<()> {
    writeln!(out, "Found the following profiles:")?;
    let width = profiles.len().to_string().len();
    for (index, profile) in profiles.iter().enumerate() {
        writeln!(out, "  {:>width$}  {}", index + 1, profile.name, width = width)?;
    }
    Ok(())
}

/// Reads a line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for a profile number until a valid one is entered.
///
/// # Errors
///
/// Fails if the input ends before a valid choice is made.
pub fn select_profile<'a, R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    profiles: &'a [Profile],
) -> CliResult<&'a Profile> {
    loop {
        write!(out, "{}", PROFILE_PROMPT)?;
        out.flush()?;

        let Some(answer) = read_line(input)? else {
            return Err(CoreError::OperationFailed(
                "No profile selected: input ended".to_string(),
            ));
        };

        match answer.parse::<usize>() {
            Ok(choice) if (1..=profiles.len()).contains(&choice) => {
                return Ok(&profiles[choice - 1]);
            }
            _ => {
                log::debug!("Rejected profile choice '{}'", answer);
                writeln!(out, "Please input a number between 1 and {}!", profiles.len())?;
            }
        }
    }
}

/// Asks for the input frame rate. Blank input (or end of input) selects the default.
///
/// An invalid rate is reported and asked for again.
pub fn prompt_framerate<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> CliResult<InputFramerate> {
    loop {
        write!(out, "{}", FRAMERATE_PROMPT)?;
        out.flush()?;

        let answer = read_line(input)?.unwrap_or_default();
        match InputFramerate::parse_or_default(&answer) {
            Ok(rate) => return Ok(rate),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

/// Shows the pause prompt and waits for a line of input.
pub fn wait_for_key<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> CliResult<()> {
    write!(out, "{}", PAUSE_PROMPT)?;
    out.flush()?;
    read_line(input)?;
    Ok(())
}
