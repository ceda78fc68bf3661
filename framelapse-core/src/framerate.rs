//! Operator-supplied input frame rate.
//!
//! The rate is handed to ffmpeg as `-framerate <text>`. Parsing only checks
//! that the text denotes a positive rate; the normalized text is what is kept.

use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Input frame rate used when the operator leaves the prompt empty.
pub const DEFAULT_INPUT_FRAMERATE: &str = "5";

/// A positive input frame rate: an integer (`5`), a decimal (`29.97`) or a
/// ratio of positive integers (`30000/1001`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFramerate {
    text: String,
}

impl InputFramerate {
    /// Parses operator input, falling back to the default when it is blank.
    pub fn parse_or_default(input: &str) -> CoreResult<Self> {
        if input.trim().is_empty() {
            Ok(Self::default())
        } else {
            input.parse()
        }
    }

    /// Text passed to ffmpeg.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Default for InputFramerate {
    fn default() -> Self {
        Self {
            text: DEFAULT_INPUT_FRAMERATE.to_string(),
        }
    }
}

impl FromStr for InputFramerate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || CoreError::InvalidFramerate(text.to_string());

        let fps = match text.split_once('/') {
            Some((num, den)) => {
                let num: u32 = num.trim().parse().map_err(|_| invalid())?;
                let den: u32 = den.trim().parse().map_err(|_| invalid())?;
                if num == 0 || den == 0 {
                    return Err(invalid());
                }
                f64::from(num) / f64::from(den)
            }
            None => {
                // Only plain digits and a decimal point; rejects "inf", "1e3", "+5".
                if !text.chars().all(|c| c.is_ascii_digit() || c == '.') {
                    return Err(invalid());
                }
                text.parse::<f64>().map_err(|_| invalid())?
            }
        };

        if !fps.is_finite() || fps <= 0.0 {
            return Err(invalid());
        }

        Ok(Self {
            text: text.replace(' ', ""),
        })
    }
}

impl fmt::Display for InputFramerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
