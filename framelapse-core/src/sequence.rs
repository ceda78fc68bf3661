//! Capture-time ordering of discovered frames.

use crate::discovery::Frame;

use std::slice;
use std::time::SystemTime;

/// Frames ordered by capture time, ascending.
///
/// Frames sharing a capture time keep their discovery order. Discovery order
/// is whatever the directory walk yields, so ties are only as deterministic as
/// the underlying filesystem.
#[derive(Debug, Clone, Default)]
pub struct FrameSequence {
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Sorts `frames` into capture order.
    pub fn from_frames(mut frames: Vec<Frame>) -> Self {
        // `sort_by_key` is stable, which is what keeps ties in discovery order.
        frames.sort_by_key(|frame| frame.captured_at);
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames
    }

    /// Aggregate size of every frame in the sequence.
    pub fn total_bytes(&self) -> u64 {
        self.frames.iter().map(|frame| frame.size).sum()
    }

    pub fn first_capture(&self) -> Option<SystemTime> {
        self.frames.first().map(|frame| frame.captured_at)
    }

    pub fn last_capture(&self) -> Option<SystemTime> {
        self.frames.last().map(|frame| frame.captured_at)
    }
}

impl<'a> IntoIterator for &'a FrameSequence {
    type Item = &'a Frame;
    type IntoIter = slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}
