use crate::error::{HandsignError, Result};
use crate::source::PoseSource;
use crate::source::frame::PoseFrame;
use std::collections::VecDeque;

enum Item {
    Frame(PoseFrame),
    Malformed,
}

/// Scripted pose source for tests.
///
/// Finite by default: once the script runs out it reports end of stream.
/// A `live()` source reports "nothing yet" instead, like a camera that has
/// stopped seeing frames.
pub struct MockPoseSource {
    items: VecDeque<Item>,
    finite: bool,
    line: u64,
}

impl MockPoseSource {
    pub fn new(frames: impl IntoIterator<Item = PoseFrame>) -> Self {
        Self {
            items: frames.into_iter().map(Item::Frame).collect(),
            finite: true,
            line: 0,
        }
    }

    pub fn live(mut self) -> Self {
        self.finite = false;
        self
    }

    pub fn then_frame(mut self, frame: PoseFrame) -> Self {
        self.items.push_back(Item::Frame(frame));
        self
    }

    /// Queue an undecodable line.
    pub fn then_malformed(mut self) -> Self {
        self.items.push_back(Item::Malformed);
        self
    }

    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

impl PoseSource for MockPoseSource {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        let Some(item) = self.items.pop_front() else {
            return Ok(None);
        };
        self.line += 1;
        match item {
            Item::Frame(frame) => Ok(Some(frame)),
            Item::Malformed => Err(HandsignError::PoseFormat {
                line: self.line,
                message: "mock malformed frame".to_string(),
            }),
        }
    }

    fn is_finite(&self) -> bool {
        self.finite
    }
}
