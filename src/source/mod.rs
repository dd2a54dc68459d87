//! Where hand keypoints come from.
//!
//! Detection itself happens outside this crate. A source only delivers what
//! a landmark tracker produced, frame by frame.

pub mod frame;
pub mod jsonl;
pub mod mock;
pub mod tracker;

pub use frame::PoseFrame;
pub use jsonl::JsonLinesSource;
pub use mock::MockPoseSource;
pub use tracker::{TrackerProcess, tracker_args};

use crate::error::Result;

/// Pluggable frame input for the pipeline.
pub trait PoseSource: Send {
    /// Next frame, blocking until one is available.
    ///
    /// `Ok(None)` means end of stream for a finite source, and "nothing
    /// yet, poll again" for a live one.
    fn next_frame(&mut self) -> Result<Option<PoseFrame>>;

    /// Returns true for file/pipe sources that have a natural end.
    fn is_finite(&self) -> bool {
        false
    }
}
