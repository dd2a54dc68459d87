//! Hand geometry: keypoints, poses and finger-state extraction.

pub mod fingers;
pub mod landmarks;
pub mod synthetic;

pub use fingers::{Finger, FingerStates, extract, extract_with_margin};
pub use landmarks::{HandPose, KEYPOINT_COUNT, Keypoint};
