//! One frame of tracker output.

use crate::hand::{HandPose, Keypoint};
use serde::{Deserialize, Serialize};

/// Hands detected in one video frame.
///
/// Wire form is one JSON object per line:
/// `{"hands": [[{"x":..,"y":..,"z":..}, ...21]], "timestamp_ms": 123}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoseFrame {
    #[serde(default)]
    pub hands: Vec<Vec<Keypoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
}

impl PoseFrame {
    /// A frame with no hand in it.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_pose(pose: &HandPose) -> Self {
        Self {
            hands: vec![pose.keypoints().to_vec()],
            timestamp_ms: None,
        }
    }

    pub fn at(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = Some(timestamp_ms);
        self
    }

    /// The first hand, if it has exactly the expected number of keypoints.
    ///
    /// Additional hands are ignored.
    pub fn first_pose(&self) -> Option<HandPose> {
        self.hands
            .first()
            .and_then(|points| HandPose::from_slice(points))
    }

    pub fn to_json_line(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synthetic::pose_from_states;

    #[test]
    fn test_empty_frame_has_no_pose() {
        assert_eq!(PoseFrame::empty().first_pose(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let frame: PoseFrame = serde_json::from_str("{}").unwrap();
        assert!(frame.hands.is_empty());
        assert_eq!(frame.timestamp_ms, None);
    }

    #[test]
    fn test_short_hand_is_absent() {
        let frame: PoseFrame = serde_json::from_str(r#"{"hands": [[[0.1, 0.2], [0.3, 0.4]]]}"#).unwrap();
        assert_eq!(frame.hands.len(), 1);
        assert_eq!(frame.first_pose(), None);
    }

    #[test]
    fn test_first_hand_wins() {
        let first = pose_from_states("11111".parse().unwrap());
        let second = pose_from_states("00000".parse().unwrap());
        let frame = PoseFrame {
            hands: vec![first.keypoints().to_vec(), second.keypoints().to_vec()],
            timestamp_ms: Some(40),
        };
        assert_eq!(frame.first_pose(), Some(first));
    }

    #[test]
    fn test_json_line_reads_back() {
        let pose = pose_from_states("01100".parse().unwrap());
        let line = PoseFrame::with_pose(&pose).at(33).to_json_line().unwrap();
        assert!(!line.contains('\n'));
        let frame: PoseFrame = serde_json::from_str(&line).unwrap();
        assert_eq!(frame.timestamp_ms, Some(33));
        assert_eq!(frame.first_pose(), Some(pose));
    }
}
