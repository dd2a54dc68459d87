//! Finger-state extraction: which fingers are extended in a hand pose.
//!
//! Both heuristics are deliberately simple. The thumb uses distance from the
//! palm center, which works for any hand rotation. The other four fingers
//! compare tip and PIP height, which assumes a roughly upright hand and is
//! wrong for sideways or inverted hands.

use crate::defaults;
use crate::hand::landmarks::{
    HandPose, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};
use std::fmt;
use std::str::FromStr;

/// The five fingers in vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// (tip, pip) landmark pairs for index, middle, ring and pinky.
const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Open/closed state of each finger, ordered thumb, index, middle, ring, pinky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerStates([bool; 5]);

impl FingerStates {
    pub const fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    pub fn is_open(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }

    /// Number of extended fingers (0-5).
    pub fn open_count(&self) -> usize {
        self.0.iter().filter(|&&open| open).count()
    }
}

impl From<[bool; 5]> for FingerStates {
    fn from(states: [bool; 5]) -> Self {
        Self(states)
    }
}

/// Renders as a bit string, thumb first: `01100` is index + middle.
impl fmt::Display for FingerStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for open in self.0 {
            f.write_str(if open { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for FingerStates {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: Vec<char> = s.trim().chars().filter(|c| *c != '_').collect();
        if bits.len() != 5 {
            return Err(format!(
                "expected 5 digits (thumb, index, middle, ring, pinky), got {}",
                bits.len()
            ));
        }
        let mut states = [false; 5];
        for (slot, bit) in states.iter_mut().zip(bits) {
            *slot = match bit {
                '1' => true,
                '0' => false,
                other => return Err(format!("invalid digit '{other}', use 0 or 1")),
            };
        }
        Ok(Self(states))
    }
}

/// Classifies each finger of `pose` as open or closed using the default thumb margin.
pub fn extract(pose: &HandPose) -> FingerStates {
    extract_with_margin(pose, defaults::THUMB_OPEN_MARGIN)
}

/// Classifies each finger of `pose` as open or closed.
///
/// The thumb is open when its tip is more than `thumb_margin` times as far
/// from the palm center as its IP joint. The margin keeps a half-bent thumb
/// from flickering between states.
pub fn extract_with_margin(pose: &HandPose, thumb_margin: f32) -> FingerStates {
    let center = pose.palm_center();
    let tip_distance = pose.keypoint(THUMB_TIP).distance_2d(&center);
    let ip_distance = pose.keypoint(THUMB_IP).distance_2d(&center);

    let mut states = [false; 5];
    states[0] = tip_distance > ip_distance * thumb_margin;

    // Image y grows downward: a raised fingertip has the smaller y.
    for (slot, (tip, pip)) in states[1..].iter_mut().zip(FINGER_JOINTS) {
        *slot = pose.keypoint(tip).y < pose.keypoint(pip).y;
    }

    FingerStates(states)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::landmarks::{INDEX_MCP, KEYPOINT_COUNT, Keypoint, PINKY_MCP, WRIST};
    use crate::hand::synthetic::pose_from_states;

    #[test]
    fn test_all_open_pose() {
        let pose = pose_from_states(FingerStates::new([true; 5]));
        assert_eq!(extract(&pose), FingerStates::new([true; 5]));
    }

    #[test]
    fn test_all_closed_pose() {
        let pose = pose_from_states(FingerStates::new([false; 5]));
        assert_eq!(extract(&pose), FingerStates::new([false; 5]));
    }

    #[test]
    fn test_every_combination_round_trips_through_geometry() {
        for mask in 0u8..32 {
            let states: [bool; 5] = std::array::from_fn(|i| mask & (1 << (4 - i)) != 0);
            let expected = FingerStates::new(states);
            let pose = pose_from_states(expected);
            assert_eq!(extract(&pose), expected, "mask {mask:05b}");
        }
    }

    #[test]
    fn test_extract_is_deterministic() {
        let pose = pose_from_states("10101".parse().unwrap());
        assert_eq!(extract(&pose), extract(&pose));
    }

    fn thumb_pose(tip_distance: f32, ip_distance: f32) -> HandPose {
        // Palm center sits at the origin; thumb joints are placed along +x.
        let mut points = [Keypoint::new(0.0, 1.0); KEYPOINT_COUNT];
        points[WRIST] = Keypoint::new(0.0, 0.0);
        points[INDEX_MCP] = Keypoint::new(0.0, 0.0);
        points[PINKY_MCP] = Keypoint::new(0.0, 0.0);
        points[THUMB_IP] = Keypoint::new(ip_distance, 0.0);
        points[THUMB_TIP] = Keypoint::new(tip_distance, 0.0);
        HandPose::new(points)
    }

    #[test]
    fn test_thumb_needs_more_than_margin() {
        let just_under = thumb_pose(0.219, 0.2);
        assert!(!extract_with_margin(&just_under, 1.1).is_open(Finger::Thumb));

        let past_margin = thumb_pose(0.23, 0.2);
        assert!(extract(&past_margin).is_open(Finger::Thumb));

        let slightly_farther = thumb_pose(0.21, 0.2);
        assert!(!extract(&slightly_farther).is_open(Finger::Thumb));
    }

    #[test]
    fn test_thumb_margin_is_configurable() {
        let pose = thumb_pose(0.21, 0.2);
        assert!(extract_with_margin(&pose, 1.0).is_open(Finger::Thumb));
        assert!(!extract_with_margin(&pose, 1.1).is_open(Finger::Thumb));
    }

    #[test]
    fn test_thumb_is_orientation_agnostic() {
        // Mirror the thumb to the other side of the palm.
        let right = thumb_pose(0.3, 0.2);
        let left = thumb_pose(-0.3, -0.2);
        assert!(extract(&right).is_open(Finger::Thumb));
        assert!(extract(&left).is_open(Finger::Thumb));
    }

    #[test]
    fn test_finger_equal_height_is_closed() {
        let mut points = [Keypoint::new(0.5, 0.5); KEYPOINT_COUNT];
        points[INDEX_TIP] = Keypoint::new(0.5, 0.4);
        points[INDEX_PIP] = Keypoint::new(0.5, 0.4);
        let states = extract(&HandPose::new(points));
        assert!(!states.is_open(Finger::Index));
    }

    #[test]
    fn test_inverted_hand_reads_as_closed() {
        // Upside-down hand: tips below PIP joints. Known limitation of the height check.
        let mut points = [Keypoint::new(0.5, 0.5); KEYPOINT_COUNT];
        for (tip, pip) in FINGER_JOINTS {
            points[pip] = Keypoint::new(0.5, 0.5);
            points[tip] = Keypoint::new(0.5, 0.7);
        }
        let states = extract(&HandPose::new(points));
        assert_eq!(states.open_count(), 0);
    }

    #[test]
    fn test_open_count() {
        assert_eq!(FingerStates::new([true, false, true, false, true]).open_count(), 3);
        assert_eq!(FingerStates::default().open_count(), 0);
    }

    #[test]
    fn test_display_and_parse() {
        let states: FingerStates = "01100".parse().unwrap();
        assert!(states.is_open(Finger::Index));
        assert!(states.is_open(Finger::Middle));
        assert!(!states.is_open(Finger::Thumb));
        assert_eq!(states.to_string(), "01100");

        let underscored: FingerStates = "0_1100".parse().unwrap();
        assert_eq!(underscored, states);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("0110".parse::<FingerStates>().is_err());
        assert!("011001".parse::<FingerStates>().is_err());
        assert!("01a00".parse::<FingerStates>().is_err());
    }

    #[test]
    fn test_finger_order_matches_index() {
        for (i, finger) in Finger::ALL.iter().enumerate() {
            assert_eq!(*finger as usize, i);
        }
    }
}
