//! Hand keypoints and the 21-point skeleton layout.

use serde::{Deserialize, Serialize};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints in one hand skeleton.
pub const KEYPOINT_COUNT: usize = 21;

/// A single landmark in normalized frame coordinates.
///
/// `x` and `y` are in [0, 1] with y growing downward. `z` is relative depth
/// when the tracker provides it and is otherwise 0.0; the classifier ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "KeypointRepr")]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Keypoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub const fn with_depth(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Planar (x, y) distance to another keypoint.
    pub fn distance_2d(&self, other: &Keypoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Accepted wire shapes: `{"x":..,"y":..}` objects or `[x, y]` / `[x, y, z]` arrays.
#[derive(Deserialize)]
#[serde(untagged)]
enum KeypointRepr {
    Object {
        x: f32,
        y: f32,
        #[serde(default)]
        z: f32,
    },
    Triple([f32; 3]),
    Pair([f32; 2]),
}

impl From<KeypointRepr> for Keypoint {
    fn from(repr: KeypointRepr) -> Self {
        match repr {
            KeypointRepr::Object { x, y, z } => Keypoint { x, y, z },
            KeypointRepr::Triple([x, y, z]) => Keypoint { x, y, z },
            KeypointRepr::Pair([x, y]) => Keypoint { x, y, z: 0.0 },
        }
    }
}

/// One detected hand: exactly 21 keypoints in skeleton order.
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    keypoints: [Keypoint; KEYPOINT_COUNT],
}

impl HandPose {
    pub fn new(keypoints: [Keypoint; KEYPOINT_COUNT]) -> Self {
        Self { keypoints }
    }

    /// Builds a pose from tracker output.
    ///
    /// Returns `None` unless exactly 21 keypoints are given; a malformed
    /// pose is treated the same as no hand at all.
    pub fn from_slice(points: &[Keypoint]) -> Option<Self> {
        let keypoints: [Keypoint; KEYPOINT_COUNT] = points.try_into().ok()?;
        Some(Self { keypoints })
    }

    pub fn keypoint(&self, index: usize) -> &Keypoint {
        &self.keypoints[index]
    }

    pub fn keypoints(&self) -> &[Keypoint; KEYPOINT_COUNT] {
        &self.keypoints
    }

    /// Approximate palm center: mean of wrist, index MCP and pinky MCP.
    pub fn palm_center(&self) -> Keypoint {
        let wrist = self.keypoint(WRIST);
        let index = self.keypoint(INDEX_MCP);
        let pinky = self.keypoint(PINKY_MCP);
        Keypoint::with_depth(
            (wrist.x + index.x + pinky.x) / 3.0,
            (wrist.y + index.y + pinky.y) / 3.0,
            (wrist.z + index.z + pinky.z) / 3.0,
        )
    }
}
