//! Synthetic upright hand poses for tests, benchmarks and demo input.

use crate::hand::fingers::FingerStates;
use crate::hand::landmarks::{
    HandPose, INDEX_MCP, KEYPOINT_COUNT, Keypoint, MIDDLE_MCP, PINKY_MCP, RING_MCP, THUMB_CMC,
    THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
};

/// MCP positions of index, middle, ring and pinky in an upright right hand.
const FINGER_BASES: [(usize, f32, f32); 4] = [
    (INDEX_MCP, 0.45, 0.60),
    (MIDDLE_MCP, 0.50, 0.58),
    (RING_MCP, 0.55, 0.60),
    (PINKY_MCP, 0.60, 0.62),
];

/// Builds an upright hand whose fingers are extended or curled per `states`.
///
/// Extended fingers run straight up from the MCP joint; curled fingers fold
/// so the tip ends below the PIP joint. An open thumb points up and out,
/// a closed thumb tucks in front of the palm.
pub fn pose_from_states(states: FingerStates) -> HandPose {
    let open = states.as_array();
    let mut points = [Keypoint::default(); KEYPOINT_COUNT];

    points[WRIST] = Keypoint::new(0.50, 0.90);
    points[THUMB_CMC] = Keypoint::new(0.44, 0.82);
    points[THUMB_MCP] = Keypoint::new(0.40, 0.76);
    points[THUMB_IP] = Keypoint::new(0.37, 0.71);
    points[THUMB_TIP] = if open[0] {
        Keypoint::new(0.32, 0.64)
    } else {
        Keypoint::new(0.47, 0.70)
    };

    for (finger, &(mcp, x, y)) in FINGER_BASES.iter().enumerate() {
        points[mcp] = Keypoint::new(x, y);
        // pip, dip, tip follow the MCP in skeleton order
        let offsets: [f32; 3] = if open[finger + 1] {
            [-0.08, -0.14, -0.20]
        } else {
            [-0.06, -0.02, 0.02]
        };
        for (joint, dy) in offsets.iter().enumerate() {
            points[mcp + joint + 1] = Keypoint::new(x, y + dy);
        }
    }

    HandPose::new(points)
}
