//! Default configuration constants for handsign.
//!
//! Shared between the config layer, the recognizer and the CLI so the
//! numbers live in one place.

/// Number of raw labels kept for the majority vote.
///
/// Five frames is long enough to hide single-frame flicker while still
/// reacting within a fraction of a second at typical camera rates.
pub const SMOOTHING_WINDOW: usize = 5;

/// Largest accepted smoothing window (a few seconds of frames at 30 fps).
pub const MAX_SMOOTHING_WINDOW: usize = 120;

/// Thumb tip must be this many times farther from the palm center than the
/// thumb IP joint to count as open.
pub const THUMB_OPEN_MARGIN: f32 = 1.1;

/// Only every Nth frame is classified; the rest keep the previous label.
pub const PROCESS_EVERY_N_FRAMES: u32 = 2;

/// Minimum detection confidence handed to the landmark tracker.
pub const DETECTION_CONFIDENCE: f32 = 0.7;

/// Minimum tracking confidence handed to the landmark tracker.
pub const TRACKING_CONFIDENCE: f32 = 0.5;

/// Maximum number of hands the tracker should report. Only the first is used.
pub const MAX_HANDS: u32 = 1;

/// Language code passed to the speech command.
pub const SPEECH_LANGUAGE: &str = "id";

/// Seconds before the same phrase may be spoken again.
pub const SPEAK_INTERVAL_SECS: f64 = 3.0;

/// Relative speaking rate (1.0 = normal).
pub const SPEECH_RATE: f32 = 1.0;

/// Words per minute that `SPEECH_RATE` 1.0 maps to for espeak-style commands.
pub const BASE_WORDS_PER_MINUTE: f32 = 175.0;

/// Text-to-speech command used when none is configured.
pub const SPEECH_COMMAND: &str = "espeak-ng";

/// Gesture identifier emitted when no pattern or count rule applies.
pub const IDLE_GESTURE: &str = "diam";

/// Bounded channel sizes between pipeline stations.
pub const POSE_BUFFER: usize = 64;
pub const GESTURE_BUFFER: usize = 64;
