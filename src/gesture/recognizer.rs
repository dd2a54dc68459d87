//! Per-frame gesture recognition with temporal smoothing.

use crate::defaults;
use crate::gesture::label::GestureLabel;
use crate::gesture::roles::GestureRoles;
use crate::gesture::rules::{self, GestureRole, MatchKind};
use crate::gesture::smoother::MajoritySmoother;
use crate::hand::{FingerStates, HandPose, Keypoint, extract_with_margin};

/// Tunables for [`GestureRecognizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecognizerConfig {
    /// Number of recent raw labels in the majority vote.
    pub smoothing_window: usize,
    /// Thumb tip/IP distance ratio above which the thumb counts as open.
    pub thumb_margin: f32,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            smoothing_window: defaults::SMOOTHING_WINDOW,
            thumb_margin: defaults::THUMB_OPEN_MARGIN,
        }
    }
}

/// Single-frame classification before smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawClassification {
    pub states: FingerStates,
    pub role: GestureRole,
    pub matched: MatchKind,
    pub label: GestureLabel,
}

/// Full result of recognizing one frame with a hand in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub states: FingerStates,
    pub role: GestureRole,
    pub matched: MatchKind,
    /// Label for this frame alone
    pub raw: GestureLabel,
    /// Majority label over the smoothing window
    pub smoothed: GestureLabel,
}

/// Stateful recognizer: one instance per frame source.
///
/// Owns its smoothing history. Frames without a hand are reported as `None`
/// and leave the history untouched, so a brief dropout neither resets nor
/// votes in the window.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: RecognizerConfig,
    roles: GestureRoles,
    smoother: MajoritySmoother<GestureLabel>,
}

impl GestureRecognizer {
    pub fn new(config: RecognizerConfig, roles: GestureRoles) -> Self {
        Self {
            config,
            roles,
            smoother: MajoritySmoother::new(config.smoothing_window),
        }
    }

    /// Classifies one frame without touching the smoothing history.
    pub fn classify(&self, pose: &HandPose) -> RawClassification {
        let states = extract_with_margin(pose, self.config.thumb_margin);
        self.classify_states(states)
    }

    /// Maps finger states straight to a label.
    pub fn classify_states(&self, states: FingerStates) -> RawClassification {
        let (role, matched) = rules::classify(&states);
        RawClassification {
            states,
            role,
            matched,
            label: self.roles.label(role).clone(),
        }
    }

    /// Recognizes one frame and returns the smoothed label, or `None` when no hand is present.
    pub fn recognize(&mut self, pose: Option<&HandPose>) -> Option<GestureLabel> {
        self.recognize_detailed(pose).map(|r| r.smoothed)
    }

    /// Like [`recognize`](Self::recognize) but keeps the intermediate results.
    pub fn recognize_detailed(&mut self, pose: Option<&HandPose>) -> Option<Recognition> {
        let raw = self.classify(pose?);
        let smoothed = self.smoother.smooth(raw.label.clone());
        Some(Recognition {
            states: raw.states,
            role: raw.role,
            matched: raw.matched,
            raw: raw.label,
            smoothed,
        })
    }

    /// Recognizes tracker output directly; anything but 21 keypoints counts as no hand.
    pub fn recognize_keypoints(&mut self, keypoints: &[Keypoint]) -> Option<GestureLabel> {
        let pose = HandPose::from_slice(keypoints);
        self.recognize(pose.as_ref())
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn roles(&self) -> &GestureRoles {
        &self.roles
    }

    /// Number of raw labels currently in the smoothing window.
    pub fn history_len(&self) -> usize {
        self.smoother.history().len()
    }

    pub fn reset(&mut self) {
        self.smoother.reset();
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(RecognizerConfig::default(), GestureRoles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synthetic::pose_from_states;

    fn pose(bits: &str) -> HandPose {
        pose_from_states(bits.parse().unwrap())
    }

    #[test]
    fn test_open_palm_matches_first_rule() {
        let recognizer = GestureRecognizer::default();
        let raw = recognizer.classify(&pose("11111"));
        assert_eq!(raw.label, "terima");
        assert_eq!(raw.matched, MatchKind::Pattern { rule: 1 });
    }

    #[test]
    fn test_fist() {
        let mut recognizer = GestureRecognizer::default();
        assert_eq!(
            recognizer.recognize(Some(&pose("00000"))),
            Some(GestureLabel::new("semangat"))
        );
    }

    #[test]
    fn test_absence_is_none_and_skips_history() {
        let mut recognizer = GestureRecognizer::default();
        assert_eq!(recognizer.recognize(None), None);
        assert_eq!(recognizer.history_len(), 0);

        recognizer.recognize(Some(&pose("01000")));
        recognizer.recognize(None);
        assert_eq!(recognizer.history_len(), 1);
    }

    #[test]
    fn test_absence_distinct_from_idle() {
        let mut recognizer = GestureRecognizer::default();
        // Four open fingers, no pattern: idle gesture.
        let idle = recognizer.recognize(Some(&pose("01111")));
        assert_eq!(idle, Some(GestureLabel::new("diam")));
        assert_ne!(recognizer.recognize(None), idle);
    }

    #[test]
    fn test_malformed_keypoints_count_as_absence() {
        let mut recognizer = GestureRecognizer::default();
        let points = vec![Keypoint::new(0.5, 0.5); 20];
        assert_eq!(recognizer.recognize_keypoints(&points), None);
        assert_eq!(recognizer.history_len(), 0);
    }

    #[test]
    fn test_keypoints_path_matches_pose_path() {
        let mut recognizer = GestureRecognizer::default();
        let points = pose("10000").keypoints().to_vec();
        assert_eq!(
            recognizer.recognize_keypoints(&points),
            Some(GestureLabel::new("baik"))
        );
    }

    #[test]
    fn test_smoothing_hides_single_frame_flicker() {
        let mut recognizer = GestureRecognizer::default();
        let peace = pose("01100");
        let pointing = pose("01000");
        for _ in 0..4 {
            recognizer.recognize(Some(&peace));
        }
        let detail = recognizer.recognize_detailed(Some(&pointing)).unwrap();
        assert_eq!(detail.raw, "halo");
        assert_eq!(detail.smoothed, "perkenalan");
    }

    #[test]
    fn test_constant_stream_converges_within_window() {
        let mut recognizer = GestureRecognizer::default();
        let fist = pose("00000");
        for _ in 0..5 {
            recognizer.recognize(Some(&fist));
        }
        let thumbs_up = pose("10000");
        let window = recognizer.config().smoothing_window;
        let outputs: Vec<_> = (0..window)
            .map(|_| recognizer.recognize(Some(&thumbs_up)))
            .collect();
        assert_eq!(outputs.last(), Some(&Some(GestureLabel::new("baik"))));
        // Once converged it stays put.
        assert_eq!(
            recognizer.recognize(Some(&thumbs_up)),
            Some(GestureLabel::new("baik"))
        );
    }

    #[test]
    fn test_thumb_margin_from_config() {
        let strict = GestureRecognizer::new(
            RecognizerConfig {
                thumb_margin: 10.0,
                ..RecognizerConfig::default()
            },
            GestureRoles::default(),
        );
        // With an absurd margin the thumb never opens: thumbs up reads as a fist.
        assert_eq!(strict.classify(&pose("10000")).role, GestureRole::Fist);
    }

    #[test]
    fn test_reset() {
        let mut recognizer = GestureRecognizer::default();
        recognizer.recognize(Some(&pose("00000")));
        recognizer.reset();
        assert_eq!(recognizer.history_len(), 0);
    }
}
