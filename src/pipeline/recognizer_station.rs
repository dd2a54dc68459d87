use crate::gesture::{GestureLabel, GestureRecognizer, Recognition};
use crate::output::{clear_line, describe_recognition};
use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::{GestureEvent, SourceFrame};

/// Classifies frames and smooths the result.
///
/// Only every Nth frame is classified; the frames in between repeat the
/// last result so the display and speech keep their cadence.
pub struct RecognizerStation {
    recognizer: GestureRecognizer,
    every: u64,
    seen: u64,
    last: Option<Recognition>,
    last_label: Option<GestureLabel>,
    verbosity: u8,
    quiet: bool,
}

impl RecognizerStation {
    pub fn new(recognizer: GestureRecognizer) -> Self {
        Self {
            recognizer,
            every: 1,
            seen: 0,
            last: None,
            last_label: None,
            verbosity: 0,
            quiet: false,
        }
    }

    /// Classify one frame out of every `every` (0 is treated as 1).
    pub fn with_frame_interval(mut self, every: u32) -> Self {
        self.every = u64::from(every.max(1));
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

impl Station for RecognizerStation {
    type Input = SourceFrame;
    type Output = GestureEvent;

    fn name(&self) -> &'static str {
        "recognizer"
    }

    fn process(&mut self, input: SourceFrame) -> Result<Option<GestureEvent>, StationError> {
        let processed = self.seen % self.every == 0;
        self.seen += 1;

        if processed {
            let pose = input.frame.first_pose();
            self.last = self.recognizer.recognize_detailed(pose.as_ref());

            if self.verbosity >= 2 && !self.quiet {
                clear_line();
                eprintln!(
                    "handsign: {} [{:.1} ms]",
                    describe_recognition(input.sequence, self.last.as_ref()),
                    input.received.elapsed().as_secs_f64() * 1000.0
                );
            }
        }

        let label = self.last.as_ref().map(|r| r.smoothed.clone());
        let changed = label != self.last_label;
        self.last_label = label;

        Ok(Some(GestureEvent {
            sequence: input.sequence,
            timestamp_ms: input.frame.timestamp_ms,
            recognition: self.last.clone(),
            processed,
            changed,
            latency: input.received.elapsed(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::synthetic::pose_from_states;
    use crate::source::PoseFrame;
    use std::time::{Duration, Instant};

    fn frame(bits: Option<&str>, sequence: u64) -> SourceFrame {
        let frame = match bits {
            Some(b) => PoseFrame::with_pose(&pose_from_states(b.parse().unwrap())),
            None => PoseFrame::empty(),
        };
        SourceFrame::new(frame, sequence)
    }

    fn labels(station: &mut RecognizerStation, frames: &[Option<&str>]) -> Vec<Option<String>> {
        frames
            .iter()
            .enumerate()
            .map(|(i, bits)| {
                let event = station.process(frame(*bits, i as u64)).unwrap().unwrap();
                event.label().map(|l| l.to_string())
            })
            .collect()
    }

    #[test]
    fn test_every_frame_processed_by_default() {
        let mut station = RecognizerStation::new(GestureRecognizer::default());
        let event = station.process(frame(Some("11111"), 0)).unwrap().unwrap();
        assert!(event.processed);
        assert!(event.changed);
        assert_eq!(event.label().unwrap(), "terima");
    }

    #[test]
    fn test_absence_is_none() {
        let mut station = RecognizerStation::new(GestureRecognizer::default());
        let out = labels(&mut station, &[None, Some("00000"), None]);
        assert_eq!(out, vec![None, Some("semangat".to_string()), None]);
    }

    #[test]
    fn test_skipped_frames_repeat_last_result() {
        let mut station =
            RecognizerStation::new(GestureRecognizer::default()).with_frame_interval(2);

        let first = station.process(frame(Some("00000"), 0)).unwrap().unwrap();
        assert!(first.processed);
        // Odd frame is not classified even though the hand changed
        let second = station.process(frame(Some("11111"), 1)).unwrap().unwrap();
        assert!(!second.processed);
        assert!(!second.changed);
        assert_eq!(second.label().unwrap(), "semangat");
        assert_eq!(second.sequence, 1);

        let third = station.process(frame(None, 2)).unwrap().unwrap();
        assert!(third.processed);
        assert!(third.changed);
        assert_eq!(third.label(), None);
    }

    #[test]
    fn test_changed_only_on_smoothed_change() {
        let mut station = RecognizerStation::new(GestureRecognizer::default());
        let changes: Vec<bool> = ["01100", "01100", "01000", "01100"]
            .iter()
            .enumerate()
            .map(|(i, b)| station.process(frame(Some(b), i as u64)).unwrap().unwrap().changed)
            .collect();
        // The single pointing frame is outvoted
        assert_eq!(changes, vec![true, false, false, false]);
    }

    #[test]
    fn test_latency_measured_from_arrival() {
        let mut station = RecognizerStation::new(GestureRecognizer::default());
        let mut input = frame(Some("01000"), 0);
        input.received = Instant::now() - Duration::from_millis(50);

        let event = station.process(input).unwrap().unwrap();
        assert!(event.latency >= Duration::from_millis(50));
    }

    #[test]
    fn test_zero_interval_treated_as_one() {
        let mut station =
            RecognizerStation::new(GestureRecognizer::default()).with_frame_interval(0);
        for i in 0..3 {
            assert!(station.process(frame(None, i)).unwrap().unwrap().processed);
        }
    }
}
