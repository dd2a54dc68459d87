//! Data passed between pipeline stations.

use crate::gesture::{GestureLabel, Recognition};
use crate::source::PoseFrame;
use serde::Serialize;
use std::time::{Duration, Instant};

/// A tracker frame tagged on arrival.
#[derive(Debug, Clone)]
pub struct SourceFrame {
    pub frame: PoseFrame,
    pub sequence: u64,
    /// When the source thread read the frame
    pub received: Instant,
}

impl SourceFrame {
    pub fn new(frame: PoseFrame, sequence: u64) -> Self {
        Self {
            frame,
            sequence,
            received: Instant::now(),
        }
    }
}

/// Recognizer output for one frame.
///
/// An owned snapshot: consumers never see the live smoothing history.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub sequence: u64,
    pub timestamp_ms: Option<u64>,
    /// `None` when the frame had no usable hand.
    pub recognition: Option<Recognition>,
    /// False for frames skipped by frame thinning; they repeat the last result.
    pub processed: bool,
    /// Smoothed label differs from the previous event's.
    pub changed: bool,
    /// Time from reading the frame to handing out this event.
    pub latency: Duration,
}

impl GestureEvent {
    /// The smoothed label, if a hand was seen.
    pub fn label(&self) -> Option<&GestureLabel> {
        self.recognition.as_ref().map(|r| &r.smoothed)
    }

    /// One-line JSON record for machine consumers.
    pub fn to_record(&self) -> GestureRecord<'_> {
        GestureRecord {
            sequence: self.sequence,
            timestamp_ms: self.timestamp_ms,
            gesture: self.label(),
            raw: self.recognition.as_ref().map(|r| &r.raw),
            fingers: self.recognition.as_ref().map(|r| r.states.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GestureRecord<'a> {
    pub sequence: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    pub gesture: Option<&'a GestureLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<&'a GestureLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingers: Option<String>,
}

/// Counters reported when the pipeline shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Events that reached the sink.
    pub frames: u64,
    /// Events computed from a fresh classification.
    pub processed: u64,
    /// Events with a hand in view.
    pub with_hand: u64,
    /// Times the smoothed label changed.
    pub label_changes: u64,
    /// Slowest frame from source to recognizer output.
    pub max_latency: Duration,
}

impl PipelineSummary {
    pub fn record(&mut self, event: &GestureEvent) {
        self.frames += 1;
        if event.processed {
            self.processed += 1;
        }
        if event.recognition.is_some() {
            self.with_hand += 1;
        }
        if event.changed {
            self.label_changes += 1;
        }
        self.max_latency = self.max_latency.max(event.latency);
    }
}
