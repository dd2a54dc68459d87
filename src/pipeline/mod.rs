//! Threaded gesture pipeline.
//!
//! Source thread → recognizer station → sink station, each in its own
//! thread and connected by bounded crossbeam channels.

pub mod error;
pub mod orchestrator;
pub mod recognizer_station;
pub mod sink;
pub mod station;
pub mod types;

pub use error::{ErrorReporter, LogReporter, StationError};
pub use orchestrator::{Pipeline, PipelineConfig, PipelineHandle};
pub use recognizer_station::RecognizerStation;
pub use sink::{CollectorSink, GestureSink, JsonSink, PipelineResult, SpeechSink};
pub use station::{Station, StationRunner};
pub use types::{GestureEvent, GestureRecord, PipelineSummary, SourceFrame};
