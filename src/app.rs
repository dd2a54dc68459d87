//! Gesture recognition entry point.
//!
//! Wires the flow together: landmark source → recognize → speak/print

use crate::config::Config;
use crate::error::{HandsignError, Result};
use crate::gesture::GestureRecognizer;
use crate::pipeline::orchestrator::{Pipeline, PipelineConfig};
use crate::pipeline::sink::{GestureSink, JsonSink, PipelineResult, SpeechSink};
use crate::source::{JsonLinesSource, PoseSource, TrackerProcess};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How often the run loop checks whether a finite source has ended.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Command-line overrides and output choices for a recognition run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Landmark frames file; `-` reads stdin
    pub input: Option<PathBuf>,
    pub window: Option<usize>,
    pub every: Option<u32>,
    pub interval: Option<Duration>,
    pub language: Option<String>,
    pub no_speech: bool,
    pub json: bool,
    pub color: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

/// Apply CLI overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, options: &RunOptions) {
    if let Some(window) = options.window {
        config.recognizer.smoothing_window = window;
    }
    if let Some(every) = options.every {
        config.recognizer.process_every_n_frames = every;
    }
    if let Some(interval) = options.interval {
        config.speech.interval_secs = interval.as_secs_f64();
    }
    if let Some(language) = &options.language {
        config.speech.language = language.clone();
    }
    if options.no_speech || options.json {
        config.speech.enabled = false;
    }
}

/// Pick the frame source: explicit input, piped stdin, or the tracker.
pub fn open_source(config: &Config, input: Option<&Path>) -> Result<Box<dyn PoseSource>> {
    match input {
        Some(path) if path.as_os_str() == "-" => Ok(Box::new(JsonLinesSource::stdin())),
        Some(path) => Ok(Box::new(JsonLinesSource::open(path)?)),
        None if !std::io::stdin().is_terminal() => Ok(Box::new(JsonLinesSource::stdin())),
        None => Ok(Box::new(TrackerProcess::spawn(&config.tracker)?)),
    }
}

/// Run recognition until the source ends or Ctrl+C is pressed.
pub async fn run_command(mut config: Config, options: RunOptions) -> Result<PipelineResult> {
    apply_overrides(&mut config, &options);
    config.validate()?;

    let recognizer = GestureRecognizer::new(config.recognizer_config(), config.gesture_roles()?);
    let source = open_source(&config, options.input.as_deref())?;

    let sink: Box<dyn GestureSink> = if options.json {
        Box::new(JsonSink::stdout())
    } else {
        Box::new(SpeechSink::from_config(
            &config,
            options.quiet,
            options.verbosity,
            options.color,
        ))
    };

    let pipeline_config = PipelineConfig {
        process_every_n_frames: config.recognizer.process_every_n_frames,
        verbosity: options.verbosity,
        quiet: options.quiet,
        ..Default::default()
    };

    if !options.quiet && options.verbosity >= 1 {
        eprintln!(
            "handsign: window {} frames, classifying every {} frame(s), speech {}",
            config.recognizer.smoothing_window,
            config.recognizer.process_every_n_frames,
            if config.speech.enabled {
                config.speech.command.as_str()
            } else {
                "off"
            },
        );
    }

    let handle = Pipeline::new(pipeline_config).start(source, recognizer, sink);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(POLL_INTERVAL);

    let interrupted = loop {
        tokio::select! {
            res = &mut ctrl_c => {
                res.map_err(|e| HandsignError::Other(format!("Failed to wait for Ctrl+C: {}", e)))?;
                break true;
            }
            _ = ticker.tick() => {
                if !handle.is_running() {
                    break false;
                }
            }
        }
    };

    let result = if interrupted {
        if !options.quiet {
            eprintln!("\nShutting down...");
        }
        handle.stop()
    } else {
        handle.wait()
    };

    if !options.quiet && options.verbosity >= 1 {
        let summary = result.summary;
        eprintln!(
            "handsign: {} frames, {} classified, {} with a hand, {} gesture changes, slowest frame {:.1} ms",
            summary.frames,
            summary.processed,
            summary.with_hand,
            summary.label_changes,
            summary.max_latency.as_secs_f64() * 1000.0
        );
    }

    Ok(result)
}
