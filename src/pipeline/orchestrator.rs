//! Gesture pipeline that runs until its source ends or it is stopped.

use crate::defaults;
use crate::error::Result;
use crate::gesture::GestureRecognizer;
use crate::pipeline::error::{ErrorReporter, LogReporter, StationError};
use crate::pipeline::recognizer_station::RecognizerStation;
use crate::pipeline::sink::{GestureSink, PipelineResult, SinkStation};
use crate::pipeline::station::StationRunner;
use crate::pipeline::types::SourceFrame;
use crate::source::{PoseFrame, PoseSource};
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long a live source is left alone after reporting no frame.
const LIVE_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How often the forwarder checks for a stop while no frame arrives.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Configuration for the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Classify one frame out of every N
    pub process_every_n_frames: u32,
    /// Verbosity level (0=status line, 1=label changes, 2=per-frame diagnostics)
    pub verbosity: u8,
    /// Suppress diagnostic output
    pub quiet: bool,
    /// Channel buffer sizes
    pub frame_buffer: usize,
    pub event_buffer: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            process_every_n_frames: defaults::PROCESS_EVERY_N_FRAMES,
            verbosity: 0,
            quiet: false,
            frame_buffer: defaults::POSE_BUFFER,
            event_buffer: defaults::GESTURE_BUFFER,
        }
    }
}

/// Handle to a running pipeline.
pub struct PipelineHandle {
    /// Cleared on stop, or by the source thread when the source ends
    running: Arc<AtomicBool>,
    threads: Vec<JoinHandle<()>>,
    /// Thread pulling from the source; may sit in a blocking read after a stop
    reader: Option<JoinHandle<()>>,
    result_rx: Receiver<PipelineResult>,
}

impl PipelineHandle {
    /// Stops the pipeline and returns what the sink produced.
    ///
    /// Waits up to 5s for the result, then 1s for threads to finish.
    /// After the deadline, remaining threads are detached; they die with the process.
    /// A source stuck in a blocking read does not hold up the stations; its
    /// reader thread is left to exit on its next frame or with the process.
    pub fn stop(mut self) -> PipelineResult {
        self.running.store(false, Ordering::SeqCst);
        if let Some(reader) = self.reader.take()
            && reader.is_finished()
        {
            join_and_report(reader);
        }

        let result = self
            .result_rx
            .recv_timeout(Duration::from_secs(5))
            .unwrap_or_default();

        let deadline = Instant::now() + Duration::from_secs(1);
        let poll_interval = Duration::from_millis(50);

        loop {
            let mut remaining = Vec::new();
            for handle in self.threads.drain(..) {
                if handle.is_finished() {
                    join_and_report(handle);
                } else {
                    remaining.push(handle);
                }
            }
            self.threads = remaining;

            if self.threads.is_empty() {
                break;
            }

            if Instant::now() >= deadline {
                eprintln!(
                    "handsign: shutdown timeout, {} thread(s) still running, detaching",
                    self.threads.len()
                );
                break;
            }

            thread::sleep(poll_interval);
        }

        result
    }

    /// Blocks until a finite source is exhausted and every frame has been handled.
    pub fn wait(mut self) -> PipelineResult {
        for handle in self.threads.drain(..).chain(self.reader.take()) {
            join_and_report(handle);
        }
        self.result_rx.try_recv().unwrap_or_default()
    }

    /// Returns true until the pipeline is stopped or its source ends.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Returns true once every pipeline thread has exited.
    pub fn is_finished(&self) -> bool {
        self.threads.iter().chain(&self.reader).all(|h| h.is_finished())
    }
}

fn join_and_report(handle: JoinHandle<()>) {
    if let Err(panic_info) = handle.join() {
        let msg = panic_info
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| panic_info.downcast_ref::<String>().map(|s| s.as_str()))
            .unwrap_or("unknown panic");
        eprintln!("handsign: pipeline thread panicked: {msg}");
    }
}

/// Gesture pipeline: PoseSource → RecognizerStation → GestureSink.
pub struct Pipeline {
    config: PipelineConfig,
    error_reporter: Arc<dyn ErrorReporter>,
}

impl Pipeline {
    /// Creates a new pipeline with the default error reporter.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            error_reporter: Arc::new(LogReporter),
        }
    }

    /// Sets a custom error reporter.
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = reporter;
        self
    }

    /// Starts the source thread and both stations.
    ///
    /// The recognizer is moved into its station; each pipeline owns its own
    /// smoothing history.
    pub fn start(
        self,
        mut source: Box<dyn PoseSource>,
        recognizer: GestureRecognizer,
        sink: Box<dyn GestureSink>,
    ) -> PipelineHandle {
        let running = Arc::new(AtomicBool::new(true));

        let (frame_tx, frame_rx) = bounded::<SourceFrame>(self.config.frame_buffer);
        let (event_tx, event_rx) = bounded(self.config.event_buffer);
        let (result_tx, result_rx) = bounded(1);

        let recognizer_station = RecognizerStation::new(recognizer)
            .with_frame_interval(self.config.process_every_n_frames)
            .with_verbosity(self.config.verbosity)
            .with_quiet(self.config.quiet);
        let sink_station = SinkStation::new(sink, result_tx);

        let recognizer_runner = StationRunner::spawn(
            recognizer_station,
            frame_rx,
            event_tx,
            self.error_reporter.clone(),
        );
        let sink_runner =
            StationRunner::spawn_terminal(sink_station, event_rx, self.error_reporter.clone());

        let source_is_finite = source.is_finite();

        // The reader may block indefinitely inside the source (stdin, a
        // silent tracker). It hands frames over a rendezvous channel so the
        // forwarder, which owns frame_tx, can still notice a stop.
        let (read_tx, read_rx) = bounded::<Result<Option<PoseFrame>>>(0);
        let reader_running = running.clone();
        let reader_handle = thread::spawn(move || {
            while reader_running.load(Ordering::SeqCst) {
                let item = source.next_frame();
                let end = match &item {
                    Ok(Some(_)) => false,
                    Ok(None) if !source_is_finite => {
                        thread::sleep(LIVE_POLL_INTERVAL);
                        continue;
                    }
                    Ok(None) => true,
                    Err(e) => StationError::from_source(e).is_fatal(),
                };
                if read_tx.send(item).is_err() || end {
                    break;
                }
            }
            // source dropped here: a tracker child is stopped
        });

        let forward_running = running.clone();
        let reporter = self.error_reporter.clone();
        let source_handle = thread::spawn(move || {
            let mut sequence: u64 = 0;

            while forward_running.load(Ordering::SeqCst) {
                let frame = match read_rx.recv_timeout(STOP_POLL_INTERVAL) {
                    Ok(Ok(Some(frame))) => frame,
                    Ok(Ok(None)) => break,
                    Ok(Err(e)) => {
                        let error = StationError::from_source(&e);
                        reporter.report("source", &error);
                        if error.is_fatal() {
                            break;
                        }
                        continue;
                    }
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                };

                let frame = SourceFrame::new(frame, sequence);
                sequence += 1;

                if source_is_finite {
                    // Recorded input: every frame counts
                    if frame_tx.send(frame).is_err() {
                        break;
                    }
                } else if let Err(e) = frame_tx.try_send(frame) {
                    // Live input: drop the frame if the recognizer is behind
                    if e.is_disconnected() {
                        break;
                    }
                }
            }

            forward_running.store(false, Ordering::SeqCst);
            // frame_tx dropped here: stations drain and shut down
        });

        let mut threads = vec![source_handle];
        threads.push(thread::spawn(move || {
            if let Err(msg) = recognizer_runner.join() {
                eprintln!("handsign: {msg}");
            }
        }));
        threads.push(thread::spawn(move || {
            if let Err(msg) = sink_runner.join() {
                eprintln!("handsign: {msg}");
            }
        }));

        PipelineHandle {
            running,
            threads,
            reader: Some(reader_handle),
            result_rx,
        }
    }
}
