//! Station abstraction and the thread that drives one.

use crate::pipeline::error::{ErrorReporter, StationError};
use crossbeam_channel::{Receiver, Sender};
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// A processing step of the pipeline.
///
/// Stations run in their own threads and are connected by bounded channels.
pub trait Station: Send + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    /// Processes a single input item.
    ///
    /// Returns:
    /// - `Ok(Some(output))` - forward `output` downstream
    /// - `Ok(None)` - nothing to forward for this input
    /// - `Err(StationError)` - processing failed
    fn process(&mut self, input: Self::Input) -> Result<Option<Self::Output>, StationError>;

    /// Returns the name of this station for logging and error reporting.
    fn name(&self) -> &'static str;

    /// Called once the input channel is closed or a fatal error occurred.
    fn shutdown(&mut self) {}
}

/// Runs a station in a dedicated thread.
pub struct StationRunner<S: Station> {
    handle: Option<JoinHandle<()>>,
    station_name: &'static str,
    _phantom: PhantomData<S>,
}

impl<S: Station> StationRunner<S> {
    /// Spawns `station`, reading from `input_rx` and forwarding to `output_tx`.
    pub fn spawn(
        station: S,
        input_rx: Receiver<S::Input>,
        output_tx: Sender<S::Output>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self::start(station, input_rx, Some(output_tx), error_reporter)
    }

    /// Spawns a terminal station; whatever it produces is dropped.
    pub fn spawn_terminal(
        station: S,
        input_rx: Receiver<S::Input>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self::start(station, input_rx, None, error_reporter)
    }

    fn start(
        mut station: S,
        input_rx: Receiver<S::Input>,
        output_tx: Option<Sender<S::Output>>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        let station_name = station.name();

        let handle = thread::spawn(move || {
            Self::run_station(&mut station, input_rx, output_tx, error_reporter);
        });

        Self {
            handle: Some(handle),
            station_name,
            _phantom: PhantomData,
        }
    }

    fn run_station(
        station: &mut S,
        input_rx: Receiver<S::Input>,
        output_tx: Option<Sender<S::Output>>,
        error_reporter: Arc<dyn ErrorReporter>,
    ) {
        let station_name = station.name();

        while let Ok(input) = input_rx.recv() {
            match station.process(input) {
                Ok(Some(output)) => {
                    if let Some(tx) = &output_tx {
                        if tx.send(output).is_err() {
                            // Downstream is gone
                            break;
                        }
                    }
                }
                Ok(None) => {}
                Err(error) => {
                    error_reporter.report(station_name, &error);
                    if error.is_fatal() {
                        break;
                    }
                }
            }
        }

        station.shutdown();
    }

    /// Waits for the station thread to complete.
    pub fn join(mut self) -> Result<(), String> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| format!("Station '{}' thread panicked", self.station_name))
        } else {
            Ok(())
        }
    }

    pub fn name(&self) -> &'static str {
        self.station_name
    }
}
