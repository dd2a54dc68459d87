use crate::clock::{Clock, SystemClock};
use crate::config::{Config, GestureMeta};
use crate::error::{HandsignError, Result};
use crate::gesture::GestureLabel;
use crate::output::{Overlay, clear_line};
use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::{GestureEvent, PipelineSummary};
use crate::speech::{SpeakOutcome, SpeechEngine};
use crossbeam_channel::Sender;
use std::collections::BTreeMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Pluggable consumer of recognized gestures.
pub trait GestureSink: Send + 'static {
    /// Called for every frame that reaches the end of the pipeline.
    fn handle(&mut self, event: &GestureEvent) -> Result<()>;

    /// Called on pipeline shutdown. Return accumulated output if applicable.
    fn finish(&mut self) -> Option<String> {
        None
    }

    /// Name for logging/debugging.
    fn name(&self) -> &'static str {
        "sink"
    }
}

/// What the sink station hands back when it shuts down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineResult {
    pub summary: PipelineSummary,
    pub output: Option<String>,
}

/// Station wrapper for any `GestureSink`.
pub(crate) struct SinkStation {
    sink: Box<dyn GestureSink>,
    summary: PipelineSummary,
    result_tx: Option<Sender<PipelineResult>>,
}

impl SinkStation {
    pub(crate) fn new(sink: Box<dyn GestureSink>, result_tx: Sender<PipelineResult>) -> Self {
        Self {
            sink,
            summary: PipelineSummary::default(),
            result_tx: Some(result_tx),
        }
    }
}

impl Station for SinkStation {
    type Input = GestureEvent;
    type Output = ();

    fn name(&self) -> &'static str {
        self.sink.name()
    }

    fn process(&mut self, event: GestureEvent) -> std::result::Result<Option<()>, StationError> {
        self.summary.record(&event);
        self.sink
            .handle(&event)
            .map(|_| None)
            .map_err(|e| StationError::Recoverable(e.to_string()))
    }

    fn shutdown(&mut self) {
        let result = PipelineResult {
            summary: self.summary,
            output: self.sink.finish(),
        };
        if let Some(tx) = self.result_tx.take()
            && tx.send(result).is_err()
        {
            eprintln!("handsign: sink shutdown: result receiver already dropped");
        }
    }
}

/// Live mode: status line on stderr and spoken phrases.
pub struct SpeechSink<C: Clock + Clone = SystemClock> {
    engine: SpeechEngine<C>,
    overlay: Option<Overlay<C>>,
    gestures: BTreeMap<String, GestureMeta>,
    speech_ok: bool,
    verbosity: u8,
}

impl SpeechSink<SystemClock> {
    /// Sink for the configured gesture set. `quiet` hides the status line.
    pub fn from_config(config: &Config, quiet: bool, verbosity: u8, color: bool) -> Self {
        let overlay = (!quiet).then(|| Overlay::new(color));
        Self::with_parts(
            SpeechEngine::new(config.speech.clone()),
            overlay,
            config.gestures.clone(),
        )
        .with_verbosity(if quiet { 0 } else { verbosity })
    }
}

impl<C: Clock + Clone> SpeechSink<C> {
    pub fn with_parts(
        engine: SpeechEngine<C>,
        overlay: Option<Overlay<C>>,
        gestures: BTreeMap<String, GestureMeta>,
    ) -> Self {
        Self {
            engine,
            overlay,
            gestures,
            speech_ok: true,
            verbosity: 0,
        }
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    fn meta(&self, label: Option<&GestureLabel>) -> Option<&GestureMeta> {
        label.and_then(|l| self.gestures.get(l.as_str()))
    }

    fn speak(&mut self, text: &str) {
        if !self.speech_ok {
            return;
        }
        match self.engine.speak(text, false) {
            Ok(SpeakOutcome::Started) if self.verbosity >= 2 => {
                clear_line();
                eprintln!("handsign: speaking \"{text}\"");
            }
            Ok(_) => {}
            Err(e) => {
                // A missing TTS tool won't appear mid-run; stop trying
                self.speech_ok = false;
                clear_line();
                eprintln!("handsign: speech disabled: {e}");
            }
        }
    }
}

impl<C: Clock + Clone + 'static> GestureSink for SpeechSink<C> {
    fn handle(&mut self, event: &GestureEvent) -> Result<()> {
        let label = event.label().cloned();
        let text = self.meta(label.as_ref()).map(|m| m.text.clone());
        if let Some(text) = text {
            self.speak(&text);
        }

        if self.verbosity >= 1 && event.changed {
            clear_line();
            match (&label, &event.recognition) {
                (Some(label), Some(r)) => eprintln!("handsign: {label} [{}]", r.states),
                _ => eprintln!("handsign: no hand"),
            }
        }

        let speaking = self.engine.is_speaking();
        let meta = label
            .as_ref()
            .and_then(|l| self.gestures.get(l.as_str()));
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.draw(label.as_ref(), meta, speaking);
        }
        Ok(())
    }

    fn finish(&mut self) -> Option<String> {
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.finish();
        }
        if let Err(e) = self.engine.wait() {
            eprintln!("handsign: speech failed: {e}");
        }
        None
    }

    fn name(&self) -> &'static str {
        "speech"
    }
}

/// One JSON line per label change, for piping into other programs.
pub struct JsonSink<W: Write + Send + 'static> {
    out: W,
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> GestureSink for JsonSink<W> {
    fn handle(&mut self, event: &GestureEvent) -> Result<()> {
        if !event.changed {
            return Ok(());
        }
        let line = serde_json::to_string(&event.to_record())?;
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Keeps every event; `finish` returns the sequence of label changes.
#[derive(Clone, Default)]
pub struct CollectorSink {
    events: Arc<Mutex<Vec<GestureEvent>>>,
}

impl CollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far (shared between clones).
    pub fn events(&self) -> Vec<GestureEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl GestureSink for CollectorSink {
    fn handle(&mut self, event: &GestureEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| HandsignError::Other("collector lock poisoned".to_string()))?
            .push(event.clone());
        Ok(())
    }

    fn finish(&mut self) -> Option<String> {
        let changes: Vec<String> = self
            .events()
            .iter()
            .filter(|e| e.changed)
            .map(|e| e.label().map_or("-".to_string(), |l| l.to_string()))
            .collect();
        if changes.is_empty() {
            None
        } else {
            Some(changes.join(" "))
        }
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}
