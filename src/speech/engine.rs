//! Rate-limited, non-blocking speech playback.

use crate::clock::{Clock, SystemClock};
use crate::config::SpeechConfig;
use crate::defaults;
use crate::error::Result;
use crate::speech::executor::{CommandExecutor, SystemCommandExecutor, Utterance};
use crate::speech::gate::SpeechGate;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// What `SpeechEngine::speak` did with a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Playback was launched.
    Started,
    /// Same phrase was spoken less than one interval ago.
    Cooldown,
    /// Another phrase is still playing; this one was dropped.
    Busy,
    /// Speech is turned off.
    Disabled,
    /// Nothing to say.
    Empty,
}

impl SpeakOutcome {
    pub fn started(self) -> bool {
        self == SpeakOutcome::Started
    }
}

impl fmt::Display for SpeakOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpeakOutcome::Started => "started",
            SpeakOutcome::Cooldown => "cooldown",
            SpeakOutcome::Busy => "busy",
            SpeakOutcome::Disabled => "disabled",
            SpeakOutcome::Empty => "empty",
        };
        f.write_str(s)
    }
}

/// Speaks one phrase at a time through an external TTS command.
///
/// Never interrupts a phrase in progress and never blocks the caller.
pub struct SpeechEngine<C: Clock = SystemClock> {
    config: SpeechConfig,
    executor: Arc<dyn CommandExecutor>,
    gate: SpeechGate<C>,
    current: Option<Box<dyn Utterance>>,
}

impl SpeechEngine<SystemClock> {
    /// Engine using the real command runner and system time.
    pub fn new(config: SpeechConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemCommandExecutor::new()), SystemClock)
    }
}

impl<C: Clock> SpeechEngine<C> {
    pub fn with_parts(config: SpeechConfig, executor: Arc<dyn CommandExecutor>, clock: C) -> Self {
        // Out-of-range values are rejected by Config::validate; saturate for the rest
        let interval =
            Duration::try_from_secs_f64(config.interval_secs.max(0.0)).unwrap_or(Duration::MAX);
        Self {
            gate: SpeechGate::with_clock(interval, clock),
            config,
            executor,
            current: None,
        }
    }

    /// Speak `text` unless it repeats too soon or something is already playing.
    ///
    /// `force` bypasses the repeat interval but never interrupts playback.
    /// Errors only when the TTS command can't be launched.
    pub fn speak(&mut self, text: &str, force: bool) -> Result<SpeakOutcome> {
        if !self.config.enabled {
            return Ok(SpeakOutcome::Disabled);
        }
        let text = text.trim();
        if text.is_empty() {
            return Ok(SpeakOutcome::Empty);
        }
        if !force && self.gate.is_cooling_down(text) {
            return Ok(SpeakOutcome::Cooldown);
        }
        if self.is_speaking() {
            return Ok(SpeakOutcome::Busy);
        }

        self.gate.record(text);
        let args = render_args(
            &self.config.args,
            &self.config.language,
            self.config.rate,
            text,
        );
        self.current = Some(self.executor.spawn(&self.config.command, &args)?);
        Ok(SpeakOutcome::Started)
    }

    /// True while a phrase is playing. Reaps finished playback.
    pub fn is_speaking(&mut self) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };
        match current.is_finished() {
            Ok(false) => true,
            Ok(true) => {
                self.current = None;
                false
            }
            Err(e) => {
                eprintln!("handsign: speech failed: {e}");
                self.current = None;
                false
            }
        }
    }

    /// Abort the phrase in progress, if any.
    pub fn stop(&mut self) -> Result<()> {
        match self.current.take() {
            Some(mut current) => current.kill(),
            None => Ok(()),
        }
    }

    /// Block until the phrase in progress has finished.
    pub fn wait(&mut self) -> Result<()> {
        match self.current.take() {
            Some(mut current) => current.wait(),
            None => Ok(()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn interval(&self) -> Duration {
        self.gate.interval()
    }
}

/// Fill in `{lang}`, `{wpm}`, `{rate}` and `{text}` in an argument template.
///
/// `{wpm}` is the base espeak speed scaled by `rate`.
pub fn render_args(template: &[String], language: &str, rate: f32, text: &str) -> Vec<String> {
    let wpm = (defaults::BASE_WORDS_PER_MINUTE * rate).round().max(1.0) as u32;
    let wpm = wpm.to_string();
    let rate = rate.to_string();
    template
        .iter()
        .map(|arg| {
            arg.replace("{lang}", language)
                .replace("{wpm}", &wpm)
                .replace("{rate}", &rate)
                .replace("{text}", text)
        })
        .collect()
}
