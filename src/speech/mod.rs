//! Spoken responses through an external text-to-speech command.

pub mod engine;
pub mod executor;
pub mod gate;

pub use engine::{SpeakOutcome, SpeechEngine, render_args};
pub use executor::{CommandExecutor, MockCommandExecutor, SystemCommandExecutor, Utterance};
pub use gate::SpeechGate;
