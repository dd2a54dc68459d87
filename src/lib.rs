//! handsign - Hand gesture recognition with spoken responses
//!
//! Turns hand landmarks from an external tracker into gesture labels,
//! smooths them over a short window and speaks a phrase per gesture.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod gesture;
pub mod hand;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod speech;

// Composition root
#[cfg(feature = "cli")]
pub mod app;

// Core traits (source → recognize → sink)
pub use pipeline::sink::{CollectorSink, GestureSink, JsonSink, SpeechSink};
pub use source::PoseSource;
pub use speech::{CommandExecutor, SystemCommandExecutor};

// Recognition
pub use gesture::{GestureLabel, GestureRecognizer, GestureRole, Recognition};
pub use hand::{FingerStates, HandPose, Keypoint, extract};

// Pipeline
pub use pipeline::orchestrator::{Pipeline, PipelineConfig, PipelineHandle};

// Error handling
pub use error::{HandsignError, Result};

// Config
pub use config::Config;

// Station framework (for advanced users)
pub use pipeline::error::{ErrorReporter, StationError};
pub use pipeline::station::Station;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_has_hash_suffix_only_with_git() {
        let ver = version_string();
        match option_env!("GIT_HASH").filter(|h| !h.is_empty()) {
            Some(hash) => assert_eq!(ver, format!("{}+{}", env!("CARGO_PKG_VERSION"), hash)),
            None => assert_eq!(ver, env!("CARGO_PKG_VERSION")),
        }
    }
}
