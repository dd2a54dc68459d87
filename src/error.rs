//! Error types for handsign.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandsignError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Unknown gesture '{label}' referenced by {key}")]
    UnknownGesture { key: String, label: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    // Landmark input errors
    #[error("Malformed landmark frame on line {line}: {message}")]
    PoseFormat { line: u64, message: String },

    #[error("Landmark tracker not found: {command}")]
    TrackerNotFound { command: String },

    #[error("Landmark tracker failed: {message}")]
    TrackerFailed { message: String },

    // Speech errors
    #[error("Speech command not found: {command}")]
    SpeechCommandNotFound { command: String },

    #[error("Speech command failed: {message}")]
    SpeechFailed { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, HandsignError>;
