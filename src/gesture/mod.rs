//! Gesture classification: pattern rules, role binding and smoothing.

pub mod label;
pub mod recognizer;
pub mod roles;
pub mod rules;
pub mod smoother;

pub use label::GestureLabel;
pub use recognizer::{GestureRecognizer, RawClassification, Recognition, RecognizerConfig};
pub use roles::GestureRoles;
pub use rules::{GestureRole, MatchKind, PATTERN_RULES, PatternRule};
pub use smoother::{LabelHistory, MajoritySmoother};
