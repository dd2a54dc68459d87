//! Gesture identifiers.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Symbolic gesture identifier such as `"halo"` or `"semangat"`.
///
/// Identity is the string itself; the set of valid identifiers comes from
/// configuration. Cloning is cheap so labels can be handed to other threads
/// as immutable snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureLabel(Arc<str>);

impl GestureLabel {
    pub fn new(id: &str) -> Self {
        Self(Arc::from(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GestureLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for GestureLabel {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for GestureLabel {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for GestureLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
