//! Binding of rule roles to configured gesture identifiers.

use crate::config::RolesConfig;
use crate::error::{HandsignError, Result};
use crate::gesture::label::GestureLabel;
use crate::gesture::rules::GestureRole;

/// The gesture label emitted for each rule role.
///
/// Built once at startup and checked against the configured gesture set, so
/// the recognizer can only ever emit a known identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureRoles {
    labels: [GestureLabel; 9],
}

impl GestureRoles {
    /// Resolves every role in `roles`, failing on identifiers `is_known` rejects.
    pub fn resolve(roles: &RolesConfig, is_known: impl Fn(&str) -> bool) -> Result<Self> {
        for role in GestureRole::ALL {
            let id = roles.get(role);
            if !is_known(id) {
                return Err(HandsignError::UnknownGesture {
                    key: format!("roles.{}", role.config_key()),
                    label: id.to_string(),
                });
            }
        }
        Ok(Self {
            labels: GestureRole::ALL.map(|role| GestureLabel::new(roles.get(role))),
        })
    }

    pub fn label(&self, role: GestureRole) -> &GestureLabel {
        &self.labels[Self::slot(role)]
    }

    fn slot(role: GestureRole) -> usize {
        match role {
            GestureRole::OpenPalm => 0,
            GestureRole::Peace => 1,
            GestureRole::Pointing => 2,
            GestureRole::ThumbsUp => 3,
            GestureRole::Love => 4,
            GestureRole::Fist => 5,
            GestureRole::Three => 6,
            GestureRole::Pinky => 7,
            GestureRole::Idle => 8,
        }
    }
}

impl Default for GestureRoles {
    fn default() -> Self {
        let roles = RolesConfig::default();
        Self {
            labels: GestureRole::ALL.map(|role| GestureLabel::new(roles.get(role))),
        }
    }
}
