//! Ordered pattern rules that turn finger states into a gesture role.
//!
//! Rules are checked top to bottom and the first match wins. Several rules
//! accept a second variant with a different thumb bit because the thumb
//! heuristic is the least reliable of the five. If nothing matches, the
//! number of open fingers decides, so every input resolves to some role.

use crate::hand::FingerStates;
use std::fmt;

/// Symbolic gesture slots referenced by the rules.
///
/// Which gesture identifier each role emits is configured separately
/// (see [`GestureRoles`](crate::gesture::GestureRoles)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureRole {
    /// All five fingers open.
    OpenPalm,
    /// Index and middle open.
    Peace,
    /// Index only.
    Pointing,
    /// Thumb only.
    ThumbsUp,
    /// Thumb or index together with pinky.
    Love,
    /// All fingers curled.
    Fist,
    /// Index, middle and ring open.
    Three,
    /// Pinky only.
    Pinky,
    /// Nothing else applied.
    Idle,
}

impl GestureRole {
    pub const ALL: [GestureRole; 9] = [
        GestureRole::OpenPalm,
        GestureRole::Peace,
        GestureRole::Pointing,
        GestureRole::ThumbsUp,
        GestureRole::Love,
        GestureRole::Fist,
        GestureRole::Three,
        GestureRole::Pinky,
        GestureRole::Idle,
    ];

    /// Key used for this role in the `[roles]` configuration table.
    pub fn config_key(&self) -> &'static str {
        match self {
            GestureRole::OpenPalm => "open_palm",
            GestureRole::Peace => "peace",
            GestureRole::Pointing => "pointing",
            GestureRole::ThumbsUp => "thumbs_up",
            GestureRole::Love => "love",
            GestureRole::Fist => "fist",
            GestureRole::Three => "three",
            GestureRole::Pinky => "pinky",
            GestureRole::Idle => "idle",
        }
    }
}

impl fmt::Display for GestureRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// How a role was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Exact match against rule number `rule` (1-based, in priority order).
    Pattern { rule: usize },
    /// No rule matched; decided by the number of open fingers.
    Fallback { open_count: usize },
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Pattern { rule } => write!(f, "rule {}", rule),
            MatchKind::Fallback { open_count } => write!(f, "fallback ({} open)", open_count),
        }
    }
}

/// One exact-match rule: any of `patterns` maps to `role`.
#[derive(Debug, Clone, Copy)]
pub struct PatternRule {
    pub role: GestureRole,
    pub patterns: &'static [FingerStates],
}

impl PatternRule {
    pub fn matches(&self, states: &FingerStates) -> bool {
        self.patterns.contains(states)
    }
}

/// Finger states from a 5-bit mask, thumb in the high bit: `0b01100` is index + middle.
const fn bits(mask: u8) -> FingerStates {
    FingerStates::new([
        mask & 0b10000 != 0,
        mask & 0b01000 != 0,
        mask & 0b00100 != 0,
        mask & 0b00010 != 0,
        mask & 0b00001 != 0,
    ])
}

/// Rules in priority order.
///
/// Rule 9 repeats the Love role with a thumb + index + pinky variant. It is
/// kept separate from rule 5 so that the acceptance set for ambiguous poses
/// stays exactly as tuned.
pub const PATTERN_RULES: [PatternRule; 9] = [
    PatternRule {
        role: GestureRole::OpenPalm,
        patterns: &[bits(0b11111)],
    },
    PatternRule {
        role: GestureRole::Peace,
        patterns: &[bits(0b01100), bits(0b11100)],
    },
    PatternRule {
        role: GestureRole::Pointing,
        patterns: &[bits(0b01000), bits(0b11000)],
    },
    PatternRule {
        role: GestureRole::ThumbsUp,
        patterns: &[bits(0b10000)],
    },
    PatternRule {
        role: GestureRole::Love,
        patterns: &[bits(0b10001), bits(0b01001)],
    },
    PatternRule {
        role: GestureRole::Fist,
        patterns: &[bits(0b00000)],
    },
    PatternRule {
        role: GestureRole::Three,
        patterns: &[bits(0b01110)],
    },
    PatternRule {
        role: GestureRole::Pinky,
        patterns: &[bits(0b00001)],
    },
    PatternRule {
        role: GestureRole::Love,
        patterns: &[bits(0b11001)],
    },
];

/// Picks the role for a finger-state vector.
pub fn classify(states: &FingerStates) -> (GestureRole, MatchKind) {
    let open_count = states.open_count();

    if let Some((i, rule)) = PATTERN_RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(states))
    {
        return (rule.role, MatchKind::Pattern { rule: i + 1 });
    }

    let role = match open_count {
        1 => GestureRole::Pointing,
        2 => GestureRole::Peace,
        5 => GestureRole::OpenPalm,
        _ => GestureRole::Idle,
    };
    (role, MatchKind::Fallback { open_count })
}
