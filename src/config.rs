use crate::defaults;
use crate::error::{HandsignError, Result};
use crate::gesture::{GestureRole, GestureRoles, RecognizerConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub recognizer: RecognitionConfig,
    pub tracker: TrackerConfig,
    pub speech: SpeechConfig,
    pub roles: RolesConfig,
    /// Gesture identifier → display and speech metadata.
    ///
    /// Providing any `[gestures.*]` table replaces the whole default set.
    pub gestures: BTreeMap<String, GestureMeta>,
}

/// Recognition tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecognitionConfig {
    pub smoothing_window: usize,
    pub thumb_margin: f32,
    pub process_every_n_frames: u32,
}

/// External landmark tracker settings.
///
/// The confidence values are forwarded to the tracker command as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub args: Vec<String>,
    pub detection_confidence: f32,
    pub tracking_confidence: f32,
    pub max_hands: u32,
}

/// Spoken response settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub command: String,
    /// Argument template; `{lang}`, `{wpm}`, `{rate}` and `{text}` are substituted.
    pub args: Vec<String>,
    pub language: String,
    pub interval_secs: f64,
    pub rate: f32,
}

/// Gesture identifier emitted for each rule role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RolesConfig {
    pub open_palm: String,
    pub peace: String,
    pub pointing: String,
    pub thumbs_up: String,
    pub love: String,
    pub fist: String,
    pub three: String,
    pub pinky: String,
    pub idle: String,
}

/// What to say and show for one gesture
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureMeta {
    pub text: String,
    /// RGB
    #[serde(default = "default_color")]
    pub color: [u8; 3],
    #[serde(default)]
    pub icon: String,
}

fn default_color() -> [u8; 3] {
    [255, 255, 255]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recognizer: RecognitionConfig::default(),
            tracker: TrackerConfig::default(),
            speech: SpeechConfig::default(),
            roles: RolesConfig::default(),
            gestures: default_gestures(),
        }
    }
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            smoothing_window: defaults::SMOOTHING_WINDOW,
            thumb_margin: defaults::THUMB_OPEN_MARGIN,
            process_every_n_frames: defaults::PROCESS_EVERY_N_FRAMES,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            detection_confidence: defaults::DETECTION_CONFIDENCE,
            tracking_confidence: defaults::TRACKING_CONFIDENCE,
            max_hands: defaults::MAX_HANDS,
        }
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: defaults::SPEECH_COMMAND.to_string(),
            args: ["-v", "{lang}", "-s", "{wpm}", "{text}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            language: defaults::SPEECH_LANGUAGE.to_string(),
            interval_secs: defaults::SPEAK_INTERVAL_SECS,
            rate: defaults::SPEECH_RATE,
        }
    }
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            open_palm: "terima".to_string(),
            peace: "perkenalan".to_string(),
            pointing: "halo".to_string(),
            thumbs_up: "baik".to_string(),
            love: "love".to_string(),
            fist: "semangat".to_string(),
            three: "ok".to_string(),
            pinky: "salam".to_string(),
            idle: defaults::IDLE_GESTURE.to_string(),
        }
    }
}

impl RolesConfig {
    /// Gesture identifier bound to `role`.
    pub fn get(&self, role: GestureRole) -> &str {
        match role {
            GestureRole::OpenPalm => &self.open_palm,
            GestureRole::Peace => &self.peace,
            GestureRole::Pointing => &self.pointing,
            GestureRole::ThumbsUp => &self.thumbs_up,
            GestureRole::Love => &self.love,
            GestureRole::Fist => &self.fist,
            GestureRole::Three => &self.three,
            GestureRole::Pinky => &self.pinky,
            GestureRole::Idle => &self.idle,
        }
    }
}

/// The built-in gesture set with Indonesian phrases.
pub fn default_gestures() -> BTreeMap<String, GestureMeta> {
    let table: [(&str, &str, [u8; 3], &str); 10] = [
        ("halo", "Halo! Senang bertemu denganmu.", [0, 255, 0], "👋"),
        (
            "perkenalan",
            "Perkenalkan, saya adalah Khalifa.",
            [0, 255, 255],
            "✌️",
        ),
        (
            "salam",
            "Salam kenal ya, semoga harimu menyenangkan.",
            [255, 0, 255],
            "🤝",
        ),
        (
            "terima",
            "Terimakasih banyak! Sampai jumpa lagi.",
            [255, 165, 0],
            "🖐️",
        ),
        (
            "baik",
            "Baik, saya mengerti. Siap dilaksanakan!",
            [255, 255, 0],
            "👍",
        ),
        (
            "tidak",
            "Maaf, saya tidak setuju atau itu salah.",
            [255, 0, 0],
            "👎",
        ),
        ("semangat", "Tetap semangat! Kamu pasti bisa!", [139, 0, 0], "✊"),
        ("ok", "Oke sip! Semuanya aman.", [255, 105, 180], "👌"),
        ("love", "I love you! Sayang kamu.", [255, 20, 147], "🤟"),
        ("diam", "Mohon tenang sejenak.", [128, 128, 128], "🤫"),
    ];

    table
        .into_iter()
        .map(|(id, text, color, icon)| {
            (
                id.to_string(),
                GestureMeta {
                    text: text.to_string(),
                    color,
                    icon: icon.to_string(),
                },
            )
        })
        .collect()
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HandsignError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                HandsignError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(HandsignError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - HANDSIGN_SMOOTHING_WINDOW → recognizer.smoothing_window
    /// - HANDSIGN_SPEECH_LANGUAGE → speech.language
    /// - HANDSIGN_SPEECH_COMMAND → speech.command
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(window) = std::env::var("HANDSIGN_SMOOTHING_WINDOW") {
            if !window.is_empty() {
                match window.parse() {
                    Ok(n) => self.recognizer.smoothing_window = n,
                    Err(_) => eprintln!(
                        "handsign: ignoring HANDSIGN_SMOOTHING_WINDOW={window:?}: not a number"
                    ),
                }
            }
        }

        if let Ok(language) = std::env::var("HANDSIGN_SPEECH_LANGUAGE") {
            if !language.is_empty() {
                self.speech.language = language;
            }
        }

        if let Ok(command) = std::env::var("HANDSIGN_SPEECH_COMMAND") {
            if !command.is_empty() {
                self.speech.command = command;
            }
        }

        self
    }

    /// Check value ranges and that every role points at a configured gesture.
    pub fn validate(&self) -> Result<()> {
        if self.recognizer.smoothing_window == 0 {
            return Err(invalid("recognizer.smoothing_window", "must be at least 1"));
        }
        if self.recognizer.smoothing_window > defaults::MAX_SMOOTHING_WINDOW {
            return Err(invalid(
                "recognizer.smoothing_window",
                &format!("must be at most {}", defaults::MAX_SMOOTHING_WINDOW),
            ));
        }
        if !(self.recognizer.thumb_margin > 0.0) {
            return Err(invalid("recognizer.thumb_margin", "must be positive"));
        }
        if self.recognizer.process_every_n_frames == 0 {
            return Err(invalid(
                "recognizer.process_every_n_frames",
                "must be at least 1",
            ));
        }
        for (key, value) in [
            ("tracker.detection_confidence", self.tracker.detection_confidence),
            ("tracker.tracking_confidence", self.tracker.tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(key, "must be between 0.0 and 1.0"));
            }
        }
        if Duration::try_from_secs_f64(self.speech.interval_secs).is_err() {
            return Err(invalid(
                "speech.interval_secs",
                "must be a non-negative number of seconds",
            ));
        }
        if !(self.speech.rate > 0.0) {
            return Err(invalid("speech.rate", "must be positive"));
        }
        if self.gestures.is_empty() {
            return Err(invalid("gestures", "at least one gesture is required"));
        }
        self.gesture_roles().map(|_| ())
    }

    /// Role bindings resolved against the configured gesture set.
    pub fn gesture_roles(&self) -> Result<GestureRoles> {
        GestureRoles::resolve(&self.roles, |id| self.gestures.contains_key(id))
    }

    pub fn recognizer_config(&self) -> RecognizerConfig {
        RecognizerConfig {
            smoothing_window: self.recognizer.smoothing_window,
            thumb_margin: self.recognizer.thumb_margin,
        }
    }

    pub fn gesture(&self, id: &str) -> Option<&GestureMeta> {
        self.gestures.get(id)
    }

    /// Serialize to TOML (used by `config show` and `config init`).
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/handsign/config.toml on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("handsign").join("config.toml"))
    }
}

fn invalid(key: &str, message: &str) -> HandsignError {
    HandsignError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
