use handsign::HandsignError;
use handsign::config::Config;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn default_config_survives_toml_round_trip() {
    let file = write_config(&Config::default().to_toml().unwrap());
    let loaded = Config::load(file.path()).unwrap();
    assert_eq!(loaded, Config::default());
    loaded.validate().unwrap();
}

#[test]
fn partial_config_keeps_other_defaults() {
    let file = write_config(
        r#"
[speech]
language = "en"
interval_secs = 1.5
"#,
    );
    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.speech.language, "en");
    assert_eq!(config.speech.interval_secs, 1.5);
    assert_eq!(config.recognizer, Config::default().recognizer);
    assert_eq!(config.gestures.len(), 10);
}

#[test]
fn role_pointing_at_missing_gesture_is_rejected() {
    let file = write_config(
        r#"
[roles]
fist = "missing"
"#,
    );
    let config = Config::load(file.path()).unwrap();
    match config.validate() {
        Err(HandsignError::UnknownGesture { key, label }) => {
            assert_eq!(key, "roles.fist");
            assert_eq!(label, "missing");
        }
        other => panic!("expected UnknownGesture, got {other:?}"),
    }
}

#[test]
fn invalid_toml_is_an_error_not_defaults() {
    let file = write_config("[recognizer\nsmoothing_window = 3");
    assert!(matches!(
        Config::load_or_default(file.path()),
        Err(HandsignError::Config(_))
    ));
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, Config::default());
}
