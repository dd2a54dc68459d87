//! External landmark tracker run as a child process.
//!
//! The tracker owns the camera and the hand model. It writes one JSON frame
//! per line on stdout; confidence thresholds are handed over as flags and
//! never interpreted here.

use crate::config::TrackerConfig;
use crate::error::{HandsignError, Result};
use crate::source::PoseSource;
use crate::source::frame::PoseFrame;
use crate::source::jsonl::JsonLinesSource;
use std::io::BufReader;
use std::process::{Child, ChildStdout, Command, Stdio};

pub struct TrackerProcess {
    command: String,
    child: Child,
    frames: JsonLinesSource<BufReader<ChildStdout>>,
}

impl TrackerProcess {
    /// Launch the configured tracker command.
    pub fn spawn(config: &TrackerConfig) -> Result<Self> {
        let command = config
            .command
            .clone()
            .ok_or_else(|| HandsignError::ConfigInvalidValue {
                key: "tracker.command".to_string(),
                message: "no landmark tracker configured; set it or pass --input".to_string(),
            })?;

        let mut child = Command::new(&command)
            .args(tracker_args(config))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HandsignError::TrackerNotFound {
                        command: command.clone(),
                    }
                } else {
                    HandsignError::TrackerFailed {
                        message: format!("Failed to start {}: {}", command, e),
                    }
                }
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HandsignError::TrackerFailed {
                message: "tracker stdout not captured".to_string(),
            })?;

        Ok(Self {
            command,
            child,
            frames: JsonLinesSource::new(BufReader::new(stdout)),
        })
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

/// Configured arguments followed by the pass-through detection flags.
pub fn tracker_args(config: &TrackerConfig) -> Vec<String> {
    let mut args = config.args.clone();
    args.extend([
        "--min-detection-confidence".to_string(),
        config.detection_confidence.to_string(),
        "--min-tracking-confidence".to_string(),
        config.tracking_confidence.to_string(),
        "--max-num-hands".to_string(),
        config.max_hands.to_string(),
    ]);
    args
}

impl PoseSource for TrackerProcess {
    fn next_frame(&mut self) -> Result<Option<PoseFrame>> {
        match self.frames.next_frame()? {
            Some(frame) => Ok(Some(frame)),
            None => {
                // stdout closed: the tracker is gone
                let status = self.child.wait()?;
                if status.success() {
                    Ok(None)
                } else {
                    Err(HandsignError::TrackerFailed {
                        message: format!("{} exited with {}", self.command, status),
                    })
                }
            }
        }
    }

    /// The stream ends when the tracker exits.
    fn is_finite(&self) -> bool {
        true
    }
}

impl Drop for TrackerProcess {
    fn drop(&mut self) {
        if let Ok(None) = self.child.try_wait() {
            if let Err(e) = self.child.kill() {
                eprintln!("handsign: failed to stop tracker {}: {e}", self.command);
            }
            if let Err(e) = self.child.wait() {
                eprintln!("handsign: failed to reap tracker {}: {e}", self.command);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(command: &str, args: &[&str]) -> TrackerConfig {
        TrackerConfig {
            command: Some(command.to_string()),
            args: args.iter().map(|s| s.to_string()).collect(),
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn test_args_append_confidence_flags() {
        let args = tracker_args(&config("tracker", &["--camera", "0"]));
        assert_eq!(
            args,
            vec![
                "--camera",
                "0",
                "--min-detection-confidence",
                "0.7",
                "--min-tracking-confidence",
                "0.5",
                "--max-num-hands",
                "1",
            ]
        );
    }

    #[test]
    fn test_no_command_configured() {
        let result = TrackerProcess::spawn(&TrackerConfig::default());
        assert!(matches!(
            result,
            Err(HandsignError::ConfigInvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_tracker_binary() {
        let result = TrackerProcess::spawn(&config("handsign-no-such-tracker", &[]));
        assert!(matches!(result, Err(HandsignError::TrackerNotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_tracker_stdout() {
        // Appended flags land in $0.. and are ignored by the script
        let mut tracker = TrackerProcess::spawn(&config(
            "sh",
            &["-c", r#"echo '{"hands": [], "timestamp_ms": 7}'"#],
        ))
        .unwrap();

        let frame = tracker.next_frame().unwrap().unwrap();
        assert_eq!(frame.timestamp_ms, Some(7));
        assert_eq!(tracker.next_frame().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_tracker_failure_status() {
        let mut tracker = TrackerProcess::spawn(&config("sh", &["-c", "exit 3"])).unwrap();
        let err = tracker.next_frame().unwrap_err();
        assert!(matches!(err, HandsignError::TrackerFailed { .. }));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_drop_stops_and_reaps_running_tracker() {
        let tracker = TrackerProcess::spawn(&config("sh", &["-c", "sleep 30"])).unwrap();
        let pid = tracker.child.id();
        let started = std::time::Instant::now();

        drop(tracker);

        assert!(started.elapsed() < std::time::Duration::from_secs(5));
        // Killed and waited on: no zombie left behind
        assert!(!std::path::Path::new(&format!("/proc/{pid}")).exists());
    }
}
