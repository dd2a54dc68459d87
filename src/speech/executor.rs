//! Testable launching of the external text-to-speech command.
//!
//! Playback runs as a child process. `CommandExecutor` starts it and hands
//! back an `Utterance` the engine can poll or kill, so the engine never
//! blocks and can be exercised without a TTS tool installed.

use crate::error::{HandsignError, Result};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One running playback.
pub trait Utterance: Send {
    /// Non-blocking. `Ok(true)` once playback has ended successfully.
    fn is_finished(&mut self) -> Result<bool>;

    /// Block until playback ends.
    fn wait(&mut self) -> Result<()>;

    /// Abort playback.
    fn kill(&mut self) -> Result<()>;
}

/// Trait for starting system commands.
///
/// Object-safe, Send + Sync so the engine can hold it behind an `Arc`.
pub trait CommandExecutor: Send + Sync {
    /// Start `command` with `args` without waiting for it.
    fn spawn(&self, command: &str, args: &[String]) -> Result<Box<dyn Utterance>>;
}

/// Production executor using std::process::Command.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for SystemCommandExecutor {
    fn spawn(&self, command: &str, args: &[String]) -> Result<Box<dyn Utterance>> {
        let child = Command::new(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    HandsignError::SpeechCommandNotFound {
                        command: command.to_string(),
                    }
                } else {
                    HandsignError::SpeechFailed {
                        message: format!("Failed to execute {}: {}", command, e),
                    }
                }
            })?;

        Ok(Box::new(ChildUtterance {
            command: command.to_string(),
            child,
        }))
    }
}

struct ChildUtterance {
    command: String,
    child: Child,
}

impl ChildUtterance {
    fn check(&self, status: std::process::ExitStatus) -> Result<()> {
        if status.success() {
            Ok(())
        } else {
            Err(HandsignError::SpeechFailed {
                message: format!("{} failed with status {}", self.command, status),
            })
        }
    }
}

impl Utterance for ChildUtterance {
    fn is_finished(&mut self) -> Result<bool> {
        match self.child.try_wait()? {
            Some(status) => self.check(status).map(|_| true),
            None => Ok(false),
        }
    }

    fn wait(&mut self) -> Result<()> {
        let status = self.child.wait()?;
        self.check(status)
    }

    fn kill(&mut self) -> Result<()> {
        // Already exited is fine
        if self.child.try_wait()?.is_none() {
            self.child.kill()?;
            self.child.wait()?;
        }
        Ok(())
    }
}

/// Records every invocation instead of running anything.
///
/// By default utterances finish immediately. A `holding()` executor keeps
/// them running until `release()` is called.
#[derive(Debug, Clone, Default)]
pub struct MockCommandExecutor {
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    released: Arc<AtomicBool>,
    hold: bool,
    fail: bool,
}

impl MockCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding() -> Self {
        Self {
            hold: true,
            ..Self::default()
        }
    }

    /// Every spawn returns a `SpeechCommandNotFound` error (still recorded).
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Lets every held utterance finish.
    pub fn release(&self) {
        self.released.store(true, Ordering::SeqCst);
    }

    /// Snapshot of recorded `(command, args)` pairs.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Just the spoken texts, assuming the text is the last argument.
    pub fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(_, args)| args.last().cloned())
            .collect()
    }
}

impl CommandExecutor for MockCommandExecutor {
    fn spawn(&self, command: &str, args: &[String]) -> Result<Box<dyn Utterance>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((command.to_string(), args.to_vec()));
        }
        if self.fail {
            return Err(HandsignError::SpeechCommandNotFound {
                command: command.to_string(),
            });
        }
        Ok(Box::new(MockUtterance {
            released: if self.hold {
                Arc::clone(&self.released)
            } else {
                Arc::new(AtomicBool::new(true))
            },
            killed: false,
        }))
    }
}

struct MockUtterance {
    released: Arc<AtomicBool>,
    killed: bool,
}

impl Utterance for MockUtterance {
    fn is_finished(&mut self) -> Result<bool> {
        Ok(self.killed || self.released.load(Ordering::SeqCst))
    }

    fn wait(&mut self) -> Result<()> {
        while !self.is_finished()? {
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        Ok(())
    }

    fn kill(&mut self) -> Result<()> {
        self.killed = true;
        Ok(())
    }
}
