//! Command-line interface for handsign
//!
//! Provides argument parsing using clap derive macros.

use crate::hand::FingerStates;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Hand gesture recognition with spoken responses
#[derive(Parser, Debug)]
#[command(
    name = "handsign",
    version,
    about = "Hand gesture recognition with spoken responses"
)]
pub struct Cli {
    /// Subcommand to execute (default: recognize gestures from the tracker)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: label changes, -vv: per-frame diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Read landmark frames (JSON lines) from a file instead of the tracker; `-` for stdin
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Smoothing window in frames
    #[arg(long, short = 'w', value_name = "N")]
    pub window: Option<usize>,

    /// Classify every Nth frame only
    #[arg(long, value_name = "N")]
    pub every: Option<u32>,

    /// Minimum time before the same phrase is spoken again. Examples: 3s, 1500ms
    #[arg(long, value_name = "DURATION", value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Speech language code (e.g., id, en)
    #[arg(long, short = 'l', value_name = "LANG")]
    pub language: Option<String>,

    /// Don't speak, only show the recognized gesture
    #[arg(long)]
    pub no_speech: bool,

    /// Print one JSON line per gesture change on stdout instead of the status line
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Parse a duration; a bare number means seconds.
fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|_| format!("invalid interval: {s}"));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a finger-state string such as 01100 (thumb, index, middle, ring, pinky)
    Classify {
        /// Five digits, 1 = open, thumb first
        fingers: FingerStates,
    },

    /// Show which hand shape produces which gesture
    Gestures,

    /// Print synthetic landmark frames for the given finger states (JSON lines)
    Synth {
        /// Finger-state strings, one hand shape per argument
        #[arg(required = true)]
        fingers: Vec<FingerStates>,

        /// Frames to emit per hand shape
        #[arg(long, short = 'n', value_name = "N", default_value = "10")]
        repeat: u32,

        /// Milliseconds between frame timestamps
        #[arg(long, value_name = "MS", default_value = "33")]
        frame_ms: u64,
    },

    /// View and manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate the configuration
    Check,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["handsign"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.input.is_none());
        assert!(cli.window.is_none());
        assert!(cli.every.is_none());
        assert!(cli.interval.is_none());
        assert!(cli.language.is_none());
        assert!(!cli.no_speech);
        assert!(!cli.json);
        assert!(!cli.no_color);
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_verbose_levels() {
        assert_eq!(Cli::try_parse_from(["handsign", "-v"]).unwrap().verbose, 1);
        assert_eq!(Cli::try_parse_from(["handsign", "-vv"]).unwrap().verbose, 2);
        assert_eq!(
            Cli::try_parse_from(["handsign", "-v", "-v"]).unwrap().verbose,
            2
        );
    }

    #[test]
    fn test_parse_run_options() {
        let cli = Cli::try_parse_from([
            "handsign",
            "--input",
            "-",
            "--window",
            "7",
            "--every",
            "3",
            "--interval",
            "1500ms",
            "--language",
            "en",
            "--no-speech",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("-")));
        assert_eq!(cli.window, Some(7));
        assert_eq!(cli.every, Some(3));
        assert_eq!(cli.interval, Some(Duration::from_millis(1500)));
        assert_eq!(cli.language.as_deref(), Some("en"));
        assert!(cli.no_speech);
        assert!(cli.json);
    }

    #[test]
    fn test_parse_interval_formats() {
        assert_eq!(parse_interval("3"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_interval("2.5"), Ok(Duration::from_millis(2500)));
        assert_eq!(parse_interval("3s"), Ok(Duration::from_secs(3)));
        assert_eq!(parse_interval("1m"), Ok(Duration::from_secs(60)));
        assert!(parse_interval("-1").is_err());
        assert!(parse_interval("1e20").is_err());
        assert!(parse_interval("inf").is_err());
        assert!(parse_interval("soon").is_err());
    }

    #[test]
    fn test_parse_classify() {
        let cli = Cli::try_parse_from(["handsign", "classify", "01100"]).unwrap();
        match cli.command {
            Some(Commands::Classify { fingers }) => assert_eq!(fingers.to_string(), "01100"),
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_parse_classify_rejects_bad_bits() {
        assert!(Cli::try_parse_from(["handsign", "classify", "0110"]).is_err());
        assert!(Cli::try_parse_from(["handsign", "classify", "01201"]).is_err());
    }

    #[test]
    fn test_parse_synth() {
        let cli =
            Cli::try_parse_from(["handsign", "synth", "11111", "00000", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::Synth {
                fingers,
                repeat,
                frame_ms,
            }) => {
                assert_eq!(fingers.len(), 2);
                assert_eq!(repeat, 3);
                assert_eq!(frame_ms, 33);
            }
            _ => panic!("Expected Synth command"),
        }
    }

    #[test]
    fn test_parse_synth_requires_fingers() {
        assert!(Cli::try_parse_from(["handsign", "synth"]).is_err());
    }

    #[test]
    fn test_parse_config_actions() {
        let cli = Cli::try_parse_from(["handsign", "config", "init", "--force"]).unwrap();
        match cli.command {
            Some(Commands::Config {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }

        let cli = Cli::try_parse_from(["handsign", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Check
            })
        ));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "handsign",
            "gestures",
            "--config",
            "/path/to/config.toml",
            "-q",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Gestures)));
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["handsign", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Completions { shell: Shell::Bash })
        ));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
