use anyhow::Result;
use clap::{CommandFactory, Parser};
use handsign::app::{RunOptions, run_command};
use handsign::cli::{Cli, Commands, ConfigAction};
use handsign::config::Config;
use handsign::gesture::GestureRecognizer;
use handsign::hand::FingerStates;
use handsign::hand::synthetic::pose_from_states;
use handsign::output::format_gesture_guide;
use handsign::source::PoseFrame;
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref())?;
            if cli.verbose >= 1 && !cli.quiet {
                eprintln!("handsign {}", handsign::version_string());
            }
            let options = RunOptions {
                input: cli.input,
                window: cli.window,
                every: cli.every,
                interval: cli.interval,
                language: cli.language,
                no_speech: cli.no_speech,
                json: cli.json,
                color,
                quiet: cli.quiet,
                verbosity: cli.verbose,
            };
            run_command(config, options).await?;
        }
        Some(Commands::Classify { fingers }) => {
            let config = load_config(cli.config.as_deref())?;
            classify(&config, fingers)?;
        }
        Some(Commands::Gestures) => {
            let config = load_config(cli.config.as_deref())?;
            let color = !cli.no_color && std::io::stdout().is_terminal();
            print!("{}", format_gesture_guide(&config, color));
        }
        Some(Commands::Synth {
            fingers,
            repeat,
            frame_ms,
        }) => {
            print_synthetic_frames(&fingers, repeat, frame_ms)?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "handsign",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/handsign/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else if let Some(default_path) = Config::default_path() {
        Config::load_or_default(&default_path)?
    } else {
        Config::default()
    };

    Ok(config.with_env_overrides())
}

fn config_path(custom_path: Option<&Path>) -> Result<PathBuf> {
    custom_path
        .map(PathBuf::from)
        .or_else(Config::default_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine the configuration directory"))
}

/// Print the label, role and matching rule for a finger-state string.
fn classify(config: &Config, fingers: FingerStates) -> Result<()> {
    let recognizer = GestureRecognizer::new(config.recognizer_config(), config.gesture_roles()?);
    let raw = recognizer.classify_states(fingers);

    let label = if std::io::stdout().is_terminal() {
        raw.label.bold().to_string()
    } else {
        raw.label.to_string()
    };
    println!("{}  {} ({}, {})", fingers, label, raw.role, raw.matched);

    if let Some(meta) = config.gesture(raw.label.as_str()) {
        println!("  \"{}\"", meta.text);
    }
    Ok(())
}

/// Emit `repeat` frames per hand shape as JSON lines on stdout.
fn print_synthetic_frames(fingers: &[FingerStates], repeat: u32, frame_ms: u64) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut timestamp_ms = 0;

    for states in fingers {
        let pose = pose_from_states(*states);
        for _ in 0..repeat {
            let frame = PoseFrame::with_pose(&pose).at(timestamp_ms);
            writeln!(out, "{}", frame.to_json_line()?)?;
            timestamp_ms += frame_ms;
        }
    }
    out.flush()?;
    Ok(())
}

/// Handle configuration commands.
fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(custom_path)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let path = config_path(custom_path)?;
            let note = if path.exists() { "" } else { " (not created yet)" };
            println!("{}{}", path.display(), note);
        }
        ConfigAction::Init { force } => {
            let path = config_path(custom_path)?;
            if path.exists() && !force {
                eprintln!(
                    "{} {} already exists (use --force to overwrite)",
                    "Error:".red(),
                    path.display()
                );
                std::process::exit(1);
            }
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            std::fs::write(&path, Config::default().to_toml()?)?;
            println!("Wrote default configuration to {}", path.display());
        }
        ConfigAction::Check => {
            let config = load_config(custom_path)?;
            match config.validate() {
                Ok(()) => println!("{} configuration is valid", "OK".green()),
                Err(e) => {
                    eprintln!("{} {}", "Error:".red(), e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
