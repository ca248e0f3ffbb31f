//! Application orchestration and command routing.
//!
//! Handles command-line argument parsing and delegates to appropriate command handlers.

use crate::commands;
use crate::logging;
use anyhow::anyhow;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::process;

/// Checks if setup is needed (version mismatch or missing config) and runs setup if required.
///
/// This is called early in the startup sequence, before command handling.
/// It checks:
/// 1. If config file doesn't exist, writes the default config
/// 2. If config version is older than app version, rewrites defaults and logs the migration
/// 3. If config version matches app version, does nothing
fn check_and_run_setup() -> Result<(), anyhow::Error> {
    let config_path = crate::config::config_path()?;

    match crate::setup::version::check_setup_needed(&config_path)? {
        Some(old_version) => {
            tracing::info!(
                "Setup needed - migrating from version {} to {}",
                old_version,
                env!("CARGO_PKG_VERSION")
            );
            crate::setup::run_setup().map_err(|e| {
                tracing::error!("Setup failed: {e}");
                anyhow!("Setup failed: {e}")
            })?;
            tracing::info!(
                "Setup completed successfully - migrated to version {}",
                env!("CARGO_PKG_VERSION")
            );
        }
        None => {
            tracing::debug!("Config version up to date ({})", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

/// A terminal voice-cloning studio demo with animated waveform visualization
#[derive(Parser)]
#[command(name = "voxtwin")]
#[command(version)]
#[command(about = "\n\n ┌┐┌┐\n └┘└┘ voxtwin")]
#[command(
    long_about = "\n\n ┌┐┌┐\n └┘└┘ voxtwin\n\nA terminal voice-cloning studio demo: animated waveform panels for the\noriginal and cloned voice samples, customization sliders, and a similarity\nmeter. Everything on screen is decorative - no audio is processed.\n\nDEFAULT COMMAND:\n    If no command is specified, 'demo' is used by default.\n\nEXAMPLES:\n    # Run the studio demo\n    $ voxtwin\n    $ voxtwin demo\n\n    # Toggle cloned sample playback from another terminal\n    $ pkill -USR1 voxtwin\n\n    # Edit configuration file\n    $ voxtwin config\n\n    # Show recent log output\n    $ voxtwin logs"
)]
#[command(
    after_help = "CONFIGURATION:\n    Config file:        ~/.config/voxtwin/voxtwin.toml\n    Logs:               ~/.local/state/voxtwin/voxtwin.log.*\n\nFor more information, visit: https://github.com/kristoferlund/voxtwin"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive studio demo (default)
    ///
    /// Press 1/2 to play/pause the sample panels, Tab to select a slider,
    /// Left/Right to adjust it, 'g' to generate a preview, 'q' to quit.
    #[command(visible_alias = "d")]
    Demo,

    /// Edit configuration file
    ///
    /// Opens the configuration file in your preferred editor ($EDITOR,
    /// falling back to nano, then vi).
    Config,

    /// Show recent logs
    ///
    /// Display the last 50 lines of the most recent log file.
    /// Useful for troubleshooting issues.
    Logs,

    /// Generate shell completion script
    ///
    /// Generate completion script for your shell. Save the output to your
    /// shell's completion directory or source it directly.
    ///
    /// Examples:
    ///   voxtwin completions bash > voxtwin.bash
    ///   voxtwin completions zsh > _voxtwin
    ///   voxtwin completions fish > voxtwin.fish
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Runs the main application based on command-line arguments.
///
/// # Exit Codes
/// - 0: Success
/// - 1: General error
/// - 2: Usage error (invalid arguments)
///
/// # Errors
/// - If setup fails
/// - If logging initialization fails
/// - If command execution fails
pub async fn run() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Handle commands that don't need logging or config setup
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            generate(*shell, &mut Cli::command(), "voxtwin", &mut io::stdout());
            return Ok(());
        }
        Some(Commands::Logs) => {
            return match commands::handle_logs() {
                Ok(()) => Ok(()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            };
        }
        _ => {}
    }

    // Initialize logging for all other commands
    logging::init_logging()?;

    // Check if setup is needed (version check or missing config)
    check_and_run_setup()?;

    // Route to appropriate command handler
    match cli.command {
        None | Some(Commands::Demo) => {
            commands::handle_demo().await?;
        }
        Some(Commands::Config) => {
            commands::handle_config()?;
        }
        Some(Commands::Completions { .. }) | Some(Commands::Logs) => {
            unreachable!("These commands are handled earlier")
        }
    }

    Ok(())
}
