//! CLI module — Clap argument parser, input prompter, menu session,
//! output helpers, and command implementations.

pub mod commands;
pub mod output;
pub mod prompt;
pub mod session;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;

/// burnnote CLI: self-destructing secret messages.
#[derive(Parser)]
#[command(
    name = "burnnote",
    about = "Self-destructing, password-protected secret messages",
    version
)]
pub struct Cli {
    /// Subcommand to run (default: shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory containing .burnnote.toml (default: current directory)
    #[arg(long, env = "BURNNOTE_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start an interactive session with an empty in-memory store
    Shell,

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the directory to read `.burnnote.toml` from.
pub fn config_dir(cli: &Cli) -> Result<PathBuf> {
    match &cli.config_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Load settings for this invocation.
pub fn load_settings(cli: &Cli) -> Result<Settings> {
    Settings::load(&config_dir(cli)?)
}
