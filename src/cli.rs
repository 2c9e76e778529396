//! Command-line interface for wortspiel.

use clap::{Parser, Subcommand};

use crate::game::Level;

/// Wortspiel - Terminal client for the German vocabulary trainer
#[derive(Parser, Debug)]
#[command(name = "wortspiel")]
#[command(about = "Hangman-style German vocabulary trainer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the lobby TUI (free play, placement exam, statistics)
    Lobby {
        /// Username to play as (overrides the config file)
        #[arg(short, long)]
        username: Option<String>,

        /// Word service base URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "wortspiel.toml")]
        config: std::path::PathBuf,

        /// Directory for placement attempts (platform default when unset)
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,
    },

    /// Jump straight into a free-play session
    Play {
        /// Difficulty level for the first rounds (a1, a2, b1)
        #[arg(short, long)]
        level: Option<Level>,

        /// Let the server pick words from the per-user weakness model
        #[arg(long)]
        adaptive: bool,

        /// Username to play as (overrides the config file)
        #[arg(short, long)]
        username: Option<String>,

        /// Word service base URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "wortspiel.toml")]
        config: std::path::PathBuf,

        /// Directory for placement attempts (platform default when unset)
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,
    },

    /// Start or resume the placement exam
    Placement {
        /// Username to play as (overrides the config file)
        #[arg(short, long)]
        username: Option<String>,

        /// Word service base URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "wortspiel.toml")]
        config: std::path::PathBuf,

        /// Directory for placement attempts (platform default when unset)
        #[arg(long)]
        data_dir: Option<std::path::PathBuf>,
    },

    /// Print statistics for the user and exit
    Stats {
        /// Username to report on (overrides the config file)
        #[arg(short, long)]
        username: Option<String>,

        /// Word service base URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Path to the configuration file
        #[arg(short, long, default_value = "wortspiel.toml")]
        config: std::path::PathBuf,
    },
}
