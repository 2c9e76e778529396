//! Wortspiel - Terminal client for the German vocabulary trainer.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use wortspiel::{
    ApiClient, AttemptStore, Cli, ClientConfig, Command, GameSettings, Launch, LobbyController,
    ProgressTracker, run_lobby,
};

/// Environment variable holding the API bearer token.
const TOKEN_ENV: &str = "WORTSPIEL_TOKEN";

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Lobby {
            username,
            server_url,
            config,
            data_dir,
        } => {
            run_tui_mode(
                Launch::Menu,
                GameSettings::new(),
                username,
                server_url,
                &config,
                data_dir,
            )
            .await
        }
        Command::Play {
            level,
            adaptive,
            username,
            server_url,
            config,
            data_dir,
        } => {
            let mut settings = GameSettings::new();
            if let Some(level) = level {
                settings.level = level;
            }
            settings.adaptive = adaptive;
            run_tui_mode(
                Launch::FreePlay,
                settings,
                username,
                server_url,
                &config,
                data_dir,
            )
            .await
        }
        Command::Placement {
            username,
            server_url,
            config,
            data_dir,
        } => {
            run_tui_mode(
                Launch::Placement,
                GameSettings::new(),
                username,
                server_url,
                &config,
                data_dir,
            )
            .await
        }
        Command::Stats {
            username,
            server_url,
            config,
        } => print_stats(username, server_url, &config).await,
    }
}

/// Runs one of the TUI modes.
async fn run_tui_mode(
    launch: Launch,
    settings: GameSettings,
    username: Option<String>,
    server_url: Option<String>,
    config_path: &Path,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    initialize_tui_tracing()?;

    let config = ClientConfig::load_or_default(config_path)?;
    let (api, username) = connect(username, server_url, &config)?;
    let store = match data_dir.or_else(|| config.data_dir().clone()) {
        Some(dir) => AttemptStore::new(&dir)?,
        None => AttemptStore::open_default()?,
    };

    let mut controller = LobbyController::new(api, store, username, settings);
    run_lobby(&mut controller, launch).await
}

/// Fetches and prints statistics without entering the TUI.
async fn print_stats(
    username: Option<String>,
    server_url: Option<String>,
    config_path: &Path,
) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = ClientConfig::load_or_default(config_path)?;
    let (api, username) = connect(username, server_url, &config)?;
    let mut tracker = ProgressTracker::new();
    tracker.refresh(&api).await?;

    let Some(stats) = tracker.stats() else {
        println!("No statistics available for {username}.");
        return Ok(());
    };
    println!("Statistics for {username}");
    println!("  Wins:         {}", stats.wins());
    println!("  Losses:       {}", stats.losses());
    println!("  Win rate:     {:.1}%", stats.win_rate());
    println!("  Hint credits: {}", stats.hint_credits());
    if !stats.failed_words().is_empty() {
        println!("  Words to review: {}", stats.failed_words().join(", "));
    }
    if !stats.problem_letters().is_empty() {
        let letters: Vec<String> = stats
            .problem_letters()
            .iter()
            .map(char::to_string)
            .collect();
        println!("  Letters you miss most: {}", letters.join(", "));
    }
    Ok(())
}

/// Resolves connection details from flags, the config file, and the
/// environment.
#[instrument(skip_all)]
fn connect(
    username: Option<String>,
    server_url: Option<String>,
    config: &ClientConfig,
) -> Result<(ApiClient, String)> {
    let username = username
        .or_else(|| config.username().clone())
        .context("no username given; pass --username or set it in the config file")?;
    let server_url = server_url.unwrap_or_else(|| config.server_url().clone());
    let token = std::env::var(TOKEN_ENV).ok();
    info!(server_url = %server_url, username = %username, "Connecting to word service");
    let api = ApiClient::new(&server_url, &username, token)?;
    Ok((api, username))
}

/// Logs to a file so the TUI drawing is not disturbed.
fn initialize_tui_tracing() -> Result<()> {
    let log_file = std::fs::File::create("wortspiel.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}
