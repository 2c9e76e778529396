//! Lobby system: multi-screen TUI for free play, placement, and statistics.

mod controller;
mod screen;
mod screens;
mod settings;

use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, instrument};

pub use controller::{Launch, LobbyController};
pub use screen::{Screen, ScreenTransition};
pub use settings::GameSettings;

/// Sets up the terminal, runs the lobby, and restores the terminal on exit.
///
/// # Errors
///
/// Returns an error when the terminal cannot be prepared or the event loop
/// fails. The terminal is restored before the error propagates.
#[instrument(skip(controller))]
pub async fn run_lobby(controller: &mut LobbyController, launch: Launch) -> Result<()> {
    info!("Entering the terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = controller.run(&mut terminal, launch).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!(error = ?err, "Lobby loop error");
        return Err(err);
    }
    Ok(())
}
