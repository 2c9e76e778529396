//! Statistics view screen: lifetime results and trouble spots.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::{info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::progress::ProgressStats;

/// State for the statistics view screen.
///
/// The controller fetches the data before constructing the screen; a failed
/// fetch arrives as an error message alongside whatever stale snapshot is
/// still available.
#[derive(Debug, Getters)]
pub struct StatsViewScreen {
    username: String,
    stats: Option<ProgressStats>,
    error: Option<String>,
}

impl StatsViewScreen {
    /// Creates a new stats view screen from prefetched data.
    #[instrument(skip(stats, error))]
    pub fn new(username: String, stats: Option<ProgressStats>, error: Option<String>) -> Self {
        info!(
            username = %username,
            loaded = stats.is_some(),
            "StatsViewScreen initialized"
        );
        Self {
            username,
            stats,
            error,
        }
    }
}

impl Screen for StatsViewScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new(format!("Statistics for {}", self.username))
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let (summary_text, summary_color) = match (&self.stats, &self.error) {
            (Some(stats), _) => (
                format!(
                    "Wins: {}   Losses: {}   Win rate: {:.1}%   Hint credits: {}",
                    stats.wins(),
                    stats.losses(),
                    stats.win_rate(),
                    stats.hint_credits()
                ),
                Color::Green,
            ),
            (None, Some(error)) => (format!("Statistics unavailable: {error}"), Color::Red),
            (None, None) => ("No statistics available".to_string(), Color::Yellow),
        };
        let summary = Paragraph::new(summary_text)
            .style(Style::default().fg(summary_color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(summary, chunks[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let failed_items: Vec<ListItem> = self
            .stats
            .iter()
            .flat_map(|s| s.failed_words())
            .take(20)
            .map(|word| ListItem::new(word.as_str()))
            .collect();
        let failed = List::new(failed_items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Words to review"),
        );
        frame.render_widget(failed, columns[0]);

        let letter_items: Vec<ListItem> = self
            .stats
            .iter()
            .flat_map(|s| s.problem_letters())
            .map(|letter| ListItem::new(letter.to_string()))
            .collect();
        let letters = List::new(letter_items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Letters you miss most"),
        );
        frame.render_widget(letters, columns[1]);

        let help = Paragraph::new("Esc / b: Back to menu | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to menu from stats");
                ScreenTransition::GoToMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
