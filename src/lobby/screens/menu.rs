//! Lobby menu screen: mode selection plus level and adaptive toggles.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::{debug, info, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::settings::GameSettings;

/// Menu options available in the lobby.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    FreePlay,
    Placement,
    Statistics,
    Quit,
}

impl MenuOption {
    fn label(self) -> &'static str {
        match self {
            Self::FreePlay => "Free Play",
            Self::Placement => "Placement Exam",
            Self::Statistics => "Statistics",
            Self::Quit => "Quit",
        }
    }

    fn all() -> &'static [MenuOption] {
        &[
            Self::FreePlay,
            Self::Placement,
            Self::Statistics,
            Self::Quit,
        ]
    }
}

/// State for the lobby menu screen.
#[derive(Debug, Getters)]
pub struct MenuScreen {
    username: String,
    settings: GameSettings,
    list_state: ListState,
}

impl MenuScreen {
    /// Creates a new menu screen for the given player.
    #[instrument(skip(settings))]
    pub fn new(username: String, settings: GameSettings) -> Self {
        debug!(username = %username, "Initializing MenuScreen");
        let mut state = ListState::default();
        state.select(Some(0));
        Self {
            username,
            settings,
            list_state: state,
        }
    }

    /// Moves selection up.
    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    /// Moves selection down.
    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Returns the currently selected menu option.
    fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }
}

impl Screen for MenuScreen {
    #[instrument(skip(self, frame))]
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Wortspiel")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let player_text = format!(
            "Player: {}   Level: {}   Adaptive: {}",
            self.username,
            self.settings.level.label(),
            self.settings.adaptive_label()
        );
        let player_bar = Paragraph::new(player_text)
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(player_bar, chunks[1]);

        let items: Vec<ListItem> = MenuOption::all()
            .iter()
            .map(|opt| ListItem::new(opt.label()))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state.clone();
        frame.render_stateful_widget(menu, chunks[2], &mut list_state);

        let help = Paragraph::new("↑↓: Navigate | Enter: Select | l: Level | a: Adaptive | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key))]
    fn handle_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Char('l') | KeyCode::Char('L') => {
                self.settings.level = self.settings.level.cycled();
                info!(level = %self.settings.level, "Level changed");
                ScreenTransition::Stay
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.settings.adaptive = !self.settings.adaptive;
                info!(adaptive = self.settings.adaptive, "Adaptive selection toggled");
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                match option {
                    MenuOption::FreePlay => ScreenTransition::StartFreePlay,
                    MenuOption::Placement => ScreenTransition::StartPlacement,
                    MenuOption::Statistics => ScreenTransition::GoToStats,
                    MenuOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
