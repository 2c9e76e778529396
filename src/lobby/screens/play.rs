//! Free-play screen: one round at a time with hints and auto-advance.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_getters::Getters;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::game::{GuessOutcome, IgnoreReason, normalize_letter};
use crate::hints::{HintCredits, HintGrant};
use crate::lobby::screens::round_view;
use crate::lobby::settings::GameSettings;
use crate::session::{GameSession, SessionTag};

/// Pause before a finished free-play round rolls into the next one.
const ADVANCE_DELAY: Duration = Duration::from_millis(1500);

/// What a key press asks the free-play loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Nothing actionable.
    None,
    /// Guess the typed character.
    Guess(char),
    /// Ask the server for a hint letter.
    RequestHint,
    /// Start the next round.
    NextRound,
    /// Leave to the lobby menu.
    LeaveToMenu,
    /// Exit the application.
    Quit,
}

/// State for the free-play screen.
#[derive(Debug, Getters)]
pub struct PlayScreen {
    session: GameSession,
    credits: HintCredits,
    settings: GameSettings,
    status: Option<String>,
    feedback: Option<String>,
    #[getter(skip)]
    advance_at: Option<Instant>,
}

impl PlayScreen {
    /// Creates the screen around a freshly started session.
    #[instrument(skip(session, credits))]
    pub fn new(session: GameSession, credits: HintCredits, settings: GameSettings) -> Self {
        Self {
            session,
            credits,
            settings,
            status: None,
            feedback: None,
            advance_at: None,
        }
    }

    /// Mutable access to the running session.
    pub fn session_mut(&mut self) -> &mut GameSession {
        &mut self.session
    }

    /// Mutable access to the hint balance.
    pub fn credits_mut(&mut self) -> &mut HintCredits {
        &mut self.credits
    }

    /// Replaces the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    /// Sets the coaching message shown above the board.
    pub fn set_feedback(&mut self, feedback: Option<String>) {
        self.feedback = feedback;
    }

    /// Swaps in the next round's session and clears round-scoped state.
    #[instrument(skip(self, session))]
    pub fn replace_session(&mut self, session: GameSession) {
        self.session = session;
        self.status = None;
        self.advance_at = None;
    }

    /// Applies a guess and updates the status line for non-terminal
    /// outcomes. Terminal outcomes get their status from the round-finish
    /// path, which knows the full word.
    pub fn apply_guess(&mut self, input: char) -> GuessOutcome {
        let outcome = self.session.guess(input);
        let shown = normalize_letter(input).unwrap_or(input);
        match outcome {
            GuessOutcome::Hit => {
                self.set_status(format!("'{shown}' is in the word."));
            }
            GuessOutcome::Miss => {
                let left = self.session.round().remaining_strikes();
                self.set_status(format!("'{shown}' is not in the word. {left} tries left."));
            }
            GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed) => {
                self.set_status(format!("Already tried '{shown}'."));
            }
            GuessOutcome::Ignored(IgnoreReason::Excluded) => {
                self.set_status(format!("'{shown}' is already marked as absent."));
            }
            GuessOutcome::Ignored(_) | GuessOutcome::Won | GuessOutcome::Lost => {}
        }
        outcome
    }

    /// Applies a granted hint to the session and the balance.
    pub fn apply_hint(&mut self, request_tag: SessionTag, grant: HintGrant) -> Option<GuessOutcome> {
        let letter = *grant.letter();
        let outcome = self.session.apply_hint(request_tag, grant, &mut self.credits)?;
        if !matches!(outcome, GuessOutcome::Won | GuessOutcome::Lost) {
            self.set_status(format!("Hint: the word contains '{letter}'."));
        }
        Some(outcome)
    }

    /// Arms the auto-advance timer for a finished round.
    #[instrument(skip(self))]
    pub fn schedule_advance(&mut self) {
        debug!("Auto-advance scheduled");
        self.advance_at = Some(Instant::now() + ADVANCE_DELAY);
    }

    /// Whether the auto-advance timer has fired. Disarms it, so a failed
    /// next-round fetch does not retrigger on every poll.
    pub fn take_due_advance(&mut self) -> bool {
        match self.advance_at {
            Some(due) if Instant::now() >= due => {
                self.advance_at = None;
                true
            }
            _ => false,
        }
    }

    /// Maps a key event to a free-play command.
    ///
    /// Letters always guess while the round runs; `q` is a letter here, so
    /// quitting goes through Esc or Ctrl-C.
    pub fn map_key(&self, key: KeyEvent) -> PlayCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PlayCommand::Quit;
        }
        match key.code {
            KeyCode::Esc => PlayCommand::LeaveToMenu,
            KeyCode::Tab => PlayCommand::RequestHint,
            KeyCode::Enter if self.session.round().is_over() => PlayCommand::NextRound,
            KeyCode::Char(c) if !self.session.round().is_over() => PlayCommand::Guess(c),
            _ => PlayCommand::None,
        }
    }

    /// Renders the screen.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let has_feedback = self.feedback.is_some();
        let constraints: Vec<Constraint> = if has_feedback {
            vec![
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
        } else {
            vec![
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
        };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let offset = usize::from(has_feedback);

        let header_text = format!(
            "Free Play   Level: {}   Adaptive: {}   Hints: {}",
            self.settings.level.label(),
            self.settings.adaptive_label(),
            self.credits.balance()
        );
        let header = Paragraph::new(header_text)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(header, chunks[0]);

        if let Some(feedback) = &self.feedback {
            let coach = Paragraph::new(feedback.as_str())
                .style(Style::default().fg(Color::Magenta))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Coach"));
            frame.render_widget(coach, chunks[1]);
        }

        round_view::render_round(frame, chunks[offset + 1], self.session.round());

        let status = Paragraph::new(self.status.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[offset + 2]);

        let help = Paragraph::new("Type a letter to guess | Tab: Hint | Enter: Next round | Esc: Menu")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[offset + 3]);
    }
}
