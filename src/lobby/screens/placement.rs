//! Placement exam screen: question rounds plus the submission states.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::instrument;

use crate::game::{GuessOutcome, IgnoreReason, Level, normalize_letter};
use crate::lobby::screens::round_view;
use crate::placement::{PlacementError, PlacementProgress};
use crate::session::{GameSession, RoundReport};

/// What a key press asks the placement loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementCommand {
    /// Nothing actionable.
    None,
    /// Guess the typed character.
    Guess(char),
    /// Confirm the shown result and move on.
    Acknowledge,
    /// Leave to the lobby menu; progress stays saved.
    LeaveToMenu,
    /// Exit the application.
    Quit,
}

/// Which panel the screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlacementStage {
    /// A question round is in progress.
    Question,
    /// The round ended; waiting for the player to acknowledge.
    Result,
    /// The score submission is in flight.
    Submitting,
    /// Submission failed; waiting for the player to retry.
    Failed,
    /// The server assigned a level.
    Done(Level),
}

/// State for the placement exam screen.
#[derive(Debug)]
pub struct PlacementScreen {
    session: Option<GameSession>,
    progress: PlacementProgress,
    stage: PlacementStage,
    status: Option<String>,
}

impl PlacementScreen {
    /// Creates the screen before the first question is handed over.
    #[instrument(skip(progress))]
    pub fn new(progress: PlacementProgress) -> Self {
        Self {
            session: None,
            progress,
            stage: PlacementStage::Question,
            status: None,
        }
    }

    /// Hands the next question's session to the screen.
    #[instrument(skip(self, session, progress))]
    pub fn begin_question(&mut self, session: GameSession, progress: PlacementProgress) {
        self.session = Some(session);
        self.progress = progress;
        self.stage = PlacementStage::Question;
        self.status = None;
    }

    /// Mutable access to the running session, if a question is live.
    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    /// Applies a guess to the live question.
    pub fn apply_guess(&mut self, input: char) -> Option<GuessOutcome> {
        let outcome = self.session.as_mut()?.guess(input);
        let shown = normalize_letter(input).unwrap_or(input);
        match outcome {
            GuessOutcome::Hit => {
                self.status = Some(format!("'{shown}' is in the word."));
            }
            GuessOutcome::Miss => {
                self.status = Some(format!("'{shown}' is not in the word."));
            }
            GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed) => {
                self.status = Some(format!("Already tried '{shown}'."));
            }
            GuessOutcome::Ignored(IgnoreReason::Excluded) => {
                self.status = Some(format!("'{shown}' is already marked as absent."));
            }
            GuessOutcome::Ignored(_) | GuessOutcome::Won | GuessOutcome::Lost => {}
        }
        Some(outcome)
    }

    /// Shows the outcome of a finished question.
    #[instrument(skip(self, report, progress))]
    pub fn show_result(&mut self, report: &RoundReport, progress: PlacementProgress) {
        self.progress = progress;
        self.stage = PlacementStage::Result;
        self.status = Some(if *report.won() {
            format!(
                "Correct! The word was '{}'. Press Enter to continue.",
                report.word()
            )
        } else {
            format!(
                "The word was '{}'. Press Enter to continue.",
                report.word()
            )
        });
    }

    /// Switches to the submission-in-flight panel.
    pub fn set_submitting(&mut self, progress: PlacementProgress) {
        self.progress = progress;
        self.stage = PlacementStage::Submitting;
        self.status = Some("Submitting your score…".to_string());
    }

    /// Shows the assigned level.
    #[instrument(skip(self))]
    pub fn show_done(&mut self, level: Level) {
        self.stage = PlacementStage::Done(level);
        self.status = Some(format!(
            "Placement complete. Your level: {}. Press Enter to return to the lobby.",
            level.label()
        ));
    }

    /// Shows a failed submission and arms the retry prompt.
    #[instrument(skip(self, error))]
    pub fn show_submit_error(&mut self, error: &PlacementError) {
        self.stage = PlacementStage::Failed;
        self.status = Some(format!("Submission failed: {error}. Press Enter to retry."));
    }

    /// Whether the exam finished and the player may leave.
    pub fn is_done(&self) -> bool {
        matches!(self.stage, PlacementStage::Done(_))
    }

    fn awaiting_ack(&self) -> bool {
        matches!(
            self.stage,
            PlacementStage::Result | PlacementStage::Failed | PlacementStage::Done(_)
        )
    }

    /// Maps a key event to a placement command.
    pub fn map_key(&self, key: KeyEvent) -> PlacementCommand {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return PlacementCommand::Quit;
        }
        match key.code {
            KeyCode::Esc => PlacementCommand::LeaveToMenu,
            KeyCode::Enter if self.awaiting_ack() => PlacementCommand::Acknowledge,
            KeyCode::Char(c)
                if self.stage == PlacementStage::Question
                    && self.session.as_ref().is_some_and(|s| !s.round().is_over()) =>
            {
                PlacementCommand::Guess(c)
            }
            _ => PlacementCommand::None,
        }
    }

    /// Renders the screen.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(11),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let header_text = format!(
            "Placement Exam   Question {} of {}   Correct: {}",
            (*self.progress.answered() + 1).min(*self.progress.total()),
            self.progress.total(),
            self.progress.correct()
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

        match (&self.stage, &self.session) {
            (PlacementStage::Question | PlacementStage::Result, Some(session)) => {
                round_view::render_round(frame, chunks[1], session.round());
            }
            _ => {
                let (text, color) = match self.stage {
                    PlacementStage::Submitting => {
                        ("Scoring your placement…".to_string(), Color::Yellow)
                    }
                    PlacementStage::Failed => (
                        "The score could not be submitted.".to_string(),
                        Color::Red,
                    ),
                    PlacementStage::Done(level) => (
                        format!("Your level: {}", level.label()),
                        Color::Green,
                    ),
                    _ => ("Preparing the next question…".to_string(), Color::Yellow),
                };
                let panel = Paragraph::new(text)
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL));
                frame.render_widget(panel, chunks[1]);
            }
        }

        let status = Paragraph::new(self.status.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new("Type a letter to guess | Enter: Continue | Esc: Menu (progress is saved)")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }
}
