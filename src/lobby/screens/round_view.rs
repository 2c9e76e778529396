//! Shared round rendering: gallows, masked word, and the letter board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};

use crate::game::{LetterState, MAX_STRIKES, Round};

/// Gallows drawings indexed by the wrong-guess count.
const GALLOWS: [&str; 7] = [
    r#"  +---+
  |   |
      |
      |
      |
      |
========="#,
    r#"  +---+
  |   |
  O   |
      |
      |
      |
========="#,
    r#"  +---+
  |   |
  O   |
  |   |
      |
      |
========="#,
    r#"  +---+
  |   |
  O   |
 /|   |
      |
      |
========="#,
    r#"  +---+
  |   |
  O   |
 /|\  |
      |
      |
========="#,
    r#"  +---+
  |   |
  O   |
 /|\  |
 /    |
      |
========="#,
    r#"  +---+
  |   |
  O   |
 /|\  |
 / \  |
      |
========="#,
];

/// Keyboard rows shown on the letter board.
const LETTER_ROWS: [&str; 3] = ["abcdefghi", "jklmnopqr", "stuvwxyzäöüß"];

/// Draws the gallows, the masked word panel, and the letter board into
/// `area`.
pub(super) fn render_round(frame: &mut Frame, area: Rect, round: &Round) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(20)])
        .split(area);

    let stage = usize::from(round.wrong_count().min(MAX_STRIKES));
    let gallows_color = match round.remaining_strikes() {
        0..=2 => Color::Red,
        3..=4 => Color::Yellow,
        _ => Color::White,
    };
    let gallows = Paragraph::new(GALLOWS[stage])
        .style(Style::default().fg(gallows_color))
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Strikes: {}/{}",
            round.wrong_count(),
            MAX_STRIKES
        )));
    frame.render_widget(gallows, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(columns[1]);

    let masked: String = round
        .masked_text()
        .chars()
        .flat_map(|c| [c, ' '])
        .collect();
    let wrong: Vec<String> = round.wrong_letters().iter().map(char::to_string).collect();
    let word_lines = vec![
        Line::from(Span::styled(
            masked.trim_end().to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Category: {}   Type: {}",
            round.word().category().as_deref().unwrap_or("-"),
            round.word().word_type()
        )),
        Line::from(Span::styled(
            if wrong.is_empty() {
                String::new()
            } else {
                format!("Wrong: {}", wrong.join(" "))
            },
            Style::default().fg(Color::Red),
        )),
    ];
    let word_panel = Paragraph::new(Text::from(word_lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Word"));
    frame.render_widget(word_panel, right[0]);

    let board_lines: Vec<Line> = LETTER_ROWS
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .chars()
                .flat_map(|c| {
                    let style = match round.letter_state(c) {
                        LetterState::Hit => Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                        LetterState::Miss => Style::default().fg(Color::Red),
                        LetterState::Excluded => Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT),
                        LetterState::Untried => Style::default().fg(Color::White),
                    };
                    [Span::styled(c.to_string(), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let board = Paragraph::new(Text::from(board_lines))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Letters"));
    frame.render_widget(board, right[1]);
}
