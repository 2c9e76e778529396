//! Wire payloads for the backend contracts.

use serde::{Deserialize, Serialize};

use crate::game::{Word, WordError};
use crate::session::RoundReport;

/// Word payload served by the word and placement-question endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPayload {
    /// The word or phrase to guess.
    pub word: String,
    /// Grammatical type label (noun, verb, adjective, ...).
    #[serde(rename = "type")]
    pub word_type: String,
    /// Optional topic grouping.
    #[serde(default)]
    pub category: Option<String>,
    /// Letters revealed before the round starts, as scaffolding.
    #[serde(default)]
    pub pre_revealed_letters: Vec<String>,
    /// Letters the backend guarantees absent.
    #[serde(default)]
    pub excluded_letters: Vec<String>,
}

impl TryFrom<WordPayload> for Word {
    type Error = WordError;

    fn try_from(payload: WordPayload) -> Result<Self, Self::Error> {
        Word::new(
            &payload.word,
            &payload.word_type,
            payload.category,
            payload
                .pre_revealed_letters
                .iter()
                .filter_map(|s| s.chars().next()),
            payload
                .excluded_letters
                .iter()
                .filter_map(|s| s.chars().next()),
        )
    }
}

/// Body for the round-logging endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogGameBody {
    /// The word that was played.
    pub word: String,
    /// Grammatical type of the word.
    pub word_type: String,
    /// Whether the round was won.
    pub won: bool,
    /// Wrong guesses spent in the round.
    pub wrong_guess_count: u8,
    /// The wrong letters themselves.
    pub wrong_letters: Vec<char>,
}

impl From<&RoundReport> for LogGameBody {
    fn from(report: &RoundReport) -> Self {
        Self {
            word: report.word().clone(),
            word_type: report.word_type().clone(),
            won: *report.won(),
            wrong_guess_count: *report.wrong_guess_count(),
            wrong_letters: report.wrong_letters().clone(),
        }
    }
}

/// Body for the hint endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseHintBody {
    /// Word of the live round.
    pub word: String,
    /// Letters already guessed, so the server picks a new one.
    pub guessed_letters: Vec<char>,
}

/// Response from the hint endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HintPayload {
    /// The letter the server chose to reveal.
    pub revealed_letter: String,
    /// Credit balance after the deduction.
    pub hint_credits: u32,
}

/// Response from the feedback endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Instructor feedback, absent when none was left.
    pub feedback: Option<String>,
}

/// Body for the placement submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementSubmitBody {
    /// Learner the attempt belongs to.
    pub username: String,
    /// Questions answered correctly.
    pub correct_answers: u32,
    /// Size of the full question list.
    pub total_questions: u32,
}

/// Response from the placement submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelPayload {
    /// Assigned proficiency level in wire form.
    pub level: String,
}
