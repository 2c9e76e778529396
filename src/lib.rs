//! Wortspiel library - terminal client for a German vocabulary trainer
//!
//! This library drives a hangman-style practice loop against a word
//! service: it fetches words, plays guessing rounds, spends server-held
//! hint credits, logs results, and runs a resumable placement exam.
//!
//! # Architecture
//!
//! - **Game**: round mechanics over sanitized words with a strike budget
//! - **Session**: per-round reporting, hint gating, and staleness tags
//! - **Api**: HTTP client and the service trait the flows depend on
//! - **Placement**: resumable exam with exactly-once score submission
//! - **Lobby**: multi-screen terminal UI gluing the flows together
//!
//! # Example
//!
//! ```no_run
//! use wortspiel::{GameSession, SessionMode, Word};
//!
//! # fn example() -> anyhow::Result<()> {
//! let word = Word::new("Haus", "noun", None, [], [])?;
//! let mut session = GameSession::new(word, SessionMode::FreePlay);
//!
//! session.guess('h');
//! session.guess('a');
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod api;
mod cli;
mod config;
mod game;
mod hints;
mod lobby;
mod placement;
mod progress;
mod session;
mod store;

// Crate-level exports - HTTP client and service trait
pub use api::{
    ApiClient, ApiError, FeedbackPayload, HintPayload, LevelPayload, LogGameBody,
    PlacementSubmitBody, UseHintBody, WordPayload, WordService,
};

// Crate-level exports - Command-line interface
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ClientConfig, ConfigError};

// Crate-level exports - Round mechanics
pub use game::{
    GuessOutcome, IgnoreReason, Level, LetterState, MAX_STRIKES, Round, RoundStatus, Word,
    WordError,
};

// Crate-level exports - Hint economy
pub use hints::{HintCredits, HintError, HintGrant};

// Crate-level exports - Lobby UI
pub use lobby::{GameSettings, Launch, LobbyController, Screen, ScreenTransition, run_lobby};

// Crate-level exports - Placement exam
pub use placement::{PlacementError, PlacementFlow, PlacementPhase, PlacementProgress};

// Crate-level exports - Progress statistics
pub use progress::{ProgressStats, ProgressTracker};

// Crate-level exports - Session management
pub use session::{GameSession, HintRequest, RoundReport, SessionMode, SessionTag};

// Crate-level exports - Local persistence
pub use store::{AttemptStore, PlacementAttempt, StoreError};
