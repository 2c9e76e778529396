//! Round mechanics for the word-guessing game.
//!
//! A [`Word`] arrives from the backend with optional scaffolding (letters
//! revealed up front) and exclusions (letters known absent). A [`Round`]
//! tracks guesses against it until the word is uncovered or the strike
//! budget runs out.

mod level;
mod round;
mod word;

pub use level::Level;
pub use round::{GuessOutcome, IgnoreReason, LetterState, MAX_STRIKES, Round, RoundStatus};
pub(crate) use word::normalize_letter;
pub use word::{Word, WordError};
