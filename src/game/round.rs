//! Single-round guessing state machine.

use std::collections::BTreeSet;

use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use super::word::{Word, normalize_letter};

/// Number of wrong guesses that ends a round in a loss.
pub const MAX_STRIKES: u8 = 6;

/// Round status. Transitions are one-directional: `Playing` moves to `Won`
/// or `Lost` and terminal states never change again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    /// Guesses are being accepted.
    Playing,
    /// Every letter of the word has been uncovered.
    Won,
    /// The strike budget is spent.
    Lost,
}

/// Result of applying one input to the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Letter present in the word; round continues.
    Hit,
    /// Letter absent; one strike spent, round continues.
    Miss,
    /// The letter completed the word.
    Won,
    /// The letter spent the final strike.
    Lost,
    /// Input was ignored; nothing changed.
    Ignored(IgnoreReason),
}

/// Why an input produced no state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The round already reached a terminal status.
    RoundOver,
    /// The letter was guessed or revealed earlier.
    AlreadyGuessed,
    /// The backend marked the letter absent; it is disabled, not wrong.
    Excluded,
    /// The input was not an alphabetic character.
    NotALetter,
}

/// Display state of one keyboard letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterState {
    /// Not tried yet.
    Untried,
    /// Guessed and present in the word.
    Hit,
    /// Guessed and absent from the word.
    Miss,
    /// Disabled by the backend before the round started.
    Excluded,
}

/// One round of guessing a single [`Word`].
///
/// Guessed letters never overlap the excluded set, and the wrong-guess count
/// is derived from the guessed set so it can only grow while the round is
/// playing.
#[derive(Debug, Clone, Getters)]
pub struct Round {
    word: Word,
    guessed: BTreeSet<char>,
    revealed: BTreeSet<char>,
    status: RoundStatus,
}

impl Round {
    /// Starts a round, seeding guesses with the backend's pre-revealed
    /// scaffolding.
    #[instrument(skip(word), fields(word = %word.text()))]
    pub fn new(word: Word) -> Self {
        let revealed = word.pre_revealed().clone();
        let guessed = revealed.clone();
        let mut round = Self {
            word,
            guessed,
            revealed,
            status: RoundStatus::Playing,
        };
        // A payload that pre-reveals every letter leaves nothing to guess;
        // any further input would be a duplicate, so the win is decided now.
        if round.is_complete() {
            warn!("Every letter arrived pre-revealed; round starts won");
            round.status = RoundStatus::Won;
        }
        round
    }

    fn is_complete(&self) -> bool {
        self.word.letters().iter().all(|c| self.guessed.contains(c))
    }

    /// Count of wrong guesses so far. Revealed letters are exempt.
    pub fn wrong_count(&self) -> u8 {
        self.guessed
            .iter()
            .filter(|c| !self.word.contains(**c) && !self.revealed.contains(*c))
            .count() as u8
    }

    /// Wrong letters in alphabetical order, for the end-of-round report.
    pub fn wrong_letters(&self) -> Vec<char> {
        self.guessed
            .iter()
            .filter(|c| !self.word.contains(**c) && !self.revealed.contains(*c))
            .copied()
            .collect()
    }

    /// Strikes left before the round is lost.
    pub fn remaining_strikes(&self) -> u8 {
        MAX_STRIKES.saturating_sub(self.wrong_count())
    }

    /// Whether the round reached a terminal status.
    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::Playing
    }

    /// Applies a player guess.
    ///
    /// Case is normalized; non-letters, duplicates, excluded letters, and
    /// guesses after the round ended are ignored without touching state.
    #[instrument(skip(self))]
    pub fn guess(&mut self, input: char) -> GuessOutcome {
        let Some(letter) = normalize_letter(input) else {
            return GuessOutcome::Ignored(IgnoreReason::NotALetter);
        };
        self.apply(letter, false)
    }

    /// Applies a server-granted letter reveal.
    ///
    /// A reveal is never counted as wrong and runs the same termination
    /// check as a guess.
    #[instrument(skip(self))]
    pub fn reveal(&mut self, input: char) -> GuessOutcome {
        let Some(letter) = normalize_letter(input) else {
            return GuessOutcome::Ignored(IgnoreReason::NotALetter);
        };
        self.apply(letter, true)
    }

    fn apply(&mut self, letter: char, is_reveal: bool) -> GuessOutcome {
        if self.status != RoundStatus::Playing {
            return GuessOutcome::Ignored(IgnoreReason::RoundOver);
        }
        if self.guessed.contains(&letter) {
            return GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed);
        }
        if self.word.excluded().contains(&letter) {
            debug!(%letter, "Excluded letter ignored");
            return GuessOutcome::Ignored(IgnoreReason::Excluded);
        }
        self.guessed.insert(letter);
        if is_reveal {
            self.revealed.insert(letter);
        }
        // The letter is applied and termination evaluated as one step; a
        // single guess is never evaluated twice.
        if self.is_complete() {
            self.status = RoundStatus::Won;
            info!(word = %self.word.text(), "Round won");
            return GuessOutcome::Won;
        }
        if !is_reveal && !self.word.contains(letter) {
            debug!(%letter, wrong = self.wrong_count(), "Miss");
            if self.wrong_count() >= MAX_STRIKES {
                self.status = RoundStatus::Lost;
                info!(word = %self.word.text(), "Round lost");
                return GuessOutcome::Lost;
            }
            return GuessOutcome::Miss;
        }
        GuessOutcome::Hit
    }

    /// Masked rendering of the word: guessed letters and separators shown,
    /// hidden letters as underscores.
    pub fn masked_text(&self) -> String {
        self.word
            .text()
            .chars()
            .map(|c| {
                if !c.is_alphabetic() || self.guessed.contains(&c) {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// Keyboard display state for a letter.
    pub fn letter_state(&self, input: char) -> LetterState {
        let Some(letter) = normalize_letter(input) else {
            return LetterState::Untried;
        };
        if self.word.excluded().contains(&letter) {
            LetterState::Excluded
        } else if self.guessed.contains(&letter) {
            if self.word.contains(letter) {
                LetterState::Hit
            } else {
                LetterState::Miss
            }
        } else {
            LetterState::Untried
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text, "noun", None, [], []).expect("word")
    }

    #[test]
    fn test_masked_text_hides_unguessed_letters() {
        let mut round = Round::new(word("haus"));
        round.guess('a');
        assert_eq!(round.masked_text(), "_a__");
    }

    #[test]
    fn test_masked_text_keeps_separators_visible() {
        let round = Round::new(word("guten tag"));
        assert_eq!(round.masked_text(), "_____ ___");
    }

    #[test]
    fn test_letter_states() {
        let word = Word::new("haus", "noun", None, [], ['z']).expect("word");
        let mut round = Round::new(word);
        round.guess('h');
        round.guess('x');
        assert_eq!(round.letter_state('h'), LetterState::Hit);
        assert_eq!(round.letter_state('x'), LetterState::Miss);
        assert_eq!(round.letter_state('z'), LetterState::Excluded);
        assert_eq!(round.letter_state('a'), LetterState::Untried);
    }

    #[test]
    fn test_remaining_strikes_shrinks_with_misses() {
        let mut round = Round::new(word("haus"));
        assert_eq!(round.remaining_strikes(), MAX_STRIKES);
        round.guess('x');
        assert_eq!(round.remaining_strikes(), MAX_STRIKES - 1);
    }
}
