//! Word domain type and letter normalization.

use std::collections::BTreeSet;

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// Lowercases a character and keeps it only if it is alphabetic.
///
/// Multi-character lowercase expansions keep their first character, which
/// covers the German alphabet including umlauts and ß.
pub(crate) fn normalize_letter(input: char) -> Option<char> {
    let lowered = input.to_lowercase().next()?;
    lowered.is_alphabetic().then_some(lowered)
}

/// Raised when a payload cannot back a playable round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum WordError {
    /// The word text contains no alphabetic characters.
    #[display("word text contains no letters")]
    NoLetters,
}

/// A server-supplied vocabulary word, immutable for the length of a round.
///
/// The text is normalized to lowercase on construction and doubles as the
/// word's identity. The pre-revealed set is clipped to letters actually
/// present in the word and the excluded set to letters absent from it, so a
/// sloppy payload cannot break round rules.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Word {
    text: String,
    word_type: String,
    category: Option<String>,
    letters: BTreeSet<char>,
    pre_revealed: BTreeSet<char>,
    excluded: BTreeSet<char>,
}

impl Word {
    /// Builds a word from raw data, normalizing and sanitizing letter sets.
    ///
    /// # Errors
    ///
    /// Returns [`WordError::NoLetters`] when the text holds no alphabetic
    /// characters after normalization.
    #[instrument(skip(pre_revealed, excluded))]
    pub fn new(
        text: &str,
        word_type: &str,
        category: Option<String>,
        pre_revealed: impl IntoIterator<Item = char>,
        excluded: impl IntoIterator<Item = char>,
    ) -> Result<Self, WordError> {
        let text = text.trim().to_lowercase();
        let letters: BTreeSet<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
        if letters.is_empty() {
            return Err(WordError::NoLetters);
        }
        let pre_revealed: BTreeSet<char> = pre_revealed
            .into_iter()
            .filter_map(normalize_letter)
            .filter(|c| letters.contains(c))
            .collect();
        let excluded: BTreeSet<char> = excluded
            .into_iter()
            .filter_map(normalize_letter)
            .filter(|c| !letters.contains(c))
            .collect();
        debug!(word = %text, letter_count = letters.len(), "Word constructed");
        Ok(Self {
            text,
            word_type: word_type.to_string(),
            category,
            letters,
            pre_revealed,
            excluded,
        })
    }

    /// Stable identity of the word: its normalized text.
    pub fn id(&self) -> &str {
        &self.text
    }

    /// Whether the letter occurs in the word.
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_keeps_umlauts() {
        assert_eq!(normalize_letter('H'), Some('h'));
        assert_eq!(normalize_letter('Ü'), Some('ü'));
        assert_eq!(normalize_letter('ß'), Some('ß'));
    }

    #[test]
    fn test_normalize_rejects_non_letters() {
        assert_eq!(normalize_letter('3'), None);
        assert_eq!(normalize_letter(' '), None);
        assert_eq!(normalize_letter('-'), None);
    }

    #[test]
    fn test_text_is_normalized_and_identity() {
        let word = Word::new("  Haus ", "noun", None, [], []).expect("word");
        assert_eq!(word.text(), "haus");
        assert_eq!(word.id(), "haus");
    }

    #[test]
    fn test_letters_ignore_separators() {
        let word = Word::new("guten tag", "phrase", None, [], []).expect("word");
        assert!(!word.letters().contains(&' '));
        assert_eq!(word.letters().len(), 7);
    }

    #[test]
    fn test_pre_revealed_clipped_to_word_letters() {
        let word = Word::new("tisch", "noun", None, ['T', 'x'], []).expect("word");
        assert!(word.pre_revealed().contains(&'t'));
        assert!(!word.pre_revealed().contains(&'x'));
    }

    #[test]
    fn test_excluded_clipped_to_absent_letters() {
        let word = Word::new("haus", "noun", None, [], ['h', 'z']).expect("word");
        assert!(!word.excluded().contains(&'h'));
        assert!(word.excluded().contains(&'z'));
    }

    #[test]
    fn test_letterless_text_is_rejected() {
        assert_eq!(
            Word::new("12 34", "noun", None, [], []),
            Err(WordError::NoLetters)
        );
        assert_eq!(Word::new("", "noun", None, [], []), Err(WordError::NoLetters));
    }
}
