//! Tests for the single-round guessing state machine.

use wortspiel::{GuessOutcome, IgnoreReason, LetterState, MAX_STRIKES, Round, RoundStatus, Word};

fn word(text: &str) -> Word {
    Word::new(text, "noun", None, [], []).expect("Word construction failed")
}

#[test]
fn test_win_by_guessing_every_letter() {
    let mut round = Round::new(word("haus"));
    assert_eq!(round.guess('h'), GuessOutcome::Hit);
    assert_eq!(round.guess('a'), GuessOutcome::Hit);
    assert_eq!(round.guess('u'), GuessOutcome::Hit);
    assert_eq!(round.guess('s'), GuessOutcome::Won);
    assert_eq!(*round.status(), RoundStatus::Won);
    assert_eq!(round.wrong_count(), 0);
    assert_eq!(round.masked_text(), "haus");
}

#[test]
fn test_loss_after_six_wrong_guesses() {
    let mut round = Round::new(word("zug"));
    for miss in ['a', 'b', 'c', 'd', 'e'] {
        assert_eq!(round.guess(miss), GuessOutcome::Miss);
    }
    assert_eq!(round.guess('f'), GuessOutcome::Lost);
    assert_eq!(*round.status(), RoundStatus::Lost);
    assert_eq!(round.wrong_count(), MAX_STRIKES);
    assert_eq!(round.remaining_strikes(), 0);
}

#[test]
fn test_pre_revealed_letters_start_uncovered() {
    let word = Word::new("tisch", "noun", None, ['t', 'i'], []).expect("Word construction failed");
    let mut round = Round::new(word);
    assert_eq!(round.masked_text(), "ti___");
    assert_eq!(round.guess('s'), GuessOutcome::Hit);
    assert_eq!(round.guess('c'), GuessOutcome::Hit);
    assert_eq!(round.guess('h'), GuessOutcome::Won);
    assert_eq!(round.wrong_count(), 0);
}

#[test]
fn test_uppercase_input_matches_lowercase_round() {
    let mut round = Round::new(word("haus"));
    assert_eq!(round.guess('H'), GuessOutcome::Hit);
    assert_eq!(
        round.guess('h'),
        GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed)
    );
}

#[test]
fn test_duplicate_miss_costs_one_strike() {
    let mut round = Round::new(word("haus"));
    assert_eq!(round.guess('x'), GuessOutcome::Miss);
    assert_eq!(
        round.guess('x'),
        GuessOutcome::Ignored(IgnoreReason::AlreadyGuessed)
    );
    assert_eq!(round.wrong_count(), 1);
}

#[test]
fn test_excluded_letter_never_costs_a_strike() {
    let word = Word::new("haus", "noun", None, [], ['z']).expect("Word construction failed");
    let mut round = Round::new(word);
    assert_eq!(round.guess('z'), GuessOutcome::Ignored(IgnoreReason::Excluded));
    assert_eq!(round.wrong_count(), 0);
    assert_eq!(round.letter_state('z'), LetterState::Excluded);
    assert!(!round.guessed().contains(&'z'));
}

#[test]
fn test_non_letter_input_is_ignored() {
    let mut round = Round::new(word("haus"));
    for input in ['3', ' ', '-', '?'] {
        assert_eq!(
            round.guess(input),
            GuessOutcome::Ignored(IgnoreReason::NotALetter)
        );
    }
    assert_eq!(round.wrong_count(), 0);
    assert!(round.guessed().is_empty());
}

#[test]
fn test_inputs_after_the_round_ends_are_ignored() {
    let mut round = Round::new(word("ja"));
    round.guess('j');
    assert_eq!(round.guess('a'), GuessOutcome::Won);
    assert_eq!(
        round.guess('x'),
        GuessOutcome::Ignored(IgnoreReason::RoundOver)
    );
    assert_eq!(
        round.reveal('x'),
        GuessOutcome::Ignored(IgnoreReason::RoundOver)
    );
    assert_eq!(*round.status(), RoundStatus::Won);
}

#[test]
fn test_wrong_count_stops_at_the_strike_budget() {
    let mut round = Round::new(word("zug"));
    for miss in ['a', 'b', 'c', 'd', 'e', 'f'] {
        round.guess(miss);
    }
    assert_eq!(round.wrong_count(), MAX_STRIKES);
    assert_eq!(
        round.guess('h'),
        GuessOutcome::Ignored(IgnoreReason::RoundOver)
    );
    assert_eq!(round.wrong_count(), MAX_STRIKES);
}

#[test]
fn test_umlauts_are_guessable() {
    let mut round = Round::new(word("tür"));
    assert_eq!(round.guess('t'), GuessOutcome::Hit);
    assert_eq!(round.guess('ü'), GuessOutcome::Hit);
    assert_eq!(round.guess('r'), GuessOutcome::Won);
}

#[test]
fn test_phrase_is_won_without_guessing_the_separator() {
    let mut round = Round::new(Word::new("guten tag", "phrase", None, [], []).expect("word"));
    for hit in ['g', 'u', 't', 'e', 'n'] {
        assert_eq!(round.guess(hit), GuessOutcome::Hit);
    }
    assert_eq!(round.masked_text(), "guten t_g");
    assert_eq!(round.guess('a'), GuessOutcome::Won);
}

#[test]
fn test_fully_revealed_word_starts_won() {
    let word = Word::new("ja", "particle", None, ['j', 'a'], []).expect("Word construction failed");
    let mut round = Round::new(word);
    assert_eq!(*round.status(), RoundStatus::Won);
    assert!(round.is_over());
    assert_eq!(
        round.guess('j'),
        GuessOutcome::Ignored(IgnoreReason::RoundOver)
    );
}

#[test]
fn test_reveal_is_exempt_from_the_strike_count() {
    let mut round = Round::new(word("haus"));
    assert_eq!(round.reveal('u'), GuessOutcome::Hit);
    assert_eq!(round.wrong_count(), 0);
    assert_eq!(round.letter_state('u'), LetterState::Hit);
}

#[test]
fn test_reveal_completing_the_word_wins() {
    let mut round = Round::new(word("ja"));
    round.guess('j');
    assert_eq!(round.reveal('a'), GuessOutcome::Won);
    assert_eq!(*round.status(), RoundStatus::Won);
}
