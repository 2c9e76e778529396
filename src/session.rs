//! Round-owning game session: exactly-once end reporting, hint gating, and
//! staleness protection for in-flight responses.

use std::sync::atomic::{AtomicU64, Ordering};

use derive_getters::Getters;
use tracing::{debug, info, instrument, warn};

use crate::game::{GuessOutcome, Round, RoundStatus, Word};
use crate::hints::{HintCredits, HintError, HintGrant};

/// Monotonically unique identity for a session, allocated per round start.
///
/// Network responses carry the tag of the session that initiated them; a
/// response whose tag no longer matches the live session is stale and is
/// discarded unapplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTag(u64);

impl SessionTag {
    /// Allocates the next tag.
    pub fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// How the surrounding flow reacts when a round ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Free play: the next round may start as soon as this one ends.
    FreePlay,
    /// Placement assessment: the flow advances only after the player
    /// acknowledges the result.
    Placement,
}

/// End-of-round report for the logging backend.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RoundReport {
    word: String,
    word_type: String,
    won: bool,
    wrong_guess_count: u8,
    wrong_letters: Vec<char>,
}

/// Everything a hint call needs, captured before the await.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HintRequest {
    tag: SessionTag,
    word: String,
    guessed: Vec<char>,
}

/// One round plus its reporting and hint bookkeeping.
#[derive(Debug, Clone, Getters)]
pub struct GameSession {
    tag: SessionTag,
    mode: SessionMode,
    round: Round,
    ended: bool,
}

impl GameSession {
    /// Starts a session over a fresh word.
    #[instrument(skip(word), fields(word = %word.text()))]
    pub fn new(word: Word, mode: SessionMode) -> Self {
        let tag = SessionTag::fresh();
        info!(?tag, ?mode, "Session started");
        Self {
            tag,
            mode,
            round: Round::new(word),
            ended: false,
        }
    }

    /// Applies a player guess to the round.
    pub fn guess(&mut self, input: char) -> GuessOutcome {
        self.round.guess(input)
    }

    /// Hands out the end-of-round report exactly once.
    ///
    /// The guard flag flips before the report is returned, so however many
    /// times callers re-check after the terminal transition, only the first
    /// call obtains a report to dispatch.
    #[instrument(skip(self))]
    pub fn take_end_report(&mut self) -> Option<RoundReport> {
        if self.ended || !self.round.is_over() {
            return None;
        }
        self.ended = true;
        let won = *self.round.status() == RoundStatus::Won;
        info!(word = %self.round.word().text(), won, "Round report taken");
        Some(RoundReport {
            word: self.round.word().text().clone(),
            word_type: self.round.word().word_type().clone(),
            won,
            wrong_guess_count: self.round.wrong_count(),
            wrong_letters: self.round.wrong_letters(),
        })
    }

    /// Whether the surrounding flow should advance without waiting for an
    /// acknowledgement.
    pub fn advances_automatically(&self) -> bool {
        self.mode == SessionMode::FreePlay
    }

    /// Validates a hint request against the round state and balance.
    ///
    /// # Errors
    ///
    /// [`HintError::RoundOver`] once the round ended, and
    /// [`HintError::InsufficientCredit`] on a zero balance. Both are raised
    /// before any network call and mutate nothing.
    #[instrument(skip(self, credits))]
    pub fn hint_request(&self, credits: &HintCredits) -> Result<HintRequest, HintError> {
        if self.round.is_over() {
            return Err(HintError::RoundOver);
        }
        if !credits.has_credit() {
            debug!("Hint refused: balance is zero");
            return Err(HintError::InsufficientCredit);
        }
        Ok(HintRequest {
            tag: self.tag,
            word: self.round.word().text().clone(),
            guessed: self.round.guessed().iter().copied().collect(),
        })
    }

    /// Applies a granted hint if it still belongs to this session.
    ///
    /// Returns `None` for a stale grant (tag mismatch), leaving the round
    /// and the balance untouched. For a current grant the letter goes
    /// through the reveal path and the balance is replaced with the server
    /// value even when the letter was already on the board: the server
    /// ledger has already moved.
    #[instrument(skip(self, credits))]
    pub fn apply_hint(
        &mut self,
        request_tag: SessionTag,
        grant: HintGrant,
        credits: &mut HintCredits,
    ) -> Option<GuessOutcome> {
        if request_tag != self.tag {
            warn!(?request_tag, current = ?self.tag, "Stale hint grant discarded");
            return None;
        }
        let outcome = self.round.reveal(*grant.letter());
        if let GuessOutcome::Ignored(reason) = outcome {
            debug!(?reason, "Hint reveal was a no-op");
        }
        credits.replace(*grant.balance());
        Some(outcome)
    }
}
