//! The opaque word-service capability consumed by the core.

use async_trait::async_trait;

use crate::game::{Level, Word};
use crate::hints::HintGrant;
use crate::progress::ProgressStats;
use crate::session::RoundReport;

use super::error::ApiError;

/// Backend capability the session controller depends on.
///
/// Word selection and difficulty modeling live server-side; the client sees
/// exactly these six operations. Test doubles implement the same set.
#[async_trait]
pub trait WordService: Send + Sync {
    /// Fetches the next word to play at the given level. With `adaptive`
    /// set, selection is biased toward the learner's weaknesses.
    async fn fetch_word(&self, level: Level, adaptive: bool) -> Result<Word, ApiError>;

    /// Reports a finished round. Feeds server-side difficulty adaptation.
    async fn log_result(&self, report: &RoundReport) -> Result<(), ApiError>;

    /// Spends one credit for a server-chosen letter reveal.
    async fn consume_hint(&self, word: &str, guessed: &[char]) -> Result<HintGrant, ApiError>;

    /// Fetches the aggregated progress statistics.
    async fn fetch_stats(&self) -> Result<ProgressStats, ApiError>;

    /// Fetches the full placement question list. Idempotent and
    /// side-effect-free.
    async fn fetch_placement_questions(&self) -> Result<Vec<Word>, ApiError>;

    /// Submits a completed placement attempt; returns the assigned level.
    async fn submit_placement(
        &self,
        username: &str,
        correct: u32,
        total: u32,
    ) -> Result<Level, ApiError>;
}
