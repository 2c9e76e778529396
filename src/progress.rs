//! Read-only progress projection fetched from the statistics backend.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::api::{ApiError, WordService};

/// Aggregated learner statistics as the backend reports them.
///
/// Field names mirror the wire payload of the statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ProgressStats {
    wins: u32,
    losses: u32,
    hint_credits: u32,
    #[serde(default)]
    failed_words: Vec<String>,
    #[serde(default)]
    problem_letters: Vec<char>,
}

impl ProgressStats {
    /// Win percentage over finished rounds, zero when none were played.
    pub fn win_rate(&self) -> f64 {
        let total = self.wins + self.losses;
        if total == 0 {
            0.0
        } else {
            f64::from(self.wins) * 100.0 / f64::from(total)
        }
    }
}

/// Pull-based projection of [`ProgressStats`].
///
/// A refresh replaces the projection wholesale; it is never merged or
/// patched incrementally, so a partial earlier failure cannot leave drift
/// behind.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    stats: Option<ProgressStats>,
}

impl ProgressTracker {
    /// Creates a tracker with nothing fetched yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest fetched statistics, if any fetch has succeeded.
    pub fn stats(&self) -> Option<&ProgressStats> {
        self.stats.as_ref()
    }

    /// Fetches fresh statistics and replaces the projection.
    ///
    /// On failure the previous projection stays in place untouched.
    ///
    /// # Errors
    ///
    /// Propagates the [`ApiError`] from the statistics fetch.
    #[instrument(skip(self, service))]
    pub async fn refresh(&mut self, service: &dyn WordService) -> Result<(), ApiError> {
        match service.fetch_stats().await {
            Ok(fresh) => {
                info!(wins = fresh.wins, losses = fresh.losses, "Progress refreshed");
                self.stats = Some(fresh);
                Ok(())
            }
            Err(error) => {
                warn!(%error, "Progress refresh failed; keeping previous projection");
                Err(error)
            }
        }
    }
}
