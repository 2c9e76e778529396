//! Placement exam flow: a fixed question sequence, resumable across runs,
//! with exactly-once submission of the final score.

use std::collections::{BTreeSet, VecDeque};

use derive_getters::Getters;
use derive_more::{Display, Error};
use tracing::{info, instrument, warn};

use crate::api::{ApiError, WordService};
use crate::game::{Level, Word};
use crate::store::{AttemptStore, PlacementAttempt, StoreError};

/// Why a placement operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PlacementError {
    /// Submission was requested before every question was answered.
    #[display("not every placement question has been answered")]
    Incomplete,
    /// A server call failed.
    #[display("{_0}")]
    Api(ApiError),
    /// Local persistence failed.
    #[display("{_0}")]
    Store(StoreError),
}

impl From<ApiError> for PlacementError {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}

impl From<StoreError> for PlacementError {
    fn from(error: StoreError) -> Self {
        Self::Store(error)
    }
}

/// Where the flow stands relative to submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementPhase {
    /// Questions remain, or a failed submission may be retried.
    Active,
    /// A submission call is in flight.
    Submitting,
    /// The server accepted the score and assigned this level.
    Done(Level),
}

/// A snapshot of progress through the exam, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct PlacementProgress {
    answered: usize,
    total: usize,
    correct: u32,
    complete: bool,
}

/// Drives a placement attempt from first question to assigned level.
///
/// Questions already answered in a persisted attempt are filtered out up
/// front, so a restarted exam resumes at the first unanswered question.
/// Every answer is written to the store before play moves on.
#[derive(Debug, Getters)]
pub struct PlacementFlow {
    username: String,
    total: usize,
    #[getter(skip)]
    queue: VecDeque<Word>,
    attempt: PlacementAttempt,
    phase: PlacementPhase,
}

impl PlacementFlow {
    /// Fetches the question list and merges it with any persisted attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] when the question fetch fails or the
    /// server returns an empty list. An unreadable persisted attempt is not
    /// an error; the exam starts fresh.
    #[instrument(skip(service, store))]
    pub async fn start(
        username: &str,
        service: &dyn WordService,
        store: &AttemptStore,
    ) -> Result<Self, PlacementError> {
        let questions = service.fetch_placement_questions().await?;
        if questions.is_empty() {
            return Err(ApiError::validation("placement question list is empty").into());
        }
        let total = questions.len();
        let mut attempt = match store.load(username) {
            Ok(Some(attempt)) => {
                info!(
                    answered = attempt.answered().len(),
                    "Resuming placement attempt"
                );
                attempt
            }
            Ok(None) => PlacementAttempt::new(username),
            Err(e) => {
                warn!("Persisted attempt unreadable, starting fresh: {e}");
                PlacementAttempt::new(username)
            }
        };
        let valid: BTreeSet<String> = questions.iter().map(|w| w.id().to_string()).collect();
        attempt.sanitize(&valid);
        let queue: VecDeque<Word> = questions
            .into_iter()
            .filter(|word| !attempt.has_answered(word.id()))
            .collect();
        Ok(Self {
            username: username.to_string(),
            total,
            queue,
            attempt,
            phase: PlacementPhase::Active,
        })
    }

    /// The question to play next, if any remain.
    pub fn current_question(&self) -> Option<&Word> {
        self.queue.front()
    }

    /// One-based number of the current question, for display.
    pub fn question_number(&self) -> usize {
        (self.attempt.answered().len() + 1).min(self.total)
    }

    /// True once every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    /// Current standing for display.
    pub fn progress(&self) -> PlacementProgress {
        PlacementProgress {
            answered: self.attempt.answered().len(),
            total: self.total,
            correct: *self.attempt.correct_count(),
            complete: self.is_complete(),
        }
    }

    /// Records the outcome of the current question and persists the attempt
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns a [`PlacementError`] when the attempt cannot be written. The
    /// in-memory record still holds the answer; only resume-after-restart is
    /// at risk.
    #[instrument(skip(self, store))]
    pub fn record_result(&mut self, won: bool, store: &AttemptStore) -> Result<(), PlacementError> {
        let Some(word) = self.queue.pop_front() else {
            warn!("No pending question to record");
            return Ok(());
        };
        self.attempt.record(word.id(), won);
        store.save(&self.attempt)?;
        Ok(())
    }

    /// Sends the final score and clears the persisted attempt.
    ///
    /// A completed submission is remembered: calling again returns the
    /// assigned level without another network call.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::Incomplete`] when questions remain, or the
    /// server error when the call fails. A failed call leaves the flow
    /// active so submission can be retried.
    #[instrument(skip(self, service, store))]
    pub async fn submit(
        &mut self,
        service: &dyn WordService,
        store: &AttemptStore,
    ) -> Result<Level, PlacementError> {
        if let PlacementPhase::Done(level) = self.phase {
            return Ok(level);
        }
        if !self.is_complete() {
            return Err(PlacementError::Incomplete);
        }
        self.phase = PlacementPhase::Submitting;
        match service
            .submit_placement(
                &self.username,
                *self.attempt.correct_count(),
                self.total as u32,
            )
            .await
        {
            Ok(level) => {
                if let Err(e) = store.clear(&self.username) {
                    // Server already accepted the score; Done stands.
                    warn!("Could not clear placement attempt: {e}");
                }
                info!(%level, "Placement level assigned");
                self.phase = PlacementPhase::Done(level);
                Ok(level)
            }
            Err(e) => {
                self.phase = PlacementPhase::Active;
                warn!("Placement submission failed: {e}");
                Err(e.into())
            }
        }
    }
}
