//! Persisted record of an in-progress placement attempt.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Per-user placement progress.
///
/// Written synchronously after every answered question and removed as one
/// unit on successful submission. The answered set grows monotonically and
/// only ever shrinks through [`PlacementAttempt::sanitize`] against a fresh
/// question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlacementAttempt {
    username: String,
    current_index: usize,
    correct_count: u32,
    answered: BTreeSet<String>,
    updated_at: DateTime<Utc>,
}

impl PlacementAttempt {
    /// Starts an empty attempt for the user.
    #[instrument]
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            current_index: 0,
            correct_count: 0,
            answered: BTreeSet::new(),
            updated_at: Utc::now(),
        }
    }

    /// Records an answered question by word identity.
    ///
    /// A word already in the answered set changes nothing, so replays cannot
    /// double-count. Returns whether the record changed.
    pub fn record(&mut self, word_id: &str, won: bool) -> bool {
        if !self.answered.insert(word_id.to_string()) {
            return false;
        }
        if won {
            self.correct_count += 1;
        }
        self.current_index = self.answered.len();
        self.updated_at = Utc::now();
        true
    }

    /// Whether the word identity was already answered.
    pub fn has_answered(&self, word_id: &str) -> bool {
        self.answered.contains(word_id)
    }

    /// Drops answered entries missing from the current question set and
    /// clamps derived fields, guarding against records written against an
    /// older question list.
    #[instrument(skip(self, valid_ids))]
    pub fn sanitize(&mut self, valid_ids: &BTreeSet<String>) {
        self.answered.retain(|id| valid_ids.contains(id));
        let cap = self.answered.len() as u32;
        if self.correct_count > cap {
            self.correct_count = cap;
        }
        self.current_index = self.answered.len();
    }
}
