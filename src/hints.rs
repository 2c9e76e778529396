//! Hint-credit economy: a server-authoritative balance gating letter reveals.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use tracing::{debug, instrument};

use crate::api::ApiError;

/// Why a hint request was not fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum HintError {
    /// Balance is zero; rejected before any network call.
    #[display("no hint credits left")]
    InsufficientCredit,
    /// The round is already over; hints no longer apply.
    #[display("the round is already over")]
    RoundOver,
    /// The hint call itself failed.
    #[display("hint request failed: {_0}")]
    Api(ApiError),
}

impl From<ApiError> for HintError {
    fn from(error: ApiError) -> Self {
        Self::Api(error)
    }
}

/// A fulfilled hint: the letter the server chose and the balance after the
/// deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct HintGrant {
    letter: char,
    balance: u32,
}

/// Credit balance for letter reveals.
///
/// The balance is never decremented locally; it is replaced wholesale with
/// the value a server response carries, so a failed call cannot drift the
/// client away from the server's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, new)]
pub struct HintCredits {
    balance: u32,
}

impl HintCredits {
    /// True when at least one credit is available.
    pub fn has_credit(&self) -> bool {
        self.balance > 0
    }

    /// Replaces the balance with a server-returned value.
    #[instrument(skip(self))]
    pub fn replace(&mut self, balance: u32) {
        debug!(old = self.balance, new = balance, "Hint balance replaced");
        self.balance = balance;
    }
}
