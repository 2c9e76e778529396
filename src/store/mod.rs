//! Local persistence for resumable placement attempts.

mod attempt;
mod error;
mod repository;

pub use attempt::PlacementAttempt;
pub use error::StoreError;
pub use repository::AttemptStore;
