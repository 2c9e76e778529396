//! Error type for attempt persistence.

use derive_more::{Display, Error};

/// Error raised by the attempt store.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// What failed.
    pub message: String,
    /// Line where the error was created.
    pub line: u32,
    /// Source file where the error was created.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a store error carrying the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
