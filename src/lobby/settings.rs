//! Free-play settings: requested proficiency level and adaptive selection.

use tracing::instrument;

use crate::game::Level;

/// User-configurable settings for new free-play rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameSettings {
    /// Difficulty level requested from the word service.
    pub level: Level,
    /// Whether the server may pick words from the per-user weakness model
    /// instead of drawing uniformly.
    pub adaptive: bool,
}

impl GameSettings {
    /// Creates settings with defaults: level A1, adaptive selection off.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display label for the adaptive toggle.
    pub fn adaptive_label(self) -> &'static str {
        if self.adaptive { "on" } else { "off" }
    }
}
