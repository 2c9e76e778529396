//! Proficiency levels served by the vocabulary backend.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// CEFR-style proficiency level recognized by the word service.
///
/// The backend selects words and grades placement results against this
/// closed set. Parses case-insensitively from the wire form (`a1`, `a2`,
/// `b1`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Beginner vocabulary.
    #[default]
    A1,
    /// Elementary vocabulary.
    A2,
    /// Intermediate vocabulary.
    B1,
}

impl Level {
    /// Next level in the menu cycle, wrapping around.
    pub fn cycled(self) -> Self {
        match self {
            Self::A1 => Self::A2,
            Self::A2 => Self::B1,
            Self::B1 => Self::A1,
        }
    }

    /// Human-readable description for menus.
    pub fn label(self) -> &'static str {
        match self {
            Self::A1 => "A1 (beginner)",
            Self::A2 => "A2 (elementary)",
            Self::B1 => "B1 (intermediate)",
        }
    }
}
