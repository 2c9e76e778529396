//! Screen implementations for the lobby and its game modes.

mod menu;
mod placement;
mod play;
mod round_view;
mod stats_view;

pub use menu::MenuScreen;
pub use placement::{PlacementCommand, PlacementScreen};
pub use play::{PlayCommand, PlayScreen};
pub use stats_view::StatsViewScreen;
