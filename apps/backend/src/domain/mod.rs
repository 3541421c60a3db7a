//! Domain layer: pure draft and series logic, no I/O.

pub mod draft_order;
pub mod series_rules;
pub mod team_names;
pub mod types;

#[cfg(test)]
mod tests_props_series;

// Re-exports for ergonomics
pub use draft_order::{expected_turn, final_position, turn_count, validate_turn, Turn, TurnClaim};
pub use series_rules::{next_step, tally_wins, GameResult, Progression, SeriesView, WinTally};
pub use team_names::validate_team_names;
pub use types::{ActionType, GameStatus, SeriesFormat, SeriesStatus, Side};
