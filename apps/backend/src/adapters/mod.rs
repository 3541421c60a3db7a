//! Adapters for external dependencies.

pub mod draft_actions_sea;
pub mod games_sea;
pub mod series_sea;
