//! Repository functions for domain layer.

pub mod draft_actions;
pub mod games;
pub mod series;
