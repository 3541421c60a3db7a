//! Backend test support utilities
//!
//! Shared helpers for the draft backend's integration test binaries:
//! logging bootstrap, problem-details assertions and unique fixture names.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
