use std::env;
use std::time::Duration;

use crate::error::AppError;

const DEFAULT_TURN_SECONDS: u32 = 30;
const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;

/// Tunables for the draft coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftConfig {
    /// Countdown length for every turn.
    pub turn_seconds: u32,
    /// Interval between countdown ticks; one second outside tests.
    pub tick: Duration,
    /// Upper bound for any single store operation.
    pub store_timeout: Duration,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            turn_seconds: DEFAULT_TURN_SECONDS,
            tick: Duration::from_secs(1),
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
        }
    }
}

impl DraftConfig {
    /// Read `DRAFT_TURN_SECONDS` and `DRAFT_STORE_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("DRAFT_TURN_SECONDS") {
            config.turn_seconds = raw
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    AppError::config(format!(
                        "DRAFT_TURN_SECONDS must be a positive integer, got '{raw}'"
                    ))
                })?;
        }

        if let Ok(raw) = env::var("DRAFT_STORE_TIMEOUT_MS") {
            let ms = raw
                .parse::<u64>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| {
                    AppError::config(format!(
                        "DRAFT_STORE_TIMEOUT_MS must be a positive integer, got '{raw}'"
                    ))
                })?;
            config.store_timeout = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn with_turn_seconds(mut self, seconds: u32) -> Self {
        self.turn_seconds = seconds;
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}
