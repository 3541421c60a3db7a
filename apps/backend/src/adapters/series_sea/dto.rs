//! DTOs for series_sea adapter.

use crate::domain::types::SeriesFormat;

/// DTO for creating a new series.
#[derive(Debug, Clone)]
pub struct SeriesCreate {
    pub id: String,
    pub team1_name: String,
    pub team2_name: String,
    pub format: SeriesFormat,
    pub fearless_draft: bool,
    pub scrim_block: bool,
    pub team1_auth_token: String,
    pub team2_auth_token: String,
}

impl SeriesCreate {
    pub fn new(
        id: impl Into<String>,
        team1_name: impl Into<String>,
        team2_name: impl Into<String>,
        format: SeriesFormat,
    ) -> Self {
        Self {
            id: id.into(),
            team1_name: team1_name.into(),
            team2_name: team2_name.into(),
            format,
            fearless_draft: false,
            scrim_block: false,
            team1_auth_token: String::new(),
            team2_auth_token: String::new(),
        }
    }

    pub fn fearless(mut self, fearless_draft: bool) -> Self {
        self.fearless_draft = fearless_draft;
        self
    }

    pub fn scrim_block(mut self, scrim_block: bool) -> Self {
        self.scrim_block = scrim_block;
        self
    }

    pub fn with_tokens(mut self, team1: impl Into<String>, team2: impl Into<String>) -> Self {
        self.team1_auth_token = team1.into();
        self.team2_auth_token = team2.into();
        self
    }
}
