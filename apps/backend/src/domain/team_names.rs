use crate::errors::domain::{DomainError, ValidationKind};

const MAX_TEAM_NAME_LEN: usize = 64;

fn normalized(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Trim and check a pair of team names for a new series.
pub fn validate_team_names(team1: &str, team2: &str) -> Result<(String, String), DomainError> {
    let team1 = team1.trim();
    let team2 = team2.trim();

    for name in [team1, team2] {
        if name.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidTeamName,
                "Team names must not be empty",
            ));
        }
        if name.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(DomainError::validation(
                ValidationKind::InvalidTeamName,
                format!("Team names are limited to {MAX_TEAM_NAME_LEN} characters"),
            ));
        }
    }

    if normalized(team1) == normalized(team2) {
        return Err(DomainError::validation(
            ValidationKind::InvalidTeamName,
            "Team names must be different",
        ));
    }

    Ok((team1.to_string(), team2.to_string()))
}
