//! Fixed turn order of a draft.
//!
//! Every format uses the standard 20-turn tournament draft:
//!
//! | phase | positions | order                | type |
//! |-------|-----------|----------------------|------|
//! | 0     | 0-5       | B R B R B R          | BAN  |
//! | 1     | 6-11      | B R R B B R          | PICK |
//! | 2     | 12-15     | R B R B              | BAN  |
//! | 3     | 16-19     | R B B R              | PICK |
//!
//! Legality is derived from the number of already-committed actions; a
//! client-supplied position is only accepted when it equals that count.

use crate::domain::types::{ActionType, SeriesFormat, Side};
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    pub position: u8,
    pub phase: u8,
    pub team: Side,
    pub action: ActionType,
}

const fn turn(position: u8, phase: u8, team: Side, action: ActionType) -> Turn {
    Turn {
        position,
        phase,
        team,
        action,
    }
}

use ActionType::{Ban, Pick};
use Side::{Blue, Red};

static TOURNAMENT_DRAFT: [Turn; 20] = [
    turn(0, 0, Blue, Ban),
    turn(1, 0, Red, Ban),
    turn(2, 0, Blue, Ban),
    turn(3, 0, Red, Ban),
    turn(4, 0, Blue, Ban),
    turn(5, 0, Red, Ban),
    turn(6, 1, Blue, Pick),
    turn(7, 1, Red, Pick),
    turn(8, 1, Red, Pick),
    turn(9, 1, Blue, Pick),
    turn(10, 1, Blue, Pick),
    turn(11, 1, Red, Pick),
    turn(12, 2, Red, Ban),
    turn(13, 2, Blue, Ban),
    turn(14, 2, Red, Ban),
    turn(15, 2, Blue, Ban),
    turn(16, 3, Red, Pick),
    turn(17, 3, Blue, Pick),
    turn(18, 3, Blue, Pick),
    turn(19, 3, Red, Pick),
];

/// The turn table for a series format.
pub fn turn_order(_format: SeriesFormat) -> &'static [Turn] {
    &TOURNAMENT_DRAFT
}

/// Number of actions in a complete draft.
pub fn turn_count(format: SeriesFormat) -> usize {
    turn_order(format).len()
}

/// Position of the terminal action.
pub fn final_position(format: SeriesFormat) -> u8 {
    (turn_count(format) - 1) as u8
}

/// The turn that must be played next, or `None` once the draft is full.
pub fn expected_turn(format: SeriesFormat, committed: usize) -> Option<Turn> {
    turn_order(format).get(committed).copied()
}

/// What a client claims to be playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnClaim {
    pub action: ActionType,
    pub team: Side,
    pub position: i32,
}

/// Check a submission against the turn derived from `committed`.
///
/// Returns the authoritative turn (including its phase) on success.
pub fn validate_turn(
    format: SeriesFormat,
    committed: usize,
    claim: TurnClaim,
) -> Result<Turn, DomainError> {
    let expected = expected_turn(format, committed).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidState,
            format!("Draft already has {committed} actions"),
        )
    })?;

    if claim.position != i32::from(expected.position) {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "Expected position {}, got {}",
                expected.position, claim.position
            ),
        ));
    }

    if claim.team != expected.team || claim.action != expected.action {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!(
                "Position {} is a {:?} for {}, got {:?} for {}",
                expected.position,
                expected.action,
                expected.team.as_str(),
                claim.action,
                claim.team.as_str()
            ),
        ));
    }

    Ok(expected)
}
