//! DTOs for draft_actions_sea adapter.

use crate::domain::types::{ActionType, Side};

/// DTO for recording one committed draft action.
#[derive(Debug, Clone)]
pub struct DraftActionCreate {
    pub id: String,
    pub game_id: String,
    pub action_type: ActionType,
    pub phase: i16,
    pub team: Side,
    pub champion: String,
    pub position: i16,
}
