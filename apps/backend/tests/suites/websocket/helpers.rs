// Fixtures shared by the websocket suites

use draft_backend::domain::{expected_turn, SeriesFormat};
use draft_backend::services::series::{CreateSeriesRequest, CreatedSeries};
use draft_backend::state::app_state::AppState;
use serde_json::{json, Value};

use crate::support::websocket_client::WebSocketClient;

pub async fn create_series(
    state: &AppState,
    format: SeriesFormat,
    fearless: bool,
) -> Result<CreatedSeries, Box<dyn std::error::Error>> {
    let (team1, team2) = backend_test_support::unique_helpers::unique_team_names("ws");
    let created = state
        .series()
        .create_series(
            state.db(),
            CreateSeriesRequest {
                team1_name: team1,
                team2_name: team2,
                format,
                fearless_draft: fearless,
                scrim_block: false,
            },
        )
        .await?;
    Ok(created)
}

/// `draftAction` payload for the legal turn at `position`.
pub fn action_data(game_id: &str, position: usize, champion: &str) -> Value {
    let turn = expected_turn(SeriesFormat::Bo1, position).expect("position within draft");
    json!({
        "gameId": game_id,
        "type": turn.action,
        "phase": turn.phase,
        "team": turn.team,
        "champion": champion,
        "position": position,
    })
}

/// Both sides ready; returns once `draftStart` reached `client`.
pub async fn start_draft(
    client: &mut WebSocketClient,
    game_id: &str,
) -> Result<Value, Box<dyn std::error::Error>> {
    client.ready(game_id, "BLUE", true).await?;
    client.ready(game_id, "RED", true).await?;
    client.wait_for("draftStart").await
}

/// Play `count` legal actions, waiting for each echo before the next.
pub async fn play_actions(
    client: &mut WebSocketClient,
    game_id: &str,
    from: usize,
    count: usize,
    prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    for position in from..from + count {
        client
            .send_event(
                "draftAction",
                action_data(game_id, position, &format!("{prefix}{position}")),
            )
            .await?;
        let update = client.wait_for("draftActionUpdate").await?;
        assert_eq!(update["action"]["position"], position);
    }
    Ok(())
}
