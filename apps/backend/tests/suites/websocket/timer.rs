// Turn countdown as seen by clients

use std::time::Duration;

use draft_backend::domain::SeriesFormat;

use super::helpers::{create_series, play_actions, start_draft};
use crate::support::app_builder::{build_test_state_with, fast_timer_config};
use crate::support::websocket::start_test_server;
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn countdown_ticks_and_resets_after_an_action() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with(fast_timer_config(3)).await?;
    let created = create_series(&state, SeriesFormat::Bo1, false).await?;
    let game_id = created.games[0].id.clone();
    let server = start_test_server(state).await?;

    let mut client = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;
    client.join_game(&game_id).await?;
    start_draft(&mut client, &game_id).await?;

    let first = client.wait_for("timerUpdate").await?;
    assert_eq!(first["timeRemaining"], 2);

    play_actions(&mut client, &game_id, 0, 1, "t").await?;
    let after_reset = client.wait_for("timerUpdate").await?;
    assert_eq!(after_reset["timeRemaining"], 2);

    // Expiry stops at zero and nothing is auto-submitted.
    let mut last = after_reset["timeRemaining"].as_u64().unwrap_or_default();
    while last > 0 {
        last = client.wait_for("timerUpdate").await?["timeRemaining"]
            .as_u64()
            .unwrap_or_default();
    }
    let after_expiry = client.drain(Duration::from_millis(300)).await;
    assert!(after_expiry.is_empty(), "unexpected frames: {after_expiry:?}");

    // A late joiner sees the frozen clock.
    let mut late = WebSocketClient::connect_retry(&server.ws_url(), Duration::from_secs(1)).await?;
    late.join_game(&game_id).await?;
    let replay = late.wait_for("timerUpdate").await?;
    assert_eq!(replay["timeRemaining"], 0);

    client.close().await?;
    late.close().await?;
    server.stop().await;
    Ok(())
}
