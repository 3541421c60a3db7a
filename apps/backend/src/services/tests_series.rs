use crate::config::db::DbKind;
use crate::domain::types::{GameStatus, SeriesFormat, SeriesStatus};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::infra::db::bootstrap_db;
use crate::services::series::{CreateSeriesRequest, SeriesService};

fn request(team1: &str, team2: &str) -> CreateSeriesRequest {
    CreateSeriesRequest {
        team1_name: team1.into(),
        team2_name: team2.into(),
        format: SeriesFormat::Bo3,
        fearless_draft: true,
        scrim_block: false,
    }
}

#[tokio::test]
async fn creates_series_with_first_game() {
    let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
    let created = SeriesService
        .create_series(&db, request("  Alpha ", "Bravo"))
        .await
        .unwrap();

    assert_eq!(created.series.team1_name, "Alpha");
    assert_eq!(created.series.status, SeriesStatus::Pending);
    assert!(created.series.fearless_draft);
    assert_ne!(created.team1_auth_token, created.team2_auth_token);

    assert_eq!(created.games.len(), 1);
    let first = &created.games[0];
    assert_eq!(first.game_number, 1);
    assert_eq!(first.blue_side, "Alpha");
    assert_eq!(first.red_side, "Bravo");
    assert_eq!(first.status, GameStatus::Pending);
}

#[tokio::test]
async fn tokens_only_appear_in_creation_response() {
    let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
    let created = SeriesService
        .create_series(&db, request("Alpha", "Bravo"))
        .await
        .unwrap();

    let body = serde_json::to_value(&created).unwrap();
    assert_eq!(body["team1AuthToken"], created.team1_auth_token.as_str());
    assert_eq!(body["format"], "BO3");
    assert_eq!(body["games"][0]["blueSide"], "Alpha");

    let detail = SeriesService
        .get_series_detail(&db, &created.series.id)
        .await
        .unwrap();
    let body = serde_json::to_value(&detail).unwrap();
    assert!(body.get("team1AuthToken").is_none());
    assert!(body.get("team2AuthToken").is_none());
    assert_eq!(body["games"][0]["actions"], serde_json::json!([]));
}

#[tokio::test]
async fn duplicate_names_are_rejected_without_writing() {
    let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
    let err = SeriesService
        .create_series(&db, request("Team One", "team  one"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidTeamName, _)
    ));
}

#[tokio::test]
async fn unknown_series_is_not_found() {
    let db = bootstrap_db(DbKind::SqliteMemory).await.unwrap();
    let err = SeriesService
        .get_series_detail(&db, "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Series, _)));
}
