use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::test_support::{harness, legal_request, Target};
use super::WinnerOutcome;
use crate::domain::draft_order::turn_count;
use crate::domain::types::{ActionType, GameStatus, SeriesFormat, SeriesStatus, Side};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::{draft_actions, games, series};
use crate::ws::protocol::{ReadyStates, ServerEvent};

fn assert_validation(err: DomainError, expected: ValidationKind) {
    match err {
        DomainError::Validation(kind, _) => assert_eq!(kind, expected),
        other => panic!("expected validation {expected:?}, got {other:?}"),
    }
}

fn assert_conflict(err: DomainError, expected: ConflictKind) {
    match err {
        DomainError::Conflict(kind, _) => assert_eq!(kind, expected),
        other => panic!("expected conflict {expected:?}, got {other:?}"),
    }
}

#[tokio::test]
async fn ready_signals_start_draft_once() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();

    let first = h
        .coordinator
        .set_ready(&game_id, Side::Blue, true)
        .await
        .unwrap();
    assert_eq!(
        first,
        Some(ReadyStates {
            blue: Some(true),
            red: None
        })
    );
    // Repeating a signal is harmless before the start.
    h.coordinator
        .set_ready(&game_id, Side::Blue, true)
        .await
        .unwrap();
    h.coordinator
        .set_ready(&game_id, Side::Red, true)
        .await
        .unwrap();
    // And ignored after it.
    let late = h
        .coordinator
        .set_ready(&game_id, Side::Red, true)
        .await
        .unwrap();
    assert_eq!(late, None);

    assert_eq!(h.recorder.count("draftStart"), 1);
    assert_eq!(h.recorder.count("readyStateUpdate"), 3);

    let game = games::require_game(&h.db, &game_id).await.unwrap();
    assert_eq!(game.status, GameStatus::InProgress);
    let series_row = series::require_series(&h.db, &created.series.id).await.unwrap();
    assert_eq!(series_row.status, SeriesStatus::InProgress);

    let room = h.coordinator.rooms().existing(&game_id).unwrap();
    let state = room.lock().await;
    assert!(state.readiness.is_none());
    let timer = state.timer.as_ref().unwrap();
    assert!(timer.running);
    assert_eq!(timer.remaining, h.coordinator.config().turn_seconds);
}

#[tokio::test]
async fn unready_clears_flag_without_starting() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();

    h.coordinator.set_ready(&game_id, Side::Blue, true).await.unwrap();
    h.coordinator.set_ready(&game_id, Side::Blue, false).await.unwrap();
    let snapshot = h
        .coordinator
        .set_ready(&game_id, Side::Red, true)
        .await
        .unwrap()
        .unwrap();

    assert!(!snapshot.both_ready());
    assert_eq!(h.recorder.count("draftStart"), 0);
    let game = games::require_game(&h.db, &game_id).await.unwrap();
    assert_eq!(game.status, GameStatus::Pending);
}

#[tokio::test]
async fn ready_for_unknown_game_is_not_found() {
    let h = harness().await;
    let err = h
        .coordinator
        .set_ready("missing", Side::Blue, true)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    assert!(h.recorder.events().is_empty());
    assert!(h.coordinator.rooms().existing("missing").is_none());
}

#[tokio::test]
async fn rejected_requests_leave_no_room_behind() {
    let h = harness().await;
    for i in 0..10 {
        let id = format!("ghost-{i}");
        let err = h
            .coordinator
            .submit_action(legal_request(&id, 0, "Ahri"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
        let err = h.coordinator.set_winner(&id, Side::Blue).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    }
    assert!(h.coordinator.rooms().is_empty());

    // Rejections against a real but idle game release it too.
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::InvalidState);
    assert!(h.coordinator.rooms().is_empty());
}

#[tokio::test]
async fn completed_game_room_stays_gone() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;
    h.play(&game_id, 0, turn_count(SeriesFormat::Bo1), "champ").await;
    h.coordinator.set_winner(&game_id, Side::Blue).await.unwrap();
    assert!(h.coordinator.rooms().is_empty());

    let late = h
        .coordinator
        .set_ready(&game_id, Side::Blue, true)
        .await
        .unwrap();
    assert_eq!(late, None);
    assert!(h.coordinator.rooms().is_empty());
}

#[tokio::test]
async fn full_draft_completes_game() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;
    h.recorder.clear();

    h.play(&game_id, 0, turn_count(SeriesFormat::Bo1), "champ").await;

    let actions = draft_actions::list_by_game(&h.db, &game_id).await.unwrap();
    assert_eq!(actions.len(), 20);
    let positions: Vec<i16> = actions.iter().map(|a| a.position).collect();
    assert_eq!(positions, (0..20).collect::<Vec<i16>>());

    let game = games::require_game(&h.db, &game_id).await.unwrap();
    assert_eq!(game.status, GameStatus::DraftComplete);

    assert_eq!(h.recorder.count("draftActionUpdate"), 20);
    let last = h.recorder.events().pop().unwrap();
    assert_eq!(last.0, Target::Room(game_id.clone()));
    match last.1 {
        ServerEvent::GameUpdated(update) => {
            assert_eq!(update.status, GameStatus::DraftComplete);
            assert_eq!(update.winner, None);
        }
        other => panic!("expected gameUpdated, got {other:?}"),
    }

    // Timer stopped and nothing else held: the room is gone.
    assert!(h.coordinator.rooms().existing(&game_id).is_none());

    // Nothing more is accepted once the draft is complete.
    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 19, "extra"))
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::InvalidState);
}

#[tokio::test]
async fn action_before_start_is_rejected() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();

    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::InvalidState);
    assert_eq!(draft_actions::count_by_game(&h.db, &game_id).await.unwrap(), 0);
}

#[tokio::test]
async fn out_of_turn_submissions_are_rejected() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;
    h.recorder.clear();

    // Wrong team for position 0.
    let mut req = legal_request(&game_id, 0, "Ahri");
    req.team = req.team.opposite();
    assert_validation(
        h.coordinator.submit_action(req).await.unwrap_err(),
        ValidationKind::OutOfTurn,
    );

    // Wrong action type.
    let mut req = legal_request(&game_id, 0, "Ahri");
    req.action_type = ActionType::Pick;
    assert_validation(
        h.coordinator.submit_action(req).await.unwrap_err(),
        ValidationKind::OutOfTurn,
    );

    // Skipping ahead.
    let req = legal_request(&game_id, 1, "Ahri");
    assert_validation(
        h.coordinator.submit_action(req).await.unwrap_err(),
        ValidationKind::OutOfTurn,
    );

    assert_eq!(draft_actions::count_by_game(&h.db, &game_id).await.unwrap(), 0);
    assert!(h.recorder.events().is_empty());
}

#[tokio::test]
async fn champion_reuse_and_blank_champion_are_rejected() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;

    h.coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap();
    h.recorder.clear();

    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 1, " Ahri "))
        .await
        .unwrap_err();
    assert_conflict(err, ConflictKind::ChampionUnavailable);

    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 1, "   "))
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::InvalidChampion);

    assert_eq!(draft_actions::count_by_game(&h.db, &game_id).await.unwrap(), 1);
    assert!(h.recorder.events().is_empty());
}

#[tokio::test]
async fn concurrent_submissions_for_one_turn_accept_exactly_one() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;

    let (a, b) = tokio::join!(
        h.coordinator.submit_action(legal_request(&game_id, 0, "Ahri")),
        h.coordinator.submit_action(legal_request(&game_id, 0, "Zed")),
    );
    assert_eq!(
        usize::from(a.is_ok()) + usize::from(b.is_ok()),
        1,
        "a={a:?} b={b:?}"
    );
    assert_eq!(draft_actions::count_by_game(&h.db, &game_id).await.unwrap(), 1);
}

#[tokio::test]
async fn blocked_series_rejects_actions() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;

    h.db.execute_unprepared("UPDATE series SET is_blocked = 1")
        .await
        .unwrap();

    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::SeriesBlocked);
}

#[tokio::test]
async fn fearless_forbids_earlier_picks_but_not_bans() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo3, true, false).await;
    let first_id = created.games[0].id.clone();
    h.start(&first_id).await;
    // Champions g1-0 .. g1-19; picks land on positions 6..=11 and 16..=19.
    h.play(&first_id, 0, 20, "g1-").await;

    let outcome = h.coordinator.set_winner(&first_id, Side::Blue).await.unwrap();
    let WinnerOutcome::NextGame { next, .. } = outcome else {
        panic!("expected a second game");
    };
    h.start(&next.id).await;

    // Banning a champion picked in game 1 is fine.
    h.coordinator
        .submit_action(legal_request(&next.id, 0, "g1-6"))
        .await
        .unwrap();
    // Banning one that was only banned in game 1 is fine too.
    h.coordinator
        .submit_action(legal_request(&next.id, 1, "g1-0"))
        .await
        .unwrap();
    h.play(&next.id, 2, 4, "g2-").await;

    // Position 6 is a pick.
    let err = h
        .coordinator
        .submit_action(legal_request(&next.id, 6, "g1-7"))
        .await
        .unwrap_err();
    assert_conflict(err, ConflictKind::FearlessViolation);

    // A champion banned in game 1 can be picked.
    h.coordinator
        .submit_action(legal_request(&next.id, 6, "g1-1"))
        .await
        .unwrap();
}

#[tokio::test]
async fn non_fearless_series_allows_repeat_picks() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo3, false, false).await;
    let first_id = created.games[0].id.clone();
    h.start(&first_id).await;
    h.play(&first_id, 0, 20, "c").await;

    let WinnerOutcome::NextGame { next, .. } =
        h.coordinator.set_winner(&first_id, Side::Red).await.unwrap()
    else {
        panic!("expected a second game");
    };
    h.start(&next.id).await;
    h.play(&next.id, 0, 20, "c").await;

    let game = games::require_game(&h.db, &next.id).await.unwrap();
    assert_eq!(game.status, GameStatus::DraftComplete);
}

#[tokio::test]
async fn best_of_three_swaps_sides_and_completes() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo3, false, false).await;
    let g1 = created.games[0].clone();
    assert_eq!((g1.blue_side.as_str(), g1.red_side.as_str()), ("Alpha", "Bravo"));

    h.start(&g1.id).await;
    h.play(&g1.id, 0, 20, "a").await;
    h.recorder.clear();

    let WinnerOutcome::NextGame { game, next } =
        h.coordinator.set_winner(&g1.id, Side::Blue).await.unwrap()
    else {
        panic!("expected game 2");
    };
    assert_eq!(game.status, GameStatus::Completed);
    assert_eq!(game.winner, Some(Side::Blue));
    assert_eq!(next.game_number, 2);
    assert_eq!((next.blue_side.as_str(), next.red_side.as_str()), ("Bravo", "Alpha"));
    assert_eq!(next.status, GameStatus::Pending);

    let names = h.recorder.names();
    assert_eq!(names, vec!["gameUpdated", "gameCreated"]);
    assert_eq!(h.recorder.events()[1].0, Target::All);
    assert!(h.coordinator.rooms().existing(&g1.id).is_none());

    // Alpha is red in game 2 and wins again.
    h.start(&next.id).await;
    h.play(&next.id, 0, 20, "b").await;
    h.recorder.clear();

    let WinnerOutcome::SeriesComplete { series: done, .. } =
        h.coordinator.set_winner(&next.id, Side::Red).await.unwrap()
    else {
        panic!("expected series completion");
    };
    assert_eq!(done.status, SeriesStatus::Completed);
    assert_eq!(done.winner, Some(Side::Blue));
    assert_eq!(h.recorder.names(), vec!["gameUpdated", "seriesUpdated"]);

    let all = games::list_by_series(&h.db, &created.series.id).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn scrim_block_plays_every_game() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo3, false, true).await;
    let mut game_id = created.games[0].id.clone();

    for n in 1..=3 {
        h.start(&game_id).await;
        h.play(&game_id, 0, 20, &format!("s{n}-")).await;
        match h.coordinator.set_winner(&game_id, Side::Blue).await.unwrap() {
            WinnerOutcome::NextGame { next, .. } => {
                assert!(n < 3, "game {n} should end the block");
                game_id = next.id;
            }
            WinnerOutcome::SeriesComplete { series: done, .. } => {
                assert_eq!(n, 3, "block ended early at game {n}");
                assert_eq!(done.status, SeriesStatus::Completed);
            }
        }
    }

    let all = games::list_by_series(&h.db, &created.series.id).await.unwrap();
    assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn winner_requires_completed_draft() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;

    let err = h
        .coordinator
        .set_winner(&game_id, Side::Blue)
        .await
        .unwrap_err();
    assert_validation(err, ValidationKind::InvalidState);

    let game = games::require_game(&h.db, &game_id).await.unwrap();
    assert_eq!(game.status, GameStatus::InProgress);
    assert_eq!(game.winner, None);
}

#[tokio::test]
async fn failed_start_keeps_readiness() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();

    h.db.execute_unprepared(
        "CREATE TRIGGER block_game_updates BEFORE UPDATE ON games \
         BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
    )
    .await
    .unwrap();

    h.coordinator.set_ready(&game_id, Side::Blue, true).await.unwrap();
    let err = h
        .coordinator
        .set_ready(&game_id, Side::Red, true)
        .await
        .unwrap_err();
    assert!(err.is_infra(), "{err:?}");

    assert_eq!(h.recorder.count("draftStart"), 0);
    let game = games::require_game(&h.db, &game_id).await.unwrap();
    assert_eq!(game.status, GameStatus::Pending);

    let room = h.coordinator.rooms().existing(&game_id).unwrap();
    let state = room.lock().await;
    assert!(state.readiness.unwrap().both_ready());
    assert!(state.timer.is_none());
}

#[tokio::test]
async fn failed_write_leaves_turn_open() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();
    h.start(&game_id).await;
    h.recorder.clear();

    h.db.execute_unprepared(
        "CREATE TRIGGER block_actions BEFORE INSERT ON draft_actions \
         BEGIN SELECT RAISE(ABORT, 'store unavailable'); END;",
    )
    .await
    .unwrap();

    let err = h
        .coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap_err();
    assert!(err.is_infra(), "{err:?}");
    assert!(h.recorder.events().is_empty());

    h.db.execute_unprepared("DROP TRIGGER block_actions")
        .await
        .unwrap();
    h.coordinator
        .submit_action(legal_request(&game_id, 0, "Ahri"))
        .await
        .unwrap();
    assert_eq!(draft_actions::count_by_game(&h.db, &game_id).await.unwrap(), 1);
}

#[tokio::test]
async fn joining_replays_ephemeral_state() {
    let h = harness().await;
    let created = h.series(SeriesFormat::Bo1, false, false).await;
    let game_id = created.games[0].id.clone();

    let early = Uuid::new_v4();
    let _rx = h.coordinator.registry().register(early);
    h.coordinator.join_game(early, &game_id).await;
    assert!(h.recorder.events().is_empty());

    h.coordinator.set_ready(&game_id, Side::Red, true).await.unwrap();
    h.recorder.clear();

    let late = Uuid::new_v4();
    let _rx2 = h.coordinator.registry().register(late);
    h.coordinator.join_game(late, &game_id).await;

    let events = h.recorder.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, Target::Connection(late));
    match &events[0].1 {
        ServerEvent::ReadyStateUpdate(update) => {
            assert_eq!(update.ready_states.red, Some(true));
            assert_eq!(update.ready_states.blue, None);
        }
        other => panic!("expected readyStateUpdate, got {other:?}"),
    }
    assert_eq!(h.coordinator.registry().room_size(&game_id), 2);

    h.coordinator.set_ready(&game_id, Side::Blue, true).await.unwrap();
    h.recorder.clear();

    let third = Uuid::new_v4();
    let _rx3 = h.coordinator.registry().register(third);
    h.coordinator.join_game(third, &game_id).await;
    let names = h.recorder.names();
    assert_eq!(names, vec!["timerUpdate"]);
}
