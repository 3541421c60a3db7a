//! Property tests for series progression (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::series_rules::{next_step, GameResult, Progression, SeriesView};
use crate::domain::test_prelude;
use crate::domain::types::{SeriesFormat, Side};

const T1: &str = "Alpha";
const T2: &str = "Bravo";

fn format_strategy() -> impl Strategy<Value = SeriesFormat> {
    prop_oneof![
        Just(SeriesFormat::Bo1),
        Just(SeriesFormat::Bo3),
        Just(SeriesFormat::Bo5),
    ]
}

/// Play a series to its end by feeding results one game at a time.
///
/// `team1_wins[i]` decides game i+1. Returns the number of games played and
/// the final decision.
fn play_out(series: &SeriesView<'_>, team1_wins: &[bool]) -> (usize, Progression) {
    let mut results: Vec<GameResult<'_>> = Vec::new();
    let mut blue = series.team1;
    let mut red = series.team2;

    for (i, &t1_won) in team1_wins.iter().enumerate() {
        let winner_team = if t1_won { series.team1 } else { series.team2 };
        let winner = if winner_team == blue {
            Side::Blue
        } else {
            Side::Red
        };
        let last = GameResult {
            blue_side: blue,
            red_side: red,
            winner,
        };
        results.push(last);

        match next_step(series, &results, &last, i + 1) {
            Progression::NextGame {
                game_number,
                ref blue_side,
                ref red_side,
            } => {
                assert_eq!(game_number as usize, i + 2);
                assert_eq!(blue_side, red);
                assert_eq!(red_side, blue);
                std::mem::swap(&mut blue, &mut red);
            }
            done @ Progression::Complete { .. } => return (i + 1, done),
        }
    }
    panic!("series did not complete within {} games", team1_wins.len());
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// A series always completes within max_games, and the winner has won
    /// at least games_needed.
    #[test]
    fn prop_series_completes_within_format(
        format in format_strategy(),
        outcomes in prop::collection::vec(any::<bool>(), 5),
    ) {
        let series = SeriesView { team1: T1, team2: T2, format, scrim_block: false };
        let (played, decision) = play_out(&series, &outcomes);
        prop_assert!(played as u32 <= format.max_games());

        let Progression::Complete { winner } = decision else {
            unreachable!();
        };
        let wins = outcomes[..played]
            .iter()
            .filter(|&&t1| t1 == (winner == Side::Blue))
            .count() as u32;
        prop_assert_eq!(wins, format.games_needed());
    }

    /// With scrimBlock every game of the format is played.
    #[test]
    fn prop_scrim_block_plays_max_games(
        format in format_strategy(),
        outcomes in prop::collection::vec(any::<bool>(), 5),
    ) {
        let series = SeriesView { team1: T1, team2: T2, format, scrim_block: true };
        let (played, decision) = play_out(&series, &outcomes);
        prop_assert_eq!(played as u32, format.max_games());

        let team1_wins = outcomes[..played].iter().filter(|&&t1| t1).count();
        let expected = if team1_wins * 2 > played { Side::Blue } else { Side::Red };
        prop_assert_eq!(decision, Progression::Complete { winner: expected });
    }
}
