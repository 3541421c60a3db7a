//! Series progression: who has won how many games, and what happens after a
//! game result is recorded.
//!
//! Games record their winner as the side (BLUE/RED) the winning team played
//! on; sides swap every game, so wins are tallied per team by mapping the
//! side back through each game's `blue_side`/`red_side`. The series-level
//! winner is expressed as a side relative to game 1: BLUE is team1, RED is
//! team2.

use crate::domain::types::{SeriesFormat, Side};

/// A completed game as seen by the progression rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult<'a> {
    pub blue_side: &'a str,
    pub red_side: &'a str,
    pub winner: Side,
}

impl<'a> GameResult<'a> {
    pub fn winning_team(&self) -> &'a str {
        match self.winner {
            Side::Blue => self.blue_side,
            Side::Red => self.red_side,
        }
    }
}

/// The parts of a series the rules care about.
#[derive(Debug, Clone, Copy)]
pub struct SeriesView<'a> {
    pub team1: &'a str,
    pub team2: &'a str,
    pub format: SeriesFormat,
    pub scrim_block: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WinTally {
    pub team1: u32,
    pub team2: u32,
}

impl WinTally {
    pub fn total(&self) -> u32 {
        self.team1 + self.team2
    }

    /// Series-level side of the team with more wins; team1 on a tie.
    pub fn leader(&self) -> Side {
        if self.team1 >= self.team2 {
            Side::Blue
        } else {
            Side::Red
        }
    }

    pub fn wins_for(&self, side: Side) -> u32 {
        match side {
            Side::Blue => self.team1,
            Side::Red => self.team2,
        }
    }
}

/// Count wins per team over completed games.
///
/// A game whose winning team matches neither name is ignored.
pub fn tally_wins(series: &SeriesView<'_>, results: &[GameResult<'_>]) -> WinTally {
    results
        .iter()
        .fold(WinTally::default(), |mut tally, result| {
            let team = result.winning_team();
            if team == series.team1 {
                tally.team1 += 1;
            } else if team == series.team2 {
                tally.team2 += 1;
            }
            tally
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progression {
    /// Create another game with sides swapped relative to the last one.
    NextGame {
        game_number: i32,
        blue_side: String,
        red_side: String,
    },
    /// Close the series.
    Complete { winner: Side },
}

/// Decide what follows the game that was just completed.
///
/// `results` holds every completed game of the series including `last`;
/// `games_created` is the number of game rows the series owns.
pub fn next_step(
    series: &SeriesView<'_>,
    results: &[GameResult<'_>],
    last: &GameResult<'_>,
    games_created: usize,
) -> Progression {
    let tally = tally_wins(series, results);
    let needed = series.format.games_needed();
    let max = series.format.max_games();

    if !series.scrim_block {
        for side in [Side::Blue, Side::Red] {
            if tally.wins_for(side) >= needed {
                return Progression::Complete { winner: side };
            }
        }
    }

    // Never create more games than the format allows.
    if tally.total() >= max || games_created as u32 >= max {
        return Progression::Complete {
            winner: tally.leader(),
        };
    }

    Progression::NextGame {
        game_number: games_created as i32 + 1,
        blue_side: last.red_side.to_string(),
        red_side: last.blue_side.to_string(),
    }
}
