//! Move enumeration and position evaluation for the minimax search

use crate::{
    board::DIRECTIONS,
    minimax::{MAX_SCORE, MIN_SCORE},
    Board, Location, Player, State,
};

/// The default distance from existing marks within which moves are considered
pub const DEFAULT_RADIUS: usize = 1;

/// The strategy-specific half of a minimax player
///
/// The search engine only decides how to combine scores. Which moves are worth
/// searching and how a position looks once the search stops are up to the
/// heuristic.
pub trait Heuristic {
    /// Estimates how good `board` is for `me`
    ///
    /// Must return [`MAX_SCORE`] if `me` has won, [`MIN_SCORE`] if the opponent
    /// has won, 0 on a draw and a finite value in between otherwise.
    fn estimate(&self, board: &Board, me: Player) -> i32;

    /// The moves the search is willing to consider on `board`
    ///
    /// Must contain at least one move whenever the game is in progress and the
    /// board has an empty cell. Every move must be an empty cell of `board`.
    fn moves(&self, board: &Board) -> Vec<Location>;
}

/// Scores a position by the open lines each player could still complete
///
/// Every window of `run_length` cells holding marks of only one player is
/// worth `10^(k-1)` for `k` marks, positive for `me` and negative for the
/// opponent. Candidate moves are the empty cells within `radius` of a mark.
#[derive(Copy, Clone, Debug)]
pub struct RunHeuristic {
    radius: usize,
}

impl RunHeuristic {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    fn window_score(marks: usize) -> i64 {
        10i64.saturating_pow(marks as u32 - 1)
    }

    fn near_mark(&self, board: &Board, location: Location) -> bool {
        let radius = self.radius as isize;
        (-radius..=radius).any(|dr| {
            (-radius..=radius).any(|dc| {
                board
                    .offset(location, dr, dc, 1)
                    .map_or(false, |near| board.get(near).is_some())
            })
        })
    }
}

impl Default for RunHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl Heuristic for RunHeuristic {
    fn estimate(&self, board: &Board, me: Player) -> i32 {
        match board.state() {
            State::HasWinner if board.winner() == Some(me) => return MAX_SCORE,
            State::HasWinner => return MIN_SCORE,
            State::Draw => return 0,
            State::InProgress => {}
        }

        let run_length = board.run_length();
        let mut total = 0i64;
        for start in board.locations() {
            for &(dr, dc) in DIRECTIONS.iter() {
                // skip windows that run off the board
                if board.offset(start, dr, dc, run_length - 1).is_none() {
                    continue;
                }
                let (mut mine, mut theirs) = (0, 0);
                for step in 0..run_length {
                    match board
                        .offset(start, dr, dc, step)
                        .and_then(|location| board.get(location))
                    {
                        Some(player) if player == me => mine += 1,
                        Some(_) => theirs += 1,
                        None => {}
                    }
                }
                if theirs == 0 && mine > 0 {
                    total = total.saturating_add(Self::window_score(mine));
                } else if mine == 0 && theirs > 0 {
                    total = total.saturating_sub(Self::window_score(theirs));
                }
            }
        }

        // keep heuristic values clear of the win/loss sentinels
        total.max(MIN_SCORE as i64 + 1).min(MAX_SCORE as i64 - 1) as i32
    }

    fn moves(&self, board: &Board) -> Vec<Location> {
        if board.state() != State::InProgress {
            return Vec::new();
        }
        if board.num_moves() == 0 {
            return vec![Location::new(board.rows() / 2, board.columns() / 2)];
        }

        let nearby: Vec<Location> = board
            .empty_locations()
            .filter(|&location| self.near_mark(board, location))
            .collect();
        if nearby.is_empty() {
            board.empty_locations().collect()
        } else {
            nearby
        }
    }
}
