//! A depth-limited minimax player

use anyhow::Result;
use tracing::{debug, info, instrument};

use crate::{heuristic::Heuristic, Board, Controller, Game, Location, Player, State};

/// The score of a position won by the searching player
pub const MAX_SCORE: i32 = i32::MAX;
/// The score of a position lost by the searching player
pub const MIN_SCORE: i32 = i32::MIN;

/// The default number of plies searched below each candidate move
pub const DEFAULT_DEPTH: usize = 2;

/// Where a node's best-so-far score starts before any move is looked at
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Baseline {
    /// Start from 0 and only take strictly better moves.
    ///
    /// Scores below 0 never register for the maximizing side and scores above
    /// 0 never register for the minimizing side.
    Neutral,
    /// Start from the first move's score, like starting from -inf/+inf.
    Unbounded,
}

impl Baseline {
    fn start(self) -> Option<i32> {
        match self {
            Baseline::Neutral => Some(0),
            Baseline::Unbounded => None,
        }
    }
}

impl Default for Baseline {
    fn default() -> Self {
        Baseline::Neutral
    }
}

/// A player that picks moves with a minimax search
///
/// # Notes
/// Every candidate move is rated by searching `depth` plies below it with the
/// heuristic's moves, assuming both sides play their best. Once the plies run
/// out the heuristic's estimate is trusted.
///
/// # Position Scoring
/// Scores are from the point of view of `me`. A drawn node is worth 0 and a
/// node someone has just won is worth [`MAX_SCORE`], since it is only reached
/// right after a move by the side being searched for at that level.
pub struct MinimaxAi<H> {
    me: Player,
    depth: usize,
    heuristic: H,
    baseline: Baseline,
    name: String,

    /// The number of nodes searched by this player so far (for diagnostics only)
    pub node_count: usize,
}

impl<H: Heuristic> MinimaxAi<H> {
    /// Creates a player for `me` searching `depth` plies below each candidate
    pub fn new(me: Player, depth: usize, heuristic: H) -> Self {
        Self {
            me,
            depth,
            heuristic,
            baseline: Baseline::default(),
            name: format!("minimax({})", depth),
            node_count: 0,
        }
    }

    pub fn with_baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Scores `board` for `me` with `plies` left to search and `to_move` placing the next mark
    pub fn score_of(&mut self, board: &Board, plies: usize, to_move: Player) -> Result<i32> {
        self.node_count += 1;

        if plies == 0 {
            return Ok(self.heuristic.estimate(board, self.me));
        }
        match board.state() {
            State::Draw => return Ok(0),
            State::HasWinner => return Ok(MAX_SCORE),
            State::InProgress => {}
        }

        let maximizing = to_move == self.me;
        let mut best = self.baseline.start();
        for candidate in self.heuristic.moves(board) {
            let next = board.update(to_move, candidate)?;
            let score = self.score_of(&next, plies - 1, to_move.opponent())?;

            let improves = match best {
                None => true,
                Some(current) if maximizing => score > current,
                Some(current) => score < current,
            };
            if improves {
                best = Some(score);
            }
        }
        Ok(best.unwrap_or(0))
    }

    /// Chooses a move for `me` on `board`
    ///
    /// Returns `None` when no candidate is ever taken as the best: either the
    /// heuristic offers no candidates, or under [`Baseline::Neutral`] none of
    /// them scores above 0.
    pub fn choose(&mut self, board: &Board) -> Result<Option<Location>> {
        let candidates = self.heuristic.moves(board);

        let mut best_score = self.baseline.start();
        let mut best_move = None;
        for &candidate in candidates.iter() {
            let next = board.update(self.me, candidate)?;
            let score = self.score_of(&next, self.depth, self.me)?;
            debug!(player = %self.me, %candidate, score, "scored candidate");

            if best_score.map_or(true, |current| score > current) {
                best_score = Some(score);
                best_move = Some(candidate);
            }
        }

        info!(
            player = %self.me,
            chosen = ?best_move,
            score = ?best_score,
            candidates = candidates.len(),
            nodes = self.node_count,
            "minimax chose move"
        );
        Ok(best_move)
    }
}

impl<H: Heuristic> Controller for MinimaxAi<H> {
    fn player(&self) -> Player {
        self.me
    }

    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(skip(self, game), fields(player = %self.me, depth = self.depth))]
    fn next_move(&mut self, game: &Game) -> Result<Option<Location>> {
        self.choose(game.board())
    }
}
