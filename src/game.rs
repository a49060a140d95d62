use anyhow::{bail, Result};

use crate::{Board, Location, Player, State};

/// The board of a game in progress and the player whose turn it is
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<Location>,
}

impl Game {
    /// Starts a game on `board` with `X` to move
    pub fn new(board: Board) -> Self {
        Self::with_first_player(board, Player::X)
    }

    pub fn with_first_player(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// The locations played so far, oldest first
    pub fn history(&self) -> &[Location] {
        &self.history
    }

    /// Places the mark of the player to move at `location` and passes the turn
    pub fn play(&mut self, location: Location) -> Result<State> {
        if self.board.state() != State::InProgress {
            bail!("Invalid move, the game is already over");
        }
        self.board = self.board.update(self.to_move, location)?;
        self.history.push(location);
        self.to_move = self.to_move.opponent();

        Ok(self.board.state())
    }
}
