//! A player that takes the first free cell

use anyhow::Result;
use tracing::{debug, instrument};

use std::time::Duration;

use crate::{Board, Controller, Game, Location, Player};

/// Always plays the empty cell with the smallest row, then the smallest column
///
/// Its moves are fully predictable, which makes it a useful opponent when
/// testing other players.
#[derive(Clone, Debug)]
pub struct FirstEmpty {
    me: Player,
    delay: Option<Duration>,
}

impl FirstEmpty {
    pub fn new(me: Player) -> Self {
        Self { me, delay: None }
    }

    /// Waits `delay` before every move so games between computer players can be followed
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// The first empty cell of `board` in row-major order
    pub fn choose(board: &Board) -> Option<Location> {
        board.empty_locations().next()
    }
}

impl Controller for FirstEmpty {
    fn player(&self) -> Player {
        self.me
    }

    fn name(&self) -> &str {
        "first-empty"
    }

    #[instrument(skip(self, game), fields(player = %self.me))]
    fn next_move(&mut self, game: &Game) -> Result<Option<Location>> {
        let chosen = Self::choose(game.board());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        debug!(chosen = ?chosen, "first empty cell");
        Ok(chosen)
    }
}
