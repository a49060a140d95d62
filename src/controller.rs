//! The seat a player occupies in a game

use anyhow::Result;

use crate::{Game, Location, Player};

/// Anything that can choose moves for one side of a game
pub trait Controller {
    /// The side this controller plays
    fn player(&self) -> Player;

    /// A short label for logs and result tables
    fn name(&self) -> &str;

    /// Chooses where to play on the current board of `game`
    ///
    /// Returns `Ok(None)` when there is no move to make. Errors are reserved
    /// for broken contracts, such as a candidate the board rejects.
    fn next_move(&mut self, game: &Game) -> Result<Option<Location>>;
}
