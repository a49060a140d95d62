//! An automated player for five-in-a-row games
//!
//! The player uses a depth-limited minimax search over immutable boards.
//! Which moves are searched and how the search frontier is scored are
//! supplied by a [`Heuristic`](heuristic::Heuristic).
//!
//! # Basic Usage
//!
//! ```
//! use gomoku_ai::{board::Board, heuristic::RunHeuristic, minimax::MinimaxAi, Location, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_rows(&["XXXX.", "OOOO.", ".....", ".....", "....."], 5)?;
//! let mut ai = MinimaxAi::new(Player::X, 1, RunHeuristic::new(1));
//!
//! assert_eq!(ai.choose(&board)?, Some(Location::new(0, 4)));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod location;

pub mod board;

pub mod game;

pub mod controller;

pub mod heuristic;

pub mod minimax;

pub mod scanning;

pub mod series;


pub use board::{Board, Player, State};
pub use controller::Controller;
pub use game::Game;
pub use location::Location;

/// The default number of rows on the game board
pub const ROWS: usize = 9;

/// The default number of columns on the game board
pub const COLUMNS: usize = 9;

/// The default number of marks in a line needed to win
pub const RUN_LENGTH: usize = 5;

// ensure that the default winning run fits on the default board
const_assert!(RUN_LENGTH <= ROWS && RUN_LENGTH <= COLUMNS);
