//! Complete games between computer players

use anyhow::Result;
use indicatif::*;
use rayon::prelude::*;
use tracing::{info, warn};

use std::fmt;
use std::sync::mpsc::channel;
use std::thread;

use crate::{Board, Controller, Game, Location, Player};

/// How a finished game ended
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Won(Player),
    Drawn,
    /// The given player had no move while the game was still in progress
    Stalled(Player),
}

/// Plays `game` to the end with `x` and `o` choosing moves for their sides
pub fn play_out<'c>(
    game: &mut Game,
    x: &mut (dyn Controller + 'c),
    o: &mut (dyn Controller + 'c),
) -> Result<Outcome> {
    loop {
        if let Some(winner) = game.board().winner() {
            return Ok(Outcome::Won(winner));
        }
        if game.board().is_full() {
            return Ok(Outcome::Drawn);
        }

        let mover = game.to_move();
        let controller = if mover == Player::X { &mut *x } else { &mut *o };
        match controller.next_move(game)? {
            Some(location) => {
                game.play(location)?;
            }
            None => return Ok(Outcome::Stalled(mover)),
        }
    }
}

/// Results of a series, counted from the point of view of the two contenders
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tally {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    pub stalled: usize,
}

impl Tally {
    fn record(&mut self, first_is_x: bool, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::Won(winner) if (winner == Player::X) == first_is_x => self.first_wins += 1,
            Outcome::Won(_) => self.second_wins += 1,
            Outcome::Drawn => self.draws += 1,
            Outcome::Stalled(_) => self.stalled += 1,
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: first {} wins, second {} wins, {} draws, {} stalled",
            self.games, self.first_wins, self.second_wins, self.draws, self.stalled
        )
    }
}

/// A series of games between two contenders
///
/// Every empty cell of the starting board is used once as a forced opening
/// move for `X`, with each contender taking the `X` seat in turn, so
/// deterministic players still meet in many different positions.
pub struct Series {
    board: Board,
    show_progress: bool,
}

impl Series {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            show_progress: true,
        }
    }

    pub fn hide_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// The forced opening moves, one per empty cell of the starting board
    pub fn openings(&self) -> Vec<Location> {
        if self.board.winner().is_some() {
            return Vec::new();
        }
        self.board.empty_locations().collect()
    }

    /// Plays the series, building fresh controllers for every game
    pub fn run<A, B>(&self, first: A, second: B) -> Result<Tally>
    where
        A: Fn(Player) -> Box<dyn Controller> + Sync,
        B: Fn(Player) -> Box<dyn Controller> + Sync,
    {
        let games: Vec<(Location, bool)> = self
            .openings()
            .into_iter()
            .flat_map(|opening| vec![(opening, true), (opening, false)])
            .collect();

        let progress = if self.show_progress {
            ProgressBar::new(games.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing series: {bar:40.cyan/blue} {msg} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        let total = games.len();
        let (board, first, second) = (&self.board, &first, &second);
        let (tx, rx) = channel();

        let (outcomes, failure) = thread::scope(|scope| {
            scope.spawn(move || {
                games
                    .par_iter()
                    .for_each_with(tx, |tx, &(opening, first_is_x)| {
                        let outcome = if first_is_x {
                            play_opening(board, opening, first(Player::X), second(Player::O))
                        } else {
                            play_opening(board, opening, second(Player::X), first(Player::O))
                        };
                        // the receiver outlives the scope, so sending cannot fail
                        let _ = tx.send((first_is_x, outcome));
                    });
            });

            // drain every game so the bar and the workers finish together
            let mut outcomes = Vec::with_capacity(total);
            let mut failure = None;
            for (done, (first_is_x, outcome)) in rx.iter().enumerate() {
                match outcome {
                    Ok(outcome) => outcomes.push((first_is_x, outcome)),
                    Err(err) => {
                        warn!(error = %err, "series game failed");
                        failure.get_or_insert(err);
                    }
                }
                progress.inc(1);
                progress.set_message(&format!("({} / {})", done + 1, total));
            }
            (outcomes, failure)
        });

        if let Some(err) = failure {
            progress.abandon();
            return Err(err);
        }
        progress.finish();

        let mut tally = Tally::default();
        for (first_is_x, outcome) in outcomes {
            tally.record(first_is_x, outcome);
        }
        info!(%tally, "series complete");
        Ok(tally)
    }
}

// plays one game of a series from a forced opening move for X
fn play_opening(
    board: &Board,
    opening: Location,
    mut x: Box<dyn Controller>,
    mut o: Box<dyn Controller>,
) -> Result<Outcome> {
    let mut game = Game::new(board.clone());
    game.play(opening)?;

    let outcome = play_out(&mut game, &mut *x, &mut *o)?;
    if let Outcome::Stalled(player) = outcome {
        warn!(%opening, %player, "controller had no move in an unfinished game");
    }
    Ok(outcome)
}
