use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use gomoku_ai::{
    heuristic::{RunHeuristic, DEFAULT_RADIUS},
    minimax::{Baseline, MinimaxAi, DEFAULT_DEPTH},
    scanning::FirstEmpty,
    series::Series,
    *,
};

/// Five-in-a-row against a minimax player
#[derive(Parser, Debug)]
#[command(name = "gomoku")]
#[command(about = "Play five-in-a-row against a minimax AI", long_about = None)]
#[command(version)]
struct Cli {
    /// Number of rows on the board
    #[arg(long, global = true, default_value_t = ROWS)]
    rows: usize,

    /// Number of columns on the board
    #[arg(long, global = true, default_value_t = COLUMNS)]
    columns: usize,

    /// Number of marks in a line needed to win
    #[arg(long, global = true, default_value_t = RUN_LENGTH)]
    run_length: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a game in the terminal
    Play {
        /// Who plays X (moves first)
        #[arg(long = "x", value_enum, default_value_t = Kind::Human)]
        x_player: Kind,

        /// Who plays O
        #[arg(long = "o", value_enum, default_value_t = Kind::Minimax)]
        o_player: Kind,

        /// Pause before each first-empty move, in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Play every opening twice between two computer players
    Series {
        /// The first contender
        #[arg(long, value_enum, default_value_t = Kind::Minimax)]
        first: Kind,

        /// The second contender
        #[arg(long, value_enum, default_value_t = Kind::Scan)]
        second: Kind,

        /// Hide the progress bar
        #[arg(long)]
        quiet: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
struct EngineArgs {
    /// Plies searched below each candidate move
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    depth: usize,

    /// Only consider moves this close to an existing mark
    #[arg(long, default_value_t = DEFAULT_RADIUS)]
    radius: usize,

    /// Start every search node from -inf/+inf instead of 0
    #[arg(long)]
    unbounded: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Human,
    Minimax,
    Scan,
}

/// A player typing moves at the terminal
struct Human {
    me: Player,
    name: String,
}

impl Human {
    fn new(me: Player) -> Self {
        Self {
            me,
            name: format!("human({})", me),
        }
    }
}

impl Controller for Human {
    fn player(&self) -> Player {
        self.me
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, game: &Game) -> Result<Option<Location>> {
        let stdin = stdin();
        loop {
            print!("Player {} move (row col) > ", self.me);
            stdout().flush()?;

            let mut input = String::new();
            // end of input resigns the game
            if stdin.read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match input
                .parse::<Location>()
                .and_then(|location| game.board().validate(location).map(|_| location))
            {
                Ok(location) => return Ok(Some(location)),
                Err(err) => println!("{}", err),
            }
        }
    }
}

fn controller(kind: Kind, player: Player, engine: EngineArgs, delay: Duration) -> Box<dyn Controller> {
    match kind {
        Kind::Human => Box::new(Human::new(player)),
        Kind::Minimax => {
            let baseline = if engine.unbounded {
                Baseline::Unbounded
            } else {
                Baseline::Neutral
            };
            Box::new(
                MinimaxAi::new(player, engine.depth, RunHeuristic::new(engine.radius))
                    .with_baseline(baseline),
            )
        }
        Kind::Scan if delay.as_millis() > 0 => Box::new(FirstEmpty::new(player).with_delay(delay)),
        Kind::Scan => Box::new(FirstEmpty::new(player)),
    }
}

fn play(board: Board, kinds: [Kind; 2], engine: EngineArgs, delay: Duration) -> Result<()> {
    let mut game = Game::new(board);
    let mut seats = [
        controller(kinds[0], Player::X, engine, delay),
        controller(kinds[1], Player::O, engine, delay),
    ];

    println!("Welcome to five-in-a-row\n");

    // game loop
    loop {
        game.board().display()?;

        match game.board().state() {
            State::InProgress => {
                let mover = game.to_move();
                let seat = if mover == Player::X { 0 } else { 1 };

                if kinds[seat] != Kind::Human {
                    println!("{} is thinking...", seats[seat].name());
                    stdout().flush()?;
                }

                match seats[seat].next_move(&game)? {
                    Some(location) => {
                        println!("Player {} plays {}", mover, location);
                        game.play(location)?;
                    }
                    None => {
                        println!("Player {} has no move, game abandoned", mover);
                        break;
                    }
                }
            }

            // end states
            State::HasWinner => {
                if let Some(winner) = game.board().winner() {
                    println!("Player {} wins!", winner);
                }
                break;
            }
            State::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    info!(moves = game.history().len(), "game over");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let board = Board::with_dimensions(cli.rows, cli.columns, cli.run_length)?;

    match cli.command {
        Command::Play {
            x_player,
            o_player,
            delay_ms,
            engine,
        } => play(board, [x_player, o_player], engine, Duration::from_millis(delay_ms)),

        Command::Series {
            first,
            second,
            quiet,
            engine,
        } => {
            if first == Kind::Human || second == Kind::Human {
                bail!("a series is played between computer players only");
            }

            let mut series = Series::new(board);
            if quiet {
                series = series.hide_progress();
            }
            let tally = series.run(
                |player| controller(first, player, engine, Duration::default()),
                |player| controller(second, player, engine, Duration::default()),
            )?;

            println!(
                "{} vs {}: {}",
                format!("{:?}", first).to_lowercase(),
                format!("{:?}", second).to_lowercase(),
                tally
            );
            Ok(())
        }
    }
}
