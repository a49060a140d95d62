use anyhow::{anyhow, bail, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::fmt;
use std::io::{stdout, Write};

use crate::{Location, COLUMNS, ROWS, RUN_LENGTH};

/// The directions a winning run can take: across, down and both diagonals
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    fn mark(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mark())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum State {
    InProgress,
    Draw,
    HasWinner,
}

/// An immutable five-in-a-row board
///
/// Placing a mark with [`update`](Board::update) returns a new board and leaves
/// the original untouched. The dimensions are fixed at construction.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: Vec<Option<Player>>, // cells are stored left-to-right, top-to-bottom
    rows: usize,
    columns: usize,
    run_length: usize,
    num_moves: usize,
    winner: Option<Player>,
}

impl Board {
    /// Creates an empty board with the default dimensions
    pub fn new() -> Self {
        Self::empty(ROWS, COLUMNS, RUN_LENGTH)
    }

    /// Creates an empty board of `rows` by `columns` where `run_length` marks in a line win
    pub fn with_dimensions(rows: usize, columns: usize, run_length: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            bail!("Invalid board, {}x{} has no cells", rows, columns);
        }
        if run_length == 0 || (run_length > rows && run_length > columns) {
            bail!(
                "Invalid board, a run of {} does not fit on {}x{}",
                run_length,
                rows,
                columns
            );
        }
        Ok(Self::empty(rows, columns, run_length))
    }

    fn empty(rows: usize, columns: usize, run_length: usize) -> Self {
        Self {
            cells: vec![None; rows * columns],
            rows,
            columns,
            run_length,
            num_moves: 0,
            winner: None,
        }
    }

    /// Parses a board from one string per row
    ///
    /// `X` and `O` are marks, `.` or `_` is an empty cell and whitespace is ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], run_length: usize) -> Result<Self> {
        let parsed = rows
            .iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        'X' | 'x' => Ok(Some(Player::X)),
                        'O' | 'o' => Ok(Some(Player::O)),
                        '.' | '_' => Ok(None),
                        _ => Err(anyhow!("could not parse '{}' as a cell", c)),
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        let columns = parsed.first().map_or(0, |row| row.len());
        if let Some(row) = parsed.iter().find(|row| row.len() != columns) {
            bail!(
                "Invalid board, row of {} cells in a board {} cells wide",
                row.len(),
                columns
            );
        }

        let mut board = Self::with_dimensions(parsed.len(), columns, run_length)?;
        board.cells = parsed.into_iter().flatten().collect();
        board.num_moves = board.cells.iter().filter(|cell| cell.is_some()).count();

        // a position is only valid if at most one player has completed a run
        let winners: Vec<Player> = board
            .locations()
            .filter_map(|location| {
                let player = board.get(location)?;
                if board.completes_run(location, player) {
                    Some(player)
                } else {
                    None
                }
            })
            .collect();
        if winners.iter().any(|&player| player != winners[0]) {
            bail!("Invalid position, both players have won");
        }
        board.winner = winners.first().copied();
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    pub fn contains(&self, location: Location) -> bool {
        location.row < self.rows && location.col < self.columns
    }

    /// Returns the mark at `location`, `None` for empty or off-board cells
    pub fn get(&self, location: Location) -> Option<Player> {
        if !self.contains(location) {
            return None;
        }
        self.cells[self.index(location)]
    }

    pub fn state(&self) -> State {
        if self.winner.is_some() {
            State::HasWinner
        } else if self.num_moves == self.cells.len() {
            State::Draw
        } else {
            State::InProgress
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == self.cells.len()
    }

    /// Every location on the board in row-major order
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let columns = self.columns;
        (0..self.rows * columns).map(move |i| Location::new(i / columns, i % columns))
    }

    /// Every empty location on the board in row-major order
    pub fn empty_locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.locations().filter(move |&location| self.get(location).is_none())
    }

    /// Checks that a mark may be placed at `location`
    pub fn validate(&self, location: Location) -> Result<()> {
        if !self.contains(location) {
            bail!(
                "Invalid move, {} out of range. Rows must be below {} and columns below {}",
                location,
                self.rows,
                self.columns
            );
        }
        if let Some(player) = self.get(location) {
            bail!("Invalid move, {} already taken by {}", location, player);
        }
        Ok(())
    }

    /// Returns a new board with `player`'s mark at `location`
    pub fn update(&self, player: Player, location: Location) -> Result<Self> {
        self.validate(location)?;

        let mut next = self.clone();
        let index = next.index(location);
        next.cells[index] = Some(player);
        next.num_moves += 1;
        if next.winner.is_none() && next.completes_run(location, player) {
            next.winner = Some(player);
        }
        Ok(next)
    }

    /// Steps `steps` cells from `location` in direction `(dr, dc)`, `None` if that leaves the board
    pub fn offset(&self, location: Location, dr: isize, dc: isize, steps: usize) -> Option<Location> {
        let row = location.row as isize + dr * steps as isize;
        let col = location.col as isize + dc * steps as isize;
        if row < 0 || row >= self.rows as isize || col < 0 || col >= self.columns as isize {
            return None;
        }
        Some(Location::new(row as usize, col as usize))
    }

    fn index(&self, location: Location) -> usize {
        location.row * self.columns + location.col
    }

    // does the line through `location` hold a full run of `player`'s marks?
    fn completes_run(&self, location: Location, player: Player) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            let mut run = 1;
            for &sign in [-1isize, 1].iter() {
                let mut steps = 1;
                while let Some(next) = self.offset(location, sign * dr, sign * dc, steps) {
                    if self.get(next) != Some(player) {
                        break;
                    }
                    run += 1;
                    steps += 1;
                }
            }
            run >= self.run_length
        })
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let header: String = (0..self.columns).map(|col| format!("{:>2}", col % 100)).collect();
        stdout.queue(PrintStyledContent(style(format!("   {}\n", header))))?;

        for row in 0..self.rows {
            stdout.queue(PrintStyledContent(style(format!("{:>2} ", row))))?;
            for col in 0..self.columns {
                let cell = self.get(Location::new(row, col));
                let mark = cell.map_or('.', Player::mark);
                stdout.queue(PrintStyledContent(
                    style(format!(" {}", mark))
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Some(Player::X) => Color::Red,
                            Some(Player::O) => Color::Yellow,
                            None => Color::Grey,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.columns)
                .map(|col| self.get(Location::new(row, col)).map_or('.', Player::mark))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
