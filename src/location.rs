use anyhow::{anyhow, Result};

use std::fmt;
use std::str::FromStr;

/// A cell on the board, addressed by row then column
///
/// Locations order by row first and column second, which is the
/// row-major order boards iterate their cells in.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Location {
    pub row: usize,
    pub col: usize,
}

impl Location {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    /// Parses `"row col"` or `"row,col"`
    fn from_str(input: &str) -> Result<Self> {
        let mut parts = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let mut next_index = |name: &str| -> Result<usize> {
            let part = parts
                .next()
                .ok_or_else(|| anyhow!("missing {} in '{}'", name, input.trim()))?;
            part.parse::<usize>()
                .map_err(|_| anyhow!("could not parse '{}' as a {}", part, name))
        };

        let row = next_index("row")?;
        let col = next_index("column")?;

        if let Some(extra) = parts.next() {
            return Err(anyhow!("unexpected '{}' after location", extra));
        }
        Ok(Self { row, col })
    }
}
