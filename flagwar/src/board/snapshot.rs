//! Text view of a board, one symbol per cell.
//!
//! The alphabet is shared by board files and by the live board:
//!
//! | symbol      | meaning                 |
//! |-------------|-------------------------|
//! | `' '`       | regular cell            |
//! | `'S'`       | sea                     |
//! | `'T'`       | forest                  |
//! | `'A'`/`'B'` | flag of player A / B    |
//! | `'1'`-`'3'` | ship of player A        |
//! | `'7'`-`'9'` | ship of player B        |
use std::fmt;

use crate::board::{Board, BoardError, Coordinate, Dimensions, SetupError, Terrain};

/// A grid of board symbols.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardSnapshot {
    dim: Dimensions,
    symbols: Box<[char]>,
}

impl BoardSnapshot {
    /// Create a snapshot of the given size filled with regular cells.
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        let dim = Dimensions::try_new(width, height)
            .ok_or(SetupError::InvalidDimensions { width, height })?;
        Ok(Self {
            dim,
            symbols: vec![Terrain::Regular.symbol(); dim.total_size()].into_boxed_slice(),
        })
    }

    /// Build a snapshot from text rows. The width is that of the longest row; shorter
    /// rows are padded with regular cells. Trailing carriage returns are ignored.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, SetupError> {
        let width = rows
            .iter()
            .map(|row| row.as_ref().trim_end_matches('\r').chars().count())
            .max()
            .unwrap_or(0);
        Self::from_rows_sized(width, rows.len(), rows)
    }

    /// Build a snapshot of a fixed size from text rows. Rows and columns beyond the size
    /// are dropped; missing ones are regular cells.
    pub fn from_rows_sized<S: AsRef<str>>(
        width: usize,
        height: usize,
        rows: &[S],
    ) -> Result<Self, SetupError> {
        if rows.is_empty() {
            return Err(SetupError::EmptySnapshot);
        }
        let mut snapshot = Self::new(width, height)?;
        for (y, row) in rows.iter().take(height).enumerate() {
            let row = row.as_ref().trim_end_matches('\r');
            for (x, symbol) in row.chars().take(width).enumerate() {
                snapshot.symbols[y * width + x] = symbol;
            }
        }
        Ok(snapshot)
    }

    /// Capture the symbols currently shown on a board.
    pub fn of_board(board: &Board) -> Self {
        let dim = *board.dimensions();
        let symbols = dim
            .iter_coordinates()
            .flatten()
            .map(|coord| board.symbol_at(coord).unwrap_or(' '))
            .collect();
        Self { dim, symbols }
    }

    /// Get the [`Dimensions`] of this snapshot.
    pub fn dimensions(&self) -> &Dimensions {
        &self.dim
    }

    /// The symbol at `coord`, or `None` if it is out of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<char> {
        self.dim
            .try_linearize(&coord)
            .map(|i| self.symbols[i])
    }

    /// Replace the symbol at `coord`.
    pub fn set(&mut self, coord: Coordinate, symbol: char) -> Result<(), BoardError> {
        let i = self
            .dim
            .try_linearize(&coord)
            .ok_or(BoardError::OutOfBounds(coord))?;
        self.symbols[i] = symbol;
        Ok(())
    }

    /// Get an iterator over every coordinate and its symbol, row by row.
    pub fn iter(&self) -> impl '_ + Iterator<Item = (Coordinate, char)> {
        let dim = self.dim;
        self.symbols
            .iter()
            .enumerate()
            .map(move |(i, &symbol)| (dim.un_linearize(i), symbol))
    }

    /// Get an iterator over the rows as strings.
    pub fn rows(&self) -> impl '_ + Iterator<Item = String> {
        self.symbols
            .chunks(self.dim.width())
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(&row)?;
        }
        Ok(())
    }
}
