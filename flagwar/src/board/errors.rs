//! Errors used by the [`Board`][crate::board::Board] and
//! [`BoardSetup`][crate::board::BoardSetup].

use thiserror::Error;

use crate::{
    board::Coordinate,
    ships::{AddShipError, ShipId, Side},
};

/// Reason why a ship or flag could not be placed on a cell.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotPlaceReason {
    /// Only regular cells accept ships and flags.
    #[error("the cell is not regular terrain")]
    NotRegular,
    /// The cell already holds a ship or a flag.
    #[error("the cell is already occupied")]
    Occupied,
    /// The side's flag was already placed elsewhere.
    #[error("the flag was already placed")]
    FlagAlreadyPlaced,
}

/// Error returned by cell-level board operations.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// The coordinate lies outside the board.
    #[error("coordinate {0} is out of bounds")]
    OutOfBounds(Coordinate),

    /// A ship, flag or terrain could not be placed at the coordinate.
    #[error("could not place at {coord}: {reason}")]
    InvalidPlacement {
        coord: Coordinate,
        reason: CannotPlaceReason,
    },
}

impl BoardError {
    pub(crate) fn placement(coord: Coordinate, reason: CannotPlaceReason) -> Self {
        BoardError::InvalidPlacement { coord, reason }
    }
}

/// Error returned when a whole round's board could not be constructed.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum SetupError {
    /// Width or height was zero or too large.
    #[error("invalid board dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A snapshot had no rows.
    #[error("board snapshot is empty")]
    EmptySnapshot,

    /// A snapshot contained a symbol outside the board alphabet.
    #[error("unknown board symbol {symbol:?} at {coord}")]
    UnknownSymbol { symbol: char, coord: Coordinate },

    /// A ship appeared more than once.
    #[error(transparent)]
    DuplicateShip(#[from] AddShipError),

    /// A side's flag appeared more than once.
    #[error("flag of {0} appears more than once")]
    DuplicateFlag(Side),

    /// A side had no flag.
    #[error("flag of {0} is missing")]
    MissingFlag(Side),

    /// A side had no ships.
    #[error("{0} has no ships")]
    MissingShips(Side),

    /// Random placement found no free regular cell in a side's home rows.
    #[error("no free cell left for {0} in its home rows")]
    NoFreeCell(Side),

    /// A cell-level placement failed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl SetupError {
    /// Get the ship involved in the error, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            SetupError::DuplicateShip(err) => Some(err.id()),
            _ => None,
        }
    }
}
