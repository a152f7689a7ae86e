use thiserror::Error;

use crate::{
    board::{Coordinate, Terrain},
    ships::ShipId,
};

/// Reason why a step was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum IllegalMoveReason {
    /// The destination is not one orthogonal step from the ship.
    #[error("destination is not next to the ship")]
    NotAdjacent,

    /// The destination lies outside the board.
    #[error("destination is off the board")]
    OutOfBounds,

    /// The destination is sea or forest.
    #[error("destination is {0:?}")]
    Terrain(Terrain),

    /// The destination holds another ship of the same side.
    #[error("destination is held by own {0}")]
    OwnShip(ShipId),
}

/// Error returned when a proposed move cannot be played. Either kind only wastes the
/// turn; the board is left untouched.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MoveError {
    /// No living ship of the acting side stands at the move's origin.
    #[error("no living ship of the acting side at {0}")]
    InvalidShip(Coordinate),

    /// The ship cannot step to the destination.
    #[error("illegal move: {0}")]
    IllegalMove(#[source] IllegalMoveReason),
}

/// Inconsistency between the board and the ship registry. Reaching one is a bug.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum InvariantViolation {
    /// A cell refers to a ship the registry does not know.
    #[error("cell {coord} holds unregistered ship number {id:?}")]
    UnknownOccupant { coord: Coordinate, id: ShipId },

    /// A cell refers to a destroyed ship.
    #[error("cell {coord} holds destroyed {id}")]
    DeadOccupant { coord: Coordinate, id: ShipId },

    /// A cell refers to a ship the registry places elsewhere.
    #[error("cell {coord} holds {id}, which is recorded at {recorded}")]
    Misplaced {
        coord: Coordinate,
        id: ShipId,
        recorded: Coordinate,
    },

    /// A living ship is not found in the cell it is recorded at.
    #[error("living {id} is missing from its cell {recorded}")]
    Homeless { id: ShipId, recorded: Coordinate },
}
