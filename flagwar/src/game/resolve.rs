//! Validation and application of a single move.
use log::debug;

use crate::{
    board::{Board, Coordinate, Terrain},
    game::{GameMove, IllegalMoveReason, InvariantViolation, MoveError},
    ships::{CombatResult, ShipId, ShipRegistry, Side},
};

/// What a successfully played move did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MoveOutcome {
    /// The ship stayed where it was.
    Passed { ship: ShipId, at: Coordinate },

    /// The ship stepped into an empty cell.
    Moved {
        ship: ShipId,
        from: Coordinate,
        to: Coordinate,
    },

    /// The ship attacked the opposing ship holding its destination.
    Combat {
        attacker: ShipId,
        defender: ShipId,
        at: Coordinate,
        result: CombatResult,
    },

    /// The ship reached the opponent's flag, defeating its guard first if there was one.
    FlagCaptured {
        ship: ShipId,
        at: Coordinate,
        defeated: Option<ShipId>,
    },
}

impl MoveOutcome {
    /// The ship that made the move.
    pub fn ship(&self) -> ShipId {
        match *self {
            MoveOutcome::Passed { ship, .. }
            | MoveOutcome::Moved { ship, .. }
            | MoveOutcome::FlagCaptured { ship, .. } => ship,
            MoveOutcome::Combat { attacker, .. } => attacker,
        }
    }
}

/// Validate `mv` for `side` and apply it. Nothing is changed unless the move is legal.
///
/// Checks, in order: a living ship of `side` stands at `mv.from`; `mv.to` is `mv.from`
/// or one orthogonal step from it; `mv.to` is on the board and regular; `mv.to` is not
/// held by another ship of `side`.
pub(super) fn resolve_move(
    board: &mut Board,
    ships: &mut ShipRegistry,
    side: Side,
    mv: GameMove,
) -> Result<MoveOutcome, MoveError> {
    let id = board
        .occupant(mv.from)
        .filter(|id| id.side() == side)
        .filter(|&id| ships.get(id).map_or(false, |ship| ship.alive()))
        .ok_or(MoveError::InvalidShip(mv.from))?;

    if mv.is_pass() {
        ships.hold_ship(id);
        debug!("[Resolver] {} holds at {}", id, mv.from);
        return Ok(MoveOutcome::Passed {
            ship: id,
            at: mv.from,
        });
    }

    if !mv.from.is_adjacent(&mv.to) {
        return Err(MoveError::IllegalMove(IllegalMoveReason::NotAdjacent));
    }
    match board.terrain(mv.to) {
        None => return Err(MoveError::IllegalMove(IllegalMoveReason::OutOfBounds)),
        Some(Terrain::Regular) => {}
        Some(other) => return Err(MoveError::IllegalMove(IllegalMoveReason::Terrain(other))),
    }

    let enemy_flag = board.flag(side.opponent()) == Some(mv.to);
    let outcome = match board.occupant(mv.to) {
        Some(other) if other.side() == side => {
            return Err(MoveError::IllegalMove(IllegalMoveReason::OwnShip(other)));
        }
        Some(defender) => {
            let result = id.rank().versus(defender.rank());
            match result {
                CombatResult::MoverWins => {
                    ships.kill_ship(board, defender);
                    ships.move_ship(board, id, mv.to);
                }
                CombatResult::DefenderWins => {}
                CombatResult::MutualDestruction => {
                    ships.kill_ship(board, defender);
                    ships.kill_ship(board, id);
                }
            }
            if result == CombatResult::MoverWins && enemy_flag {
                MoveOutcome::FlagCaptured {
                    ship: id,
                    at: mv.to,
                    defeated: Some(defender),
                }
            } else {
                MoveOutcome::Combat {
                    attacker: id,
                    defender,
                    at: mv.to,
                    result,
                }
            }
        }
        None => {
            ships.move_ship(board, id, mv.to);
            if enemy_flag {
                MoveOutcome::FlagCaptured {
                    ship: id,
                    at: mv.to,
                    defeated: None,
                }
            } else {
                MoveOutcome::Moved {
                    ship: id,
                    from: mv.from,
                    to: mv.to,
                }
            }
        }
    };
    debug!("[Resolver] {}: {:?}", mv, outcome);
    Ok(outcome)
}

/// Check that every occupied cell refers to a living ship recorded at that cell, and that
/// every living ship is found in its recorded cell.
pub(super) fn check_invariants(
    board: &Board,
    ships: &ShipRegistry,
) -> Result<(), InvariantViolation> {
    for cell in board.cells() {
        let (coord, id) = match cell.occupant() {
            Some(id) => (cell.coord(), id),
            None => continue,
        };
        let ship = ships
            .get(id)
            .ok_or(InvariantViolation::UnknownOccupant { coord, id })?;
        if !ship.alive() {
            return Err(InvariantViolation::DeadOccupant { coord, id });
        }
        if ship.current_position() != coord {
            return Err(InvariantViolation::Misplaced {
                coord,
                id,
                recorded: ship.current_position(),
            });
        }
    }
    for ship in ships.iter().filter(|ship| ship.alive()) {
        if board.occupant(ship.current_position()) != Some(ship.id()) {
            return Err(InvariantViolation::Homeless {
                id: ship.id(),
                recorded: ship.current_position(),
            });
        }
    }
    Ok(())
}
