//! Playing a round: resolving moves, choosing moves for automated players, and driving
//! turns until the round ends.
//!
//! [`round`] holds the turn controller and the move resolver that validates and applies
//! every move.
//!
//! [`player`] defines the single capability every kind of player shares, producing a
//! move for the current board, and the scripted player.
//!
//! [`ai`] provides the greedy heuristic player.
//!
//! [`session`] plays consecutive rounds between two players and keeps their scores.
use std::fmt;

use crate::board::Coordinate;

pub use self::{
    ai::{direction_priorities, HeuristicConfig, HeuristicPlayer},
    errors::{IllegalMoveReason, InvariantViolation, MoveError},
    player::{MoveSource, PlayerInput, ScriptedPlayer},
    resolve::MoveOutcome,
    round::{NullSink, OutcomeSink, Round, RoundConfig, RoundState, RoundView, TurnReport},
    session::{PlayerScore, Session, LOSS, WIN},
};

pub mod ai;
mod errors;
pub mod player;
mod resolve;
pub mod round;
pub mod session;

/// A step proposed for the ship standing at `from`. A move with `from == to` keeps the
/// ship in place.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct GameMove {
    pub from: Coordinate,
    pub to: Coordinate,
}

impl GameMove {
    /// Construct a move between two cells.
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self { from, to }
    }

    /// A move that stays at `at`.
    pub fn stay(at: Coordinate) -> Self {
        Self { from: at, to: at }
    }

    /// Whether this move keeps the ship where it is.
    pub fn is_pass(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for GameMove {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
