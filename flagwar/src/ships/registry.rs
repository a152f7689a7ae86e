//! Ownership of every ship in a round.
use std::{
    collections::{hash_map::Entry, HashMap},
    ops::{Index, IndexMut},
};

use log::trace;
use thiserror::Error;

use crate::{
    board::{Board, Coordinate, Direction},
    ships::{Ship, ShipId, Side},
};

/// Error returned when trying to add a ship that already existed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("{id} already exists")]
pub struct AddShipError {
    id: ShipId,
}

impl AddShipError {
    pub(crate) fn new(id: ShipId) -> Self {
        Self { id }
    }

    /// The id that was added twice.
    pub fn id(&self) -> ShipId {
        self.id
    }
}

/// Registry of the ships of both sides. Ships are never removed: a destroyed ship stays
/// here, marked dead, so that it can still be reported on.
///
/// The registry owns the ships; board cells only hold a [`ShipId`], so the registry and
/// the board must be mutated together through [`move_ship`][Self::move_ship] and
/// [`kill_ship`][Self::kill_ship].
#[derive(Debug, Clone, Default)]
pub struct ShipRegistry {
    /// Ships in insertion order.
    ships: Vec<Ship>,

    /// Position of each ship in `ships`.
    index: HashMap<ShipId, usize>,
}

impl ShipRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add a ship standing at `position`.
    pub(crate) fn add(&mut self, id: ShipId, position: Coordinate) -> Result<(), AddShipError> {
        match self.index.entry(id) {
            Entry::Occupied(_) => Err(AddShipError::new(id)),
            Entry::Vacant(entry) => {
                entry.insert(self.ships.len());
                self.ships.push(Ship::new(id, position));
                Ok(())
            }
        }
    }

    /// Get the ship with the specified ID if it exists.
    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.index.get(&id).map(|&i| &self.ships[i])
    }

    /// Get an iterator over every ship, living or dead, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Get the ids of the living ships of `side`, in insertion order.
    pub fn ships_of(&self, side: Side) -> impl '_ + Iterator<Item = ShipId> {
        self.ships
            .iter()
            .filter(move |ship| ship.alive && ship.owner() == side)
            .map(|ship| ship.id)
    }

    /// Count the living ships of `side`.
    pub fn living_count(&self, side: Side) -> usize {
        self.ships_of(side).count()
    }

    /// Move a ship to `to`, updating the board to match. Only call this for a move that
    /// has already been validated: the destination must be empty.
    pub(crate) fn move_ship(&mut self, board: &mut Board, id: ShipId, to: Coordinate) {
        let ship = &mut self[id];
        let from = ship.current_position;
        ship.last_direction = Direction::between(&from, &to);
        ship.current_position = to;
        if board.occupant(from) == Some(id) {
            board.set_occupant(from, None);
        }
        board.set_occupant(to, Some(id));
        trace!("[Registry] {} moved {} -> {}", id, from, to);
    }

    /// Mark a ship dead and free its cell. Killing a dead ship does nothing.
    pub(crate) fn kill_ship(&mut self, board: &mut Board, id: ShipId) {
        let ship = &mut self[id];
        if !ship.alive {
            return;
        }
        ship.alive = false;
        let at = ship.current_position;
        if board.occupant(at) == Some(id) {
            board.set_occupant(at, None);
        }
        trace!("[Registry] {} destroyed at {}", id, at);
    }

    /// Record that a ship passed its turn.
    pub(crate) fn hold_ship(&mut self, id: ShipId) {
        self[id].last_direction = None;
    }
}

impl Index<ShipId> for ShipRegistry {
    type Output = Ship;

    fn index(&self, id: ShipId) -> &Self::Output {
        self.get(id).expect("unknown ship id")
    }
}

impl IndexMut<ShipId> for ShipRegistry {
    fn index_mut(&mut self, id: ShipId) -> &mut Self::Output {
        let i = *self.index.get(&id).expect("unknown ship id");
        &mut self.ships[i]
    }
}
