//! Defines the types that make up the grid.

use std::{
    borrow::Borrow,
    ops::{Index, IndexMut},
};

use crate::{
    board::{Coordinate, Dimensions},
    ships::{ShipId, Side},
};

/// Terrain of a cell. Only regular cells accept ships and flags.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Terrain {
    Regular,
    Sea,
    Forest,
}

impl Terrain {
    /// Board symbol of this terrain.
    pub fn symbol(self) -> char {
        match self {
            Terrain::Regular => ' ',
            Terrain::Sea => 'S',
            Terrain::Forest => 'T',
        }
    }

    /// Parse a terrain symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            ' ' => Some(Terrain::Regular),
            'S' => Some(Terrain::Sea),
            'T' => Some(Terrain::Forest),
            _ => None,
        }
    }
}

/// A single cell in the grid.
#[derive(Debug, Clone)]
pub(super) struct GridCell {
    pub(super) terrain: Terrain,

    /// The ID of the living ship that stands in this cell, if any.
    pub(super) occupant: Option<ShipId>,

    /// The side whose flag stands in this cell, if any.
    pub(super) flag: Option<Side>,
}

impl Default for GridCell {
    fn default() -> Self {
        Self {
            terrain: Terrain::Regular,
            occupant: None,
            flag: None,
        }
    }
}

impl GridCell {
    /// Whether a ship or flag could be placed here during setup.
    pub(super) fn is_free(&self) -> bool {
        self.terrain == Terrain::Regular && self.occupant.is_none() && self.flag.is_none()
    }
}

/// Flat grid of cells addressed by [`Coordinate`].
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Dimensions of this board.
    pub(super) dim: Dimensions,
    /// Cells that make up this board, row by row.
    pub(super) cells: Box<[GridCell]>,
}

impl Grid {
    pub(super) fn new(dim: Dimensions) -> Self {
        let cells = (0..dim.total_size()).map(|_| Default::default()).collect();
        Self { dim, cells }
    }

    /// Get a reference to the cell at the given [`Coordinate`].
    pub(super) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<&GridCell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(|i| self.cells.get(i))
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(super) fn get_mut<B: Borrow<Coordinate>>(&mut self, coord: B) -> Option<&mut GridCell> {
        self.dim
            .try_linearize(coord.borrow())
            .and_then(move |i| self.cells.get_mut(i))
    }
}

impl<B: Borrow<Coordinate>> Index<B> for Grid {
    type Output = GridCell;

    fn index(&self, coord: B) -> &Self::Output {
        self.get(coord).expect("coordinate out of bounds")
    }
}

impl<B: Borrow<Coordinate>> IndexMut<B> for Grid {
    fn index_mut(&mut self, coord: B) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}
