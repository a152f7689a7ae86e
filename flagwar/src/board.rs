//! Types that make up the game board.

use std::ops::RangeInclusive;

use enumflags2::BitFlags;
use log::{trace, warn};
use rand::Rng;

use crate::ships::{ShipId, Side, RANKS};

use self::grid::Grid;
pub use self::{
    coordinate::Coordinate,
    dimensions::{Dimensions, Direction},
    errors::{BoardError, CannotPlaceReason, SetupError},
    grid::Terrain,
    setup::{BoardConfig, BoardSetup, TerrainDensity},
    snapshot::BoardSnapshot,
};

mod coordinate;
mod dimensions;
mod errors;
mod grid;
pub mod setup;
pub mod snapshot;

/// Regular cells kept free of terrain when generating a board: one per ship and flag.
const RESERVED_CELLS: usize = 2 * (RANKS as usize + 1);

/// Copy of a single cell of the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Cell {
    coord: Coordinate,
    terrain: Terrain,
    occupant: Option<ShipId>,
    flag: Option<Side>,
}

impl Cell {
    /// The grid coordinate of this cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// The terrain of this cell.
    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    /// The living ship standing in this cell, if any.
    pub fn occupant(&self) -> Option<ShipId> {
        self.occupant
    }

    /// The side whose flag stands in this cell, if any.
    pub fn flag(&self) -> Option<Side> {
        self.flag
    }
}

/// The grid shared by both sides. The board only records which ship stands where; the
/// ships themselves live in a [`ShipRegistry`][crate::ships::ShipRegistry].
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cells.
    grid: Grid,

    /// Flag location of each side, indexed by [`Side::index`].
    flags: [Option<Coordinate>; 2],
}

impl Board {
    /// Create a board of regular cells with no ships or flags.
    /// Panics if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: Grid::new(Dimensions::new(width, height)),
            flags: [None; 2],
        }
    }

    /// Create a board and scatter sea and forest cells over it at random. The amount of
    /// special terrain is clamped so that enough regular cells remain for every ship and
    /// flag.
    pub fn build<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        density: TerrainDensity,
        rng: &mut R,
    ) -> Self {
        let mut board = Self::new(width, height);
        let available = board
            .dimensions()
            .total_size()
            .saturating_sub(RESERVED_CELLS);
        let sea = density.sea.min(available);
        let forest = density.forest.min(available - sea);
        if sea != density.sea || forest != density.forest {
            warn!(
                "[Board] terrain density {:?} clamped to sea={} forest={} on {}x{}",
                density, sea, forest, width, height
            );
        }
        board.scatter(Terrain::Sea, sea, rng);
        board.scatter(Terrain::Forest, forest, rng);
        board
    }

    /// Turn `count` random free regular cells into `terrain`.
    fn scatter<R: Rng + ?Sized>(&mut self, terrain: Terrain, count: usize, rng: &mut R) {
        let rows = 1..=self.height();
        for _ in 0..count {
            match self.random_free_cell(rows.clone(), rng) {
                Some(coord) => self.grid[coord].terrain = terrain,
                None => break,
            }
        }
    }

    /// Get the [`Dimensions`] of this [`Board`].
    pub fn dimensions(&self) -> &Dimensions {
        &self.grid.dim
    }

    /// Width of the board.
    pub fn width(&self) -> usize {
        self.grid.dim.width()
    }

    /// Height of the board.
    pub fn height(&self) -> usize {
        self.grid.dim.height()
    }

    /// Get a copy of the cell at the given coordinate.
    pub fn cell_at(&self, coord: Coordinate) -> Result<Cell, BoardError> {
        self.grid
            .get(coord)
            .map(|cell| Cell {
                coord,
                terrain: cell.terrain,
                occupant: cell.occupant,
                flag: cell.flag,
            })
            .ok_or(BoardError::OutOfBounds(coord))
    }

    /// Get an iterator over copies of every cell, row by row.
    pub fn cells(&self) -> impl '_ + Iterator<Item = Cell> {
        let dim = self.grid.dim;
        self.grid
            .cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| Cell {
                coord: dim.un_linearize(i),
                terrain: cell.terrain,
                occupant: cell.occupant,
                flag: cell.flag,
            })
    }

    /// Get the coordinate next to `coord` in `direction`, or `None` at the edge of the
    /// board.
    pub fn neighbor(&self, coord: Coordinate, direction: Direction) -> Option<Coordinate> {
        self.grid.dim.neighbor(coord, direction)
    }

    /// The terrain at `coord`, or `None` if it is out of bounds.
    pub fn terrain(&self, coord: Coordinate) -> Option<Terrain> {
        self.grid.get(coord).map(|cell| cell.terrain)
    }

    /// The living ship at `coord`, if any.
    pub fn occupant(&self, coord: Coordinate) -> Option<ShipId> {
        self.grid.get(coord).and_then(|cell| cell.occupant)
    }

    /// Where the flag of `side` stands, if it has been placed.
    pub fn flag(&self, side: Side) -> Option<Coordinate> {
        self.flags[side.index()]
    }

    /// The side whose flag stands at `coord`, if any.
    pub fn flag_at(&self, coord: Coordinate) -> Option<Side> {
        self.grid.get(coord).and_then(|cell| cell.flag)
    }

    /// Change the terrain of an empty cell.
    pub fn set_terrain(&mut self, coord: Coordinate, terrain: Terrain) -> Result<(), BoardError> {
        let cell = self
            .grid
            .get_mut(coord)
            .ok_or(BoardError::OutOfBounds(coord))?;
        if cell.occupant.is_some() || cell.flag.is_some() {
            return Err(BoardError::placement(coord, CannotPlaceReason::Occupied));
        }
        cell.terrain = terrain;
        Ok(())
    }

    /// Put a ship on a free regular cell. Used only while setting up a round.
    pub fn place_ship(&mut self, id: ShipId, coord: Coordinate) -> Result<(), BoardError> {
        self.check_free(coord)?;
        self.grid[coord].occupant = Some(id);
        Ok(())
    }

    /// Put the flag of `side` on a free regular cell. Each side's flag is placed once.
    pub fn place_flag(&mut self, side: Side, coord: Coordinate) -> Result<(), BoardError> {
        self.check_free(coord)?;
        if self.flags[side.index()].is_some() {
            return Err(BoardError::placement(
                coord,
                CannotPlaceReason::FlagAlreadyPlaced,
            ));
        }
        self.grid[coord].flag = Some(side);
        self.flags[side.index()] = Some(coord);
        Ok(())
    }

    fn check_free(&self, coord: Coordinate) -> Result<(), BoardError> {
        match self.grid.get(coord) {
            None => Err(BoardError::OutOfBounds(coord)),
            Some(cell) if cell.terrain != Terrain::Regular => Err(BoardError::placement(
                coord,
                CannotPlaceReason::NotRegular,
            )),
            Some(cell) if !cell.is_free() => {
                Err(BoardError::placement(coord, CannotPlaceReason::Occupied))
            }
            Some(_) => Ok(()),
        }
    }

    /// Count the free regular cells in the given rows.
    pub fn count_free_cells(&self, rows: RangeInclusive<usize>) -> usize {
        self.grid
            .dim
            .coordinates_in_rows(rows)
            .filter(|coord| self.grid[coord].is_free())
            .count()
    }

    /// Pick a uniformly random free regular cell within the given rows, or `None` if the
    /// band has no free cell.
    ///
    /// Cells are drawn uniformly from the whole band and rejected until a free one comes
    /// up, so every free cell is equally likely. With `f` free cells among `n` in the
    /// band, the expected number of draws is `n / f`.
    pub fn random_free_cell<R: Rng + ?Sized>(
        &self,
        rows: RangeInclusive<usize>,
        rng: &mut R,
    ) -> Option<Coordinate> {
        let first = *rows.start().max(&1);
        let last = *rows.end().min(&self.height());
        if first > last || self.count_free_cells(first..=last) == 0 {
            return None;
        }
        let mut draws = 0usize;
        loop {
            draws += 1;
            let coord = Coordinate::new(
                rng.gen_range(1, self.width() + 1),
                rng.gen_range(first, last + 1),
            );
            if self.grid[coord].is_free() {
                trace!("[Board] free cell {} found after {} draws", coord, draws);
                return Some(coord);
            }
        }
    }

    /// The set of directions a ship of `side` standing at `coord` could step in: the
    /// destination must be on the board, regular, and not held by another ship of the
    /// same side.
    pub fn open_directions(&self, coord: Coordinate, side: Side) -> BitFlags<Direction> {
        let mut open = BitFlags::empty();
        for &direction in Direction::ALL.iter() {
            if let Some(next) = self.neighbor(coord, direction) {
                let cell = &self.grid[next];
                let own = cell.occupant.map_or(false, |id| id.side() == side);
                if cell.terrain == Terrain::Regular && !own {
                    open.insert(direction);
                }
            }
        }
        open
    }

    /// The board symbol shown at `coord`: the ship if any, else the flag, else the
    /// terrain.
    pub fn symbol_at(&self, coord: Coordinate) -> Option<char> {
        self.grid.get(coord).map(|cell| match (cell.occupant, cell.flag) {
            (Some(id), _) => id.symbol(),
            (None, Some(side)) => side.flag_symbol(),
            (None, None) => cell.terrain.symbol(),
        })
    }

    /// Update which ship stands at `coord`. Callers keep the registry in step.
    pub(crate) fn set_occupant(&mut self, coord: Coordinate, occupant: Option<ShipId>) {
        self.grid[coord].occupant = occupant;
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::ships::Rank;

    fn ship(side: Side, rank: u8) -> ShipId {
        ShipId::new(side, Rank::new(rank).unwrap())
    }

    #[test]
    fn cell_at_checks_bounds() {
        let board = Board::new(3, 2);
        assert!(board.cell_at(Coordinate::new(3, 2)).is_ok());
        for &(x, y) in [(0, 1), (1, 0), (4, 1), (1, 3)].iter() {
            let coord = Coordinate::new(x, y);
            assert_eq!(board.cell_at(coord), Err(BoardError::OutOfBounds(coord)));
        }
    }

    #[test]
    fn placement_requires_free_regular_cell() {
        let mut board = Board::new(3, 3);
        let sea = Coordinate::new(1, 1);
        board.set_terrain(sea, Terrain::Sea).unwrap();
        assert_eq!(
            board.place_ship(ship(Side::PlayerA, 0), sea),
            Err(BoardError::placement(sea, CannotPlaceReason::NotRegular))
        );
        assert_eq!(
            board.place_flag(Side::PlayerA, sea),
            Err(BoardError::placement(sea, CannotPlaceReason::NotRegular))
        );

        let c = Coordinate::new(2, 2);
        board.place_ship(ship(Side::PlayerA, 0), c).unwrap();
        assert_eq!(
            board.place_ship(ship(Side::PlayerB, 0), c),
            Err(BoardError::placement(c, CannotPlaceReason::Occupied))
        );
        assert_eq!(
            board.place_flag(Side::PlayerB, c),
            Err(BoardError::placement(c, CannotPlaceReason::Occupied))
        );
        assert_eq!(
            board.set_terrain(c, Terrain::Forest),
            Err(BoardError::placement(c, CannotPlaceReason::Occupied))
        );
    }

    #[test]
    fn flag_placed_once() {
        let mut board = Board::new(3, 3);
        board.place_flag(Side::PlayerB, Coordinate::new(3, 3)).unwrap();
        let again = Coordinate::new(1, 3);
        assert_eq!(
            board.place_flag(Side::PlayerB, again),
            Err(BoardError::placement(again, CannotPlaceReason::FlagAlreadyPlaced))
        );
        assert_eq!(board.flag(Side::PlayerB), Some(Coordinate::new(3, 3)));
        assert_eq!(board.flag_at(Coordinate::new(3, 3)), Some(Side::PlayerB));
        assert_eq!(board.flag(Side::PlayerA), None);
    }

    #[test]
    fn build_clamps_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::build(3, 4, TerrainDensity::HIGH, &mut rng);
        let special = board
            .cells()
            .filter(|cell| cell.terrain() != Terrain::Regular)
            .count();
        assert_eq!(special, 12 - RESERVED_CELLS);
        assert_eq!(board.count_free_cells(1..=4), RESERVED_CELLS);
    }

    #[test]
    fn build_places_requested_terrain() {
        let mut rng = StdRng::seed_from_u64(11);
        let density = TerrainDensity { sea: 5, forest: 7 };
        let board = Board::build(13, 13, density, &mut rng);
        let count = |t| board.cells().filter(|cell| cell.terrain() == t).count();
        assert_eq!(count(Terrain::Sea), 5);
        assert_eq!(count(Terrain::Forest), 7);
    }

    #[test]
    fn random_free_cell_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(5, 6);
        for x in 1..=5 {
            board.set_terrain(Coordinate::new(x, 2), Terrain::Forest).unwrap();
        }
        board.place_flag(Side::PlayerA, Coordinate::new(1, 3)).unwrap();
        for _ in 0..200 {
            let c = board.random_free_cell(2..=3, &mut rng).unwrap();
            assert_eq!(c.y, 3);
            assert_ne!(c.x, 1);
        }
        assert_eq!(board.random_free_cell(2..=2, &mut rng), None);
        assert_eq!(board.random_free_cell(7..=9, &mut rng), None);
    }

    #[test]
    fn random_free_cell_is_uniform() {
        use std::collections::HashMap;

        let mut rng = StdRng::seed_from_u64(17);
        let mut board = Board::new(4, 3);
        board.set_terrain(Coordinate::new(1, 1), Terrain::Sea).unwrap();
        board.set_terrain(Coordinate::new(4, 2), Terrain::Forest).unwrap();
        board.place_flag(Side::PlayerB, Coordinate::new(2, 2)).unwrap();
        let free = board.count_free_cells(1..=2);
        assert_eq!(free, 5);

        let draws = 10_000;
        let mut counts = HashMap::new();
        for _ in 0..draws {
            let c = board.random_free_cell(1..=2, &mut rng).unwrap();
            *counts.entry(c).or_insert(0usize) += 1;
        }
        assert_eq!(counts.len(), free);
        let expected = draws / free;
        for (coord, &count) in &counts {
            assert!(board.grid[*coord].is_free());
            assert!(
                count * 100 >= expected * 85 && count * 100 <= expected * 115,
                "{} drawn {} times, expected about {}",
                coord,
                count,
                expected
            );
        }
    }

    #[test]
    fn open_directions_skip_blocked_steps() {
        let mut board = Board::new(3, 3);
        let center = Coordinate::new(2, 2);
        board.set_terrain(Coordinate::new(2, 1), Terrain::Sea).unwrap();
        board.place_ship(ship(Side::PlayerA, 1), Coordinate::new(1, 2)).unwrap();
        board.place_ship(ship(Side::PlayerB, 1), Coordinate::new(3, 2)).unwrap();
        let open = board.open_directions(center, Side::PlayerA);
        assert!(!open.contains(Direction::Up));
        assert!(!open.contains(Direction::Left));
        assert!(open.contains(Direction::Right));
        assert!(open.contains(Direction::Down));

        let corner = board.open_directions(Coordinate::new(3, 3), Side::PlayerB);
        assert!(!corner.contains(Direction::Right));
        assert!(!corner.contains(Direction::Down));
        assert!(!corner.contains(Direction::Up));
        assert!(corner.contains(Direction::Left));
    }

    #[test]
    fn symbols_prefer_ship_over_flag_over_terrain() {
        let mut board = Board::new(3, 1);
        board.set_terrain(Coordinate::new(1, 1), Terrain::Forest).unwrap();
        board.place_flag(Side::PlayerA, Coordinate::new(2, 1)).unwrap();
        board.place_ship(ship(Side::PlayerB, 2), Coordinate::new(3, 1)).unwrap();
        let flag = Coordinate::new(2, 1);
        board.set_occupant(flag, Some(ship(Side::PlayerA, 0)));
        let symbols: String = (1..=3)
            .filter_map(|x| board.symbol_at(Coordinate::new(x, 1)))
            .collect();
        assert_eq!(symbols, "T19");
        board.set_occupant(flag, None);
        assert_eq!(board.symbol_at(flag), Some('A'));
        assert_eq!(board.symbol_at(Coordinate::new(4, 1)), None);
    }
}
