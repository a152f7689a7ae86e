//! Implements the setup phase of a round: building the board and placing flags and ships,
//! either at random or from a snapshot.
use std::ops::RangeInclusive;

use log::debug;
use rand::Rng;

use crate::{
    board::{Board, BoardSnapshot, Coordinate, Dimensions, SetupError, Terrain},
    ships::{AddShipError, ShipId, ShipRegistry, Side},
};

/// Number of sea and forest cells scattered over a random board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TerrainDensity {
    pub sea: usize,
    pub forest: usize,
}

impl TerrainDensity {
    pub const LOW: TerrainDensity = TerrainDensity { sea: 10, forest: 10 };
    pub const REGULAR: TerrainDensity = TerrainDensity { sea: 20, forest: 20 };
    pub const HIGH: TerrainDensity = TerrainDensity { sea: 30, forest: 30 };
}

impl Default for TerrainDensity {
    fn default() -> Self {
        TerrainDensity::REGULAR
    }
}

/// Parameters of a randomly generated board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub density: TerrainDensity,
}

impl Default for BoardConfig {
    /// A 13x13 board with regular density.
    fn default() -> Self {
        let dim = Dimensions::default();
        Self {
            width: dim.width(),
            height: dim.height(),
            density: TerrainDensity::default(),
        }
    }
}

/// Rows in which a side's flag and ships start on a random board. Player A starts at the
/// top, player B at the bottom.
pub fn home_rows(side: Side, height: usize) -> RangeInclusive<usize> {
    let band = (height / 3).max(1);
    match side {
        Side::PlayerA => 1..=band,
        Side::PlayerB => (height + 1 - band)..=height,
    }
}

/// A fully placed board and the matching ship registry, ready to start a round.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    board: Board,
    ships: ShipRegistry,
}

impl BoardSetup {
    /// Begin setup with an empty board of regular cells.
    pub fn new(width: usize, height: usize) -> Result<Self, SetupError> {
        Dimensions::try_new(width, height)
            .ok_or(SetupError::InvalidDimensions { width, height })?;
        Ok(Self {
            board: Board::new(width, height),
            ships: ShipRegistry::new(),
        })
    }

    /// Generate a random board: scatter terrain, then place each side's flag and full
    /// fleet on random free cells of its home rows.
    pub fn random<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self, SetupError> {
        let (width, height) = (config.width, config.height);
        Dimensions::try_new(width, height)
            .ok_or(SetupError::InvalidDimensions { width, height })?;
        let mut setup = Self {
            board: Board::build(width, height, config.density, rng),
            ships: ShipRegistry::new(),
        };
        for &side in Side::ALL.iter() {
            let rows = home_rows(side, height);
            let flag = setup
                .board
                .random_free_cell(rows.clone(), rng)
                .ok_or(SetupError::NoFreeCell(side))?;
            setup.place_flag(side, flag)?;
            for id in ShipId::fleet(side) {
                let coord = setup
                    .board
                    .random_free_cell(rows.clone(), rng)
                    .ok_or(SetupError::NoFreeCell(side))?;
                setup.place_ship(id, coord)?;
            }
        }
        debug!("[Setup] random {}x{} board generated", width, height);
        setup.validate()?;
        Ok(setup)
    }

    /// Build a board from a snapshot. Every side needs a flag and at least one ship; a
    /// ship or flag may appear only once.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> Result<Self, SetupError> {
        let dim = snapshot.dimensions();
        let mut setup = Self::new(dim.width(), dim.height())?;
        for (coord, symbol) in snapshot.iter() {
            if let Some(terrain) = Terrain::from_symbol(symbol) {
                setup.board.set_terrain(coord, terrain)?;
            } else if let Some(side) = Side::from_flag_symbol(symbol) {
                if setup.board.flag(side).is_some() {
                    return Err(SetupError::DuplicateFlag(side));
                }
                setup.place_flag(side, coord)?;
            } else if let Some(id) = ShipId::from_symbol(symbol) {
                setup.place_ship(id, coord)?;
            } else {
                return Err(SetupError::UnknownSymbol { symbol, coord });
            }
        }
        setup.validate()?;
        Ok(setup)
    }

    /// Place a ship on the board and register it.
    pub fn place_ship(&mut self, id: ShipId, coord: Coordinate) -> Result<(), SetupError> {
        if self.ships.get(id).is_some() {
            return Err(AddShipError::new(id).into());
        }
        self.board.place_ship(id, coord)?;
        self.ships.add(id, coord)?;
        Ok(())
    }

    /// Place a side's flag.
    pub fn place_flag(&mut self, side: Side, coord: Coordinate) -> Result<(), SetupError> {
        self.board.place_flag(side, coord)?;
        Ok(())
    }

    /// Turn an empty cell into the given terrain.
    pub fn set_terrain(&mut self, coord: Coordinate, terrain: Terrain) -> Result<(), SetupError> {
        self.board.set_terrain(coord, terrain)?;
        Ok(())
    }

    /// Check that both sides have a flag and at least one ship.
    pub fn validate(&self) -> Result<(), SetupError> {
        for &side in Side::ALL.iter() {
            if self.board.flag(side).is_none() {
                return Err(SetupError::MissingFlag(side));
            }
            if self.ships.living_count(side) == 0 {
                return Err(SetupError::MissingShips(side));
            }
        }
        Ok(())
    }

    /// The board as set up so far.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The ships registered so far.
    pub fn ships(&self) -> &ShipRegistry {
        &self.ships
    }

    /// Take the board and registry.
    pub fn into_parts(self) -> (Board, ShipRegistry) {
        (self.board, self.ships)
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::board::{BoardError, CannotPlaceReason};

    #[test]
    fn home_rows_split_the_board() {
        assert_eq!(home_rows(Side::PlayerA, 13), 1..=4);
        assert_eq!(home_rows(Side::PlayerB, 13), 10..=13);
        assert_eq!(home_rows(Side::PlayerA, 2), 1..=1);
        assert_eq!(home_rows(Side::PlayerB, 2), 2..=2);
    }

    #[test]
    fn random_setup_places_everything_at_home() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = BoardConfig::default();
        let setup = BoardSetup::random(&config, &mut rng).unwrap();
        for &side in Side::ALL.iter() {
            let rows = home_rows(side, config.height);
            let flag = setup.board().flag(side).unwrap();
            assert!(rows.contains(&flag.y));
            assert_eq!(setup.ships().living_count(side), 3);
            for id in setup.ships().ships_of(side) {
                let pos = setup.ships()[id].current_position();
                assert!(rows.contains(&pos.y));
                assert_eq!(setup.board().occupant(pos), Some(id));
                assert_eq!(setup.board().terrain(pos), Some(Terrain::Regular));
            }
        }
    }

    #[test]
    fn random_setup_is_deterministic_per_seed() {
        let config = BoardConfig::default();
        let a = BoardSetup::random(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = BoardSetup::random(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(
            BoardSnapshot::of_board(a.board()),
            BoardSnapshot::of_board(b.board())
        );
    }

    #[test]
    fn random_setup_rejects_bad_dimensions() {
        let config = BoardConfig {
            width: 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            BoardSetup::random(&config, &mut rng).unwrap_err(),
            SetupError::InvalidDimensions {
                width: 0,
                height: 13
            }
        );
    }

    #[test]
    fn crowded_home_rows_reported() {
        // Three cells per home row cannot hold a flag and three ships.
        let config = BoardConfig {
            width: 3,
            height: 3,
            density: TerrainDensity { sea: 0, forest: 0 },
        };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            BoardSetup::random(&config, &mut rng).unwrap_err(),
            SetupError::NoFreeCell(Side::PlayerA)
        );
    }

    #[test]
    fn snapshot_round_trips() {
        let rows = ["A1 S", " 2T ", "  3 ", "7 8B", "9   "];
        let snapshot = BoardSnapshot::from_rows(&rows).unwrap();
        let setup = BoardSetup::from_snapshot(&snapshot).unwrap();
        assert_eq!(BoardSnapshot::of_board(setup.board()), snapshot);
        assert_eq!(setup.board().flag(Side::PlayerB), Some(Coordinate::new(4, 4)));
        let a: Vec<u8> = setup
            .ships()
            .ships_of(Side::PlayerA)
            .map(ShipId::number)
            .collect();
        assert_eq!(a, vec![1, 2, 3]);
    }

    #[test]
    fn snapshot_errors() {
        let check = |rows: &[&str], expected: SetupError| {
            let snapshot = BoardSnapshot::from_rows(rows).unwrap();
            assert_eq!(BoardSetup::from_snapshot(&snapshot).unwrap_err(), expected);
        };
        check(
            &["A1x", "B7 "],
            SetupError::UnknownSymbol {
                symbol: 'x',
                coord: Coordinate::new(3, 1),
            },
        );
        check(&["A1 ", "7  "], SetupError::MissingFlag(Side::PlayerB));
        check(&["A1 ", "B  "], SetupError::MissingShips(Side::PlayerB));
        check(&["A1A", "B7 "], SetupError::DuplicateFlag(Side::PlayerA));
        let dup = BoardSnapshot::from_rows(&["A11", "B7 "]).unwrap();
        let err = BoardSetup::from_snapshot(&dup).unwrap_err();
        assert_eq!(err.ship().map(ShipId::number), Some(1));
    }

    #[test]
    fn terrain_cannot_cover_a_ship() {
        let mut setup = BoardSetup::new(2, 2).unwrap();
        let c = Coordinate::new(1, 1);
        let id = ShipId::from_number(7).unwrap();
        setup.place_ship(id, c).unwrap();
        assert_eq!(
            setup.set_terrain(c, Terrain::Sea).unwrap_err(),
            SetupError::Board(BoardError::InvalidPlacement {
                coord: c,
                reason: CannotPlaceReason::Occupied
            })
        );
    }
}
