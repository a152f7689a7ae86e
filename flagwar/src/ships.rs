// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Types used for defining ships, their owners and their combat ranks.
use std::fmt;

use crate::board::{Coordinate, Direction};

pub use self::registry::{AddShipError, ShipRegistry};

mod registry;

/// Number of distinct ranks each side commands.
pub const RANKS: u8 = 3;

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    PlayerA,
    PlayerB,
}

impl Side {
    /// Both sides, player A first.
    pub const ALL: [Side; 2] = [Side::PlayerA, Side::PlayerB];

    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::PlayerA => Side::PlayerB,
            Side::PlayerB => Side::PlayerA,
        }
    }

    /// Index of this side, for per-side arrays.
    pub fn index(self) -> usize {
        match self {
            Side::PlayerA => 0,
            Side::PlayerB => 1,
        }
    }

    /// Board symbol of this side's flag.
    pub fn flag_symbol(self) -> char {
        match self {
            Side::PlayerA => 'A',
            Side::PlayerB => 'B',
        }
    }

    /// Parse a flag symbol.
    pub fn from_flag_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Side::PlayerA),
            'B' => Some(Side::PlayerB),
            _ => None,
        }
    }

    /// Number of the first ship of this side. Player A numbers its ships from 1, player B
    /// from 7.
    fn first_number(self) -> u8 {
        match self {
            Side::PlayerA => 1,
            Side::PlayerB => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Side::PlayerA => "player A",
            Side::PlayerB => "player B",
        })
    }
}

/// Combat class of a ship, numbered from 0 within its side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Rank(u8);

impl Rank {
    /// Construct a rank. Returns `None` if `index >= RANKS`.
    pub fn new(index: u8) -> Option<Self> {
        if index < RANKS {
            Some(Rank(index))
        } else {
            None
        }
    }

    /// Index of this rank within its side.
    pub fn index(self) -> u8 {
        self.0
    }

    /// Returns true if this rank defeats `other`. Dominance is cyclic: rank `r` defeats
    /// rank `r + 1 mod RANKS`.
    pub fn dominates(self, other: Rank) -> bool {
        (self.0 + 1) % RANKS == other.0
    }

    /// Adjudicate a fight between a moving ship of this rank and a defender of rank
    /// `defender`.
    pub fn versus(self, defender: Rank) -> CombatResult {
        if self.dominates(defender) {
            CombatResult::MoverWins
        } else if defender.dominates(self) {
            CombatResult::DefenderWins
        } else {
            CombatResult::MutualDestruction
        }
    }
}

/// Outcome of a fight between a moving ship and the ship holding its destination.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CombatResult {
    /// The defender is destroyed and the mover takes the cell.
    MoverWins,
    /// The mover's step is rejected; it stays where it was.
    DefenderWins,
    /// Both ships are destroyed and the cell is left empty.
    MutualDestruction,
}

/// Identifier of a ship. The number doubles as the ship's board symbol: `1`-`3` belong to
/// player A and `7`-`9` to player B.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShipId(u8);

impl ShipId {
    /// Get the id of the ship of the given side and rank.
    pub fn new(side: Side, rank: Rank) -> Self {
        ShipId(side.first_number() + rank.0)
    }

    /// Parse a ship id from its number. Returns `None` for numbers no ship uses.
    pub fn from_number(number: u8) -> Option<Self> {
        Side::ALL.iter().find_map(|&side| {
            number
                .checked_sub(side.first_number())
                .and_then(Rank::new)
                .map(|rank| ShipId::new(side, rank))
        })
    }

    /// Parse a ship id from its board symbol.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        symbol
            .to_digit(10)
            .and_then(|digit| ShipId::from_number(digit as u8))
    }

    /// Get all ship ids of a side, in rank order.
    pub fn fleet(side: Side) -> impl Iterator<Item = ShipId> {
        (0..RANKS).map(move |rank| ShipId::new(side, Rank(rank)))
    }

    /// The number of this ship.
    pub fn number(self) -> u8 {
        self.0
    }

    /// The side owning this ship.
    pub fn side(self) -> Side {
        if self.0 >= Side::PlayerB.first_number() {
            Side::PlayerB
        } else {
            Side::PlayerA
        }
    }

    /// The combat rank of this ship.
    pub fn rank(self) -> Rank {
        Rank(self.0 - self.side().first_number())
    }

    /// The board symbol of this ship.
    pub fn symbol(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ship {}", self.0)
    }
}

/// A single ship and its state within a round.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    id: ShipId,
    alive: bool,
    initial_position: Coordinate,
    current_position: Coordinate,
    last_direction: Option<Direction>,
}

impl Ship {
    pub(crate) fn new(id: ShipId, position: Coordinate) -> Self {
        Self {
            id,
            alive: true,
            initial_position: position,
            current_position: position,
            last_direction: None,
        }
    }

    /// Get the ID of the ship.
    pub fn id(&self) -> ShipId {
        self.id
    }

    /// The side owning this ship.
    pub fn owner(&self) -> Side {
        self.id.side()
    }

    /// Whether the ship is still in play.
    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Where the ship started the round.
    pub fn initial_position(&self) -> Coordinate {
        self.initial_position
    }

    /// Where the ship is now. For a dead ship, where it was destroyed.
    pub fn current_position(&self) -> Coordinate {
        self.current_position
    }

    /// Direction of the ship's last step, `None` if it has not moved or last passed.
    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ship_numbers_map_to_sides() {
        let a: Vec<u8> = ShipId::fleet(Side::PlayerA).map(ShipId::number).collect();
        let b: Vec<u8> = ShipId::fleet(Side::PlayerB).map(ShipId::number).collect();
        assert_eq!(a, vec![1, 2, 3]);
        assert_eq!(b, vec![7, 8, 9]);
        for id in a.iter().chain(b.iter()) {
            let ship = ShipId::from_number(*id).unwrap();
            assert_eq!(ShipId::new(ship.side(), ship.rank()), ship);
        }
        for unused in [0u8, 4, 5, 6, 10].iter() {
            assert_eq!(ShipId::from_number(*unused), None);
        }
    }

    #[test]
    fn symbols_round_trip() {
        for side in Side::ALL.iter() {
            for id in ShipId::fleet(*side) {
                assert_eq!(ShipId::from_symbol(id.symbol()), Some(id));
            }
            assert_eq!(Side::from_flag_symbol(side.flag_symbol()), Some(*side));
        }
        assert_eq!(ShipId::from_symbol('S'), None);
    }

    #[test]
    fn dominance_is_cyclic() {
        let r: Vec<Rank> = (0..RANKS).map(|i| Rank::new(i).unwrap()).collect();
        assert!(r[0].dominates(r[1]));
        assert!(r[1].dominates(r[2]));
        assert!(r[2].dominates(r[0]));
        assert!(!r[1].dominates(r[0]));
        assert!(!r[0].dominates(r[0]));
    }

    #[test]
    fn versus_is_antisymmetric() {
        for a in 0..RANKS {
            for b in 0..RANKS {
                let (a, b) = (Rank::new(a).unwrap(), Rank::new(b).unwrap());
                match a.versus(b) {
                    CombatResult::MoverWins => {
                        assert_eq!(b.versus(a), CombatResult::DefenderWins)
                    }
                    CombatResult::DefenderWins => {
                        assert_eq!(b.versus(a), CombatResult::MoverWins)
                    }
                    CombatResult::MutualDestruction => assert_eq!(a, b),
                }
            }
        }
    }
}
