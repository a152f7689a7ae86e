//! Board dimensions and movement directions.
use std::ops::RangeInclusive;

use enumflags2::BitFlags;

use crate::board::Coordinate;

/// One orthogonal step on the board. `Up` decreases the row, `Left` decreases the column.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 0b0001,
    Down = 0b0010,
    Left = 0b0100,
    Right = 0b1000,
}

impl Direction {
    /// All directions, in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Get the direction pointing the opposite way.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Get the direction of the single step from `from` to `to`, or `None` if the two
    /// coordinates are not orthogonal neighbors.
    pub fn between(from: &Coordinate, to: &Coordinate) -> Option<Self> {
        match from.delta(to) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Apply this step to `coord` without checking bounds other than underflow.
    pub(crate) fn step(self, coord: Coordinate) -> Option<Coordinate> {
        match self {
            Direction::Up => coord.y.checked_sub(1).map(|y| Coordinate::new(coord.x, y)),
            Direction::Down => Some(Coordinate::new(coord.x, coord.y + 1)),
            Direction::Left => coord.x.checked_sub(1).map(|x| Coordinate::new(x, coord.y)),
            Direction::Right => Some(Coordinate::new(coord.x + 1, coord.y)),
        }
    }
}

/// Rectangular dimensions of a board. Coordinates are valid in `[1, width] x [1, height]`.
/// There is no wrapping.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    /// Width of the board. This cooresponds to the `x` [`Coordinate`].
    width: usize,
    /// Height of the board. This cooresponds to the `y` [`Coordinate`].
    height: usize,
}

impl Dimensions {
    /// Create new [`Dimensions`] with the specified width and height.
    /// Panics if `width * height` exceeds `usize::max_value()` or if `width` or `height` is 0.
    pub fn new(width: usize, height: usize) -> Self {
        match Self::try_new(width, height) {
            Some(dim) => dim,
            None => {
                if width == 0 || height == 0 {
                    panic!("Dimensions must be nonzero, got {}x{}", width, height);
                } else {
                    panic!(
                        "Dimensions too large: {} * {} > {}",
                        width,
                        height,
                        usize::max_value()
                    );
                }
            }
        }
    }

    /// Create new [`Dimensions`] with the specified width and height.
    /// Returns `None` if `width * height` exceeds `usize::max_value()` or if `width` or
    /// `height` is 0.
    pub fn try_new(width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            width.checked_mul(height).map(|_| Self { width, height })
        }
    }

    /// Get the width of these [`Dimensions`].
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of these [`Dimensions`].
    pub fn height(&self) -> usize {
        self.height
    }

    /// Compute the total number of cells.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Check if the given [`Coordinate`] is in bounds.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (1..=self.width).contains(&coord.x) && (1..=self.height).contains(&coord.y)
    }

    /// Convert a coordinate to a linear index. Returns `None` if the coordinate is out of
    /// bounds.
    pub(crate) fn try_linearize(&self, coord: &Coordinate) -> Option<usize> {
        if self.contains(coord) {
            Some((coord.y - 1) * self.width + (coord.x - 1))
        } else {
            None
        }
    }

    /// Convert a linear index back into a [`Coordinate`].
    pub(crate) fn un_linearize(&self, idx: usize) -> Coordinate {
        Coordinate {
            x: idx % self.width + 1,
            y: idx / self.width + 1,
        }
    }

    /// Get the coordinate one step from `coord` in `direction`, or `None` if that would
    /// leave the board.
    pub fn neighbor(&self, coord: Coordinate, direction: Direction) -> Option<Coordinate> {
        direction.step(coord).filter(|next| self.contains(next))
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the coordinates of
    /// that row.
    pub fn iter_coordinates(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width;
        (1..=self.height).map(move |y| (1..=width).map(move |x| Coordinate { x, y }))
    }

    /// Get an iterator over every coordinate in the given rows, clamped to the board.
    pub fn coordinates_in_rows(
        &self,
        rows: RangeInclusive<usize>,
    ) -> impl Iterator<Item = Coordinate> {
        let width = self.width;
        let rows = *rows.start().max(&1)..=*rows.end().min(&self.height);
        rows.flat_map(move |y| (1..=width).map(move |x| Coordinate { x, y }))
    }
}

impl Default for Dimensions {
    /// Construct the default dimensions, a 13x13 board.
    fn default() -> Self {
        Self {
            width: 13,
            height: 13,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_does_not_wrap() {
        let dim = Dimensions::new(3, 2);
        let corner = Coordinate::new(1, 1);
        assert_eq!(dim.neighbor(corner, Direction::Up), None);
        assert_eq!(dim.neighbor(corner, Direction::Left), None);
        assert_eq!(
            dim.neighbor(corner, Direction::Right),
            Some(Coordinate::new(2, 1))
        );
        assert_eq!(
            dim.neighbor(corner, Direction::Down),
            Some(Coordinate::new(1, 2))
        );
        assert_eq!(dim.neighbor(Coordinate::new(3, 2), Direction::Down), None);
        assert_eq!(dim.neighbor(Coordinate::new(3, 2), Direction::Right), None);
    }

    #[test]
    fn linearize_round_trips_every_cell() {
        let dim = Dimensions::new(4, 3);
        for (idx, coord) in dim.iter_coordinates().flatten().enumerate() {
            assert_eq!(dim.try_linearize(&coord), Some(idx));
            assert_eq!(dim.un_linearize(idx), coord);
        }
        assert_eq!(dim.try_linearize(&Coordinate::new(0, 1)), None);
        assert_eq!(dim.try_linearize(&Coordinate::new(5, 1)), None);
    }

    #[test]
    fn between_recovers_direction() {
        let from = Coordinate::new(2, 2);
        for &dir in Direction::ALL.iter() {
            let to = dir.step(from).unwrap();
            assert_eq!(Direction::between(&from, &to), Some(dir));
            assert_eq!(Direction::between(&to, &from), Some(dir.reverse()));
        }
        assert_eq!(Direction::between(&from, &from), None);
    }

    #[test]
    fn zero_dimensions_rejected() {
        assert!(Dimensions::try_new(0, 4).is_none());
        assert!(Dimensions::try_new(4, 0).is_none());
        assert!(Dimensions::try_new(usize::max_value(), 2).is_none());
    }

    #[test]
    fn row_band_is_clamped() {
        let dim = Dimensions::new(2, 3);
        let band: Vec<_> = dim.coordinates_in_rows(0..=1).collect();
        assert_eq!(band, vec![Coordinate::new(1, 1), Coordinate::new(2, 1)]);
        assert_eq!(dim.coordinates_in_rows(3..=9).count(), 2);
    }
}
