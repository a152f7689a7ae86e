use std::fmt;

/// The coordinates of a cell in the board. Both axes start at 1, so the top-left cell of
/// the board is `(1, 1)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coordinate {
    /// Column of the cell.
    pub x: usize,
    /// Row of the cell.
    pub y: usize,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Signed distance `(dx, dy)` from this coordinate to `other`.
    pub fn delta(&self, other: &Coordinate) -> (isize, isize) {
        (
            other.x as isize - self.x as isize,
            other.y as isize - self.y as isize,
        )
    }

    /// Returns true if `other` is exactly one orthogonal step away from this coordinate.
    /// Does not consider board bounds.
    pub fn is_adjacent(&self, other: &Coordinate) -> bool {
        let (dx, dy) = self.delta(other);
        dx.abs() + dy.abs() == 1
    }
}

impl From<(usize, usize)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (usize, usize) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_is_orthogonal_only() {
        let c = Coordinate::new(3, 3);
        assert!(c.is_adjacent(&Coordinate::new(3, 2)));
        assert!(c.is_adjacent(&Coordinate::new(4, 3)));
        assert!(!c.is_adjacent(&Coordinate::new(4, 4)));
        assert!(!c.is_adjacent(&c));
        assert!(!c.is_adjacent(&Coordinate::new(5, 3)));
    }

    #[test]
    fn delta_is_signed() {
        let c = Coordinate::new(2, 5);
        assert_eq!(c.delta(&Coordinate::new(7, 4)), (5, -1));
    }
}
