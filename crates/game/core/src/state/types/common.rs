use std::fmt;

/// Discrete grid cell expressed as `(row, col)`.
///
/// Coordinates are signed so that extrapolated or offset cells can fall off
/// the board and be rejected by [`crate::Board::contains`] instead of wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Sum of absolute coordinate differences.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The neighbouring cell one step in `direction` (may be off-grid).
    #[inline]
    pub fn offset(self, direction: Direction) -> Cell {
        let (dr, dc) = direction.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    /// Raw displacement `self - from` per axis.
    #[inline]
    pub fn delta_from(self, from: Cell) -> (i32, i32) {
        (self.row - from.row, self.col - from.col)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal unit steps on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Direction {
    /// `row + 1`
    South,
    /// `row - 1`
    North,
    /// `col + 1`
    East,
    /// `col - 1`
    West,
}

impl Direction {
    /// Canonical enumeration order. Search and neighbour expansion walk the
    /// directions in this order, which fixes tie-breaks between equal moves.
    pub const ALL: [Direction; 4] = [
        Direction::South,
        Direction::North,
        Direction::East,
        Direction::West,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::South => (1, 0),
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }

    /// Recovers the unit step that leads from `from` to `to`.
    ///
    /// Returns `None` unless the two cells are orthogonally adjacent.
    pub fn between(from: Cell, to: Cell) -> Option<Direction> {
        let delta = to.delta_from(from);
        Self::ALL.into_iter().find(|dir| dir.delta() == delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_is_symmetric() {
        let a = Cell::new(0, 0);
        let b = Cell::new(4, 3);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
    }

    #[test]
    fn between_recovers_unit_steps_only() {
        let origin = Cell::new(2, 2);
        for dir in Direction::ALL {
            assert_eq!(Direction::between(origin, origin.offset(dir)), Some(dir));
        }
        assert_eq!(Direction::between(origin, Cell::new(3, 3)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }
}
