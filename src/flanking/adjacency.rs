//! Directional adjacency between token footprints.
//!
//! Cardinal adjacency requires edge contact plus overlap of the projections
//! onto the perpendicular axis, so two footprints count as adjacent only when
//! they share a full or partial edge, never just a corner. Diagonal adjacency
//! is the opposite: exact corner coincidence.
//!
//! `is_adjacent(a, b, North)` reads "a lies on the north side of b". The
//! relation is symmetric under direction reversal: it holds iff
//! `is_adjacent(b, a, South)` does.

use serde::Serialize;

use crate::grid::token::Footprint;

/// One of the eight sides a footprint can border another on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// Mutually-opposite cardinal side pairs.
    pub const CARDINAL_AXES: [(Direction, Direction); 2] = [
        (Direction::North, Direction::South),
        (Direction::East, Direction::West),
    ];

    /// Mutually-opposite diagonal side pairs.
    pub const DIAGONAL_AXES: [(Direction, Direction); 2] = [
        (Direction::NorthEast, Direction::SouthWest),
        (Direction::NorthWest, Direction::SouthEast),
    ];

    /// The side directly opposite this one.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::NorthWest
                | Direction::SouthEast
                | Direction::SouthWest
        )
    }
}

/// Axis onto which footprints are projected for the overlap test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Rows,
    Columns,
}

/// True iff the projections of `a` and `b` onto `axis` intersect, i.e. the
/// footprints are not fully offset past each other along it.
pub fn overlaps_on_axis(a: Footprint, b: Footprint, axis: Axis) -> bool {
    match axis {
        Axis::Rows => !(a.row >= b.bottom() || a.bottom() <= b.row),
        Axis::Columns => !(a.col >= b.right() || a.right() <= b.col),
    }
}

/// True iff `a` borders `b` on the given side of `b`.
pub fn is_adjacent(a: Footprint, b: Footprint, dir: Direction) -> bool {
    match dir {
        Direction::North => a.bottom() == b.row && overlaps_on_axis(a, b, Axis::Columns),
        Direction::South => a.row == b.bottom() && overlaps_on_axis(a, b, Axis::Columns),
        Direction::East => a.col == b.right() && overlaps_on_axis(a, b, Axis::Rows),
        Direction::West => a.right() == b.col && overlaps_on_axis(a, b, Axis::Rows),
        Direction::NorthEast => a.bottom() == b.row && a.col == b.right(),
        Direction::NorthWest => a.bottom() == b.row && a.right() == b.col,
        Direction::SouthEast => a.row == b.bottom() && a.col == b.right(),
        Direction::SouthWest => a.row == b.bottom() && a.right() == b.col,
    }
}
