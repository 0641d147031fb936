//! Token identity, team, and footprint types.
//!
//! A token occupies a square footprint of grid cells and belongs to one of
//! two teams once placed. These types are the read-projection handed to the
//! presentation layer, so they serialize.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The board is `GRID_SIZE` x `GRID_SIZE` cells.
///
/// Coordinates are signed so that drag candidates outside the grid are
/// representable before bounds rejection.
pub const GRID_SIZE: i32 = 20;

/// Largest token edge length offered by the palette.
pub const MAX_TOKEN_SIZE: i32 = 8;

/// Unique, monotonically assigned token identifier, stable for the token's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The side a placed token fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Ally,
    Enemy,
}

impl Team {
    /// Returns the opposing team.
    pub const fn opponent(self) -> Team {
        match self {
            Team::Ally => Team::Enemy,
            Team::Enemy => Team::Ally,
        }
    }

    /// Returns the lowercase keyword used by the driver commands.
    pub const fn keyword(self) -> &'static str {
        match self {
            Team::Ally => "ally",
            Team::Enemy => "enemy",
        }
    }

    /// Parses a team from its driver keyword.
    pub fn from_keyword(s: &str) -> Option<Team> {
        match s {
            "ally" => Some(Team::Ally),
            "enemy" => Some(Team::Enemy),
            _ => None,
        }
    }
}

/// The square block of cells a token occupies: rows `[row, row+size)` and
/// columns `[col, col+size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub row: i32,
    pub col: i32,
    pub size: i32,
}

impl Footprint {
    pub const fn new(row: i32, col: i32, size: i32) -> Self {
        Footprint { row, col, size }
    }

    /// One past the last row covered.
    pub const fn bottom(&self) -> i32 {
        self.row + self.size
    }

    /// One past the last column covered.
    pub const fn right(&self) -> i32 {
        self.col + self.size
    }

    /// True iff every covered cell lies inside the grid.
    pub const fn in_bounds(&self) -> bool {
        self.row >= 0 && self.col >= 0 && self.bottom() <= GRID_SIZE && self.right() <= GRID_SIZE
    }

    /// Iterates the covered `(row, col)` cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let fp = *self;
        (fp.row..fp.bottom()).flat_map(move |r| (fp.col..fp.right()).map(move |c| (r, c)))
    }
}

/// A token on the board.
///
/// A token without a team is pending team selection: it is tracked in the
/// token list but does not occupy grid cells and takes no part in flanking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub id: TokenId,
    pub footprint: Footprint,
    pub team: Option<Team>,
    pub sixth_sense: bool,
}

impl Token {
    /// True once the token has a team and therefore occupies its footprint.
    pub const fn is_placed(&self) -> bool {
        self.team.is_some()
    }
}
