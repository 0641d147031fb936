//! Grid occupancy model.
//!
//! Owns the fixed 20x20 cell matrix and the set of placed tokens, and
//! enforces footprint exclusivity.

pub mod model;
pub mod token;

pub use model::GridModel;
pub use token::{Footprint, Team, Token, TokenId, GRID_SIZE, MAX_TOKEN_SIZE};
