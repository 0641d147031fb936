//! Adjacency and flanking computation.
//!
//! Pure, side-effect-free functions over token footprints: directional
//! adjacency between two footprints, flanked status, bonus magnitude, and
//! the hover analysis handed to the presentation layer.

pub mod adjacency;
pub mod analysis;

pub use adjacency::{is_adjacent, overlaps_on_axis, Axis, Direction};
pub use analysis::{
    analyze_hover, flanking_bonus, is_flanked, Contact, HoverAnalysis, Rules, BASE_BONUS,
    MAX_BONUS,
};
