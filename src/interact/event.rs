//! Input events consumed by the interaction state machine.
//!
//! The presentation layer resolves raw pointer input into these events: it
//! decides what a pointer went down on and supplies the pixel-to-cell mapping
//! used to snap drag positions to footprints.

use crate::grid::token::{Footprint, Team, TokenId};

/// A point in the host's pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        PixelPoint { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: PixelPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Caller-supplied pixel-to-cell mapping: where the grid starts on screen and
/// how big a cell is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMap {
    pub origin: PixelPoint,
    pub cell_px: f32,
}

impl PixelMap {
    pub const fn new(origin: PixelPoint, cell_px: f32) -> Self {
        PixelMap { origin, cell_px }
    }

    /// The cell under a pixel position. May be outside the grid.
    pub fn cell_at(&self, p: PixelPoint) -> (i32, i32) {
        let row = ((p.y - self.origin.y) / self.cell_px).floor() as i32;
        let col = ((p.x - self.origin.x) / self.cell_px).floor() as i32;
        (row, col)
    }

    /// The pixel center of a cell. Inverse of `cell_at` up to cell centers.
    pub fn cell_center(&self, row: i32, col: i32) -> PixelPoint {
        PixelPoint::new(
            self.origin.x + (col as f32 + 0.5) * self.cell_px,
            self.origin.y + (row as f32 + 0.5) * self.cell_px,
        )
    }

    /// Snaps a cursor position to a footprint of the given size, centered on
    /// the cursor: odd sizes center on the cursor cell, even sizes put the
    /// cursor just below-right of center.
    pub fn snap_footprint(&self, p: PixelPoint, size: i32) -> Footprint {
        let (row, col) = self.cell_at(p);
        let off = if size % 2 == 0 { size / 2 - 1 } else { size / 2 };
        Footprint::new(row - off, col - off, size)
    }
}

/// What a pointer-down landed on, resolved by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A palette button offering tokens of the given size.
    Palette { size: i32 },
    /// An existing token on the grid.
    Token(TokenId),
    /// An empty grid cell or dead space.
    Empty,
}

/// What a context (right-click) event targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextTarget {
    Token(TokenId),
    Grid,
}

/// An entry of the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    // Token menu.
    Delete,
    SwapTeam,
    ToggleSixthSense,
    // Grid menu.
    ToggleDiagonal,
    ClearAll,
    /// Opens the scenario submenu (a same-state menu replacement).
    Scenarios,
    /// Loads preset scenario `n` (1-based) from the submenu.
    LoadScenario(usize),
}

/// An input event for the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    PointerDown { target: PointerTarget, at: PixelPoint },
    PointerMove { at: PixelPoint },
    PointerUp { at: PixelPoint },
    /// Pointer entered a token's footprint.
    HoverEnter { token: TokenId },
    /// Pointer left the hovered token.
    HoverLeave,
    /// Right-click on a token or on the open grid.
    ContextClick { target: ContextTarget },
    /// Team chosen in the team-selection prompt.
    TeamChosen(Team),
    /// A context-menu entry was activated.
    MenuSelect(MenuAction),
    /// A click landed outside the open menu.
    OutsideClick,
    /// One unit of time, for the menu auto-close.
    Tick,
    /// Side-panel toggle for diagonal flanking.
    ToggleDiagonal,
    /// Side-panel button loading preset scenario `n` (1-based).
    LoadScenario(usize),
    /// Side-panel button clearing the board.
    ClearAll,
}
