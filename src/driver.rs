//! Driver state management.
//!
//! Holds the session between commands and synthesizes pointer gestures for
//! the coordinate-level commands (`place`, `drag`, `click`), so scripted
//! input exercises the same state-machine paths as live pointer input.

use std::fs;
use std::io::Write;

use crate::grid::token::{Footprint, Team, TokenId};
use crate::interact::{
    ContextTarget, Event, InteractionState, MenuAction, PixelMap, PixelPoint, PointerTarget,
};
use crate::scenario;
use crate::session::Session;

/// Cell edge length used for synthesized pointer coordinates.
const CELL_PX: f32 = 32.0;

/// A pointer position guaranteed to be off the grid.
const OFF_GRID: PixelPoint = PixelPoint::new(-100.0, -100.0);

/// Holds the mutable state of the driver between commands.
pub struct Driver {
    session: Session,
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver {
    pub fn new() -> Self {
        Driver {
            session: Session::new(PixelMap::new(PixelPoint::new(0.0, 0.0), CELL_PX)),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The cursor position that snaps a token of `size` so its top-left
    /// corner lands on `(row, col)`.
    fn cursor_for(&self, row: i32, col: i32, size: i32) -> PixelPoint {
        let off = if size % 2 == 0 { size / 2 - 1 } else { size / 2 };
        self.session.map().cell_center(row + off, col + off)
    }

    /// Places a new token via a synthesized palette drag plus team choice.
    pub fn handle_place<W: Write>(
        &mut self,
        size: i32,
        row: i32,
        col: i32,
        team: Team,
        out: &mut W,
    ) {
        self.session.handle(&Event::PointerDown {
            target: PointerTarget::Palette { size },
            at: OFF_GRID,
        });
        let drop = self.cursor_for(row, col, size);
        self.session.handle(&Event::PointerMove { at: drop });
        self.session.handle(&Event::PointerUp { at: drop });
        match self.session.state() {
            InteractionState::TeamSelect { token } => {
                self.session.handle(&Event::TeamChosen(team));
                writeln!(out, "placed {}", token).unwrap();
            }
            _ => writeln!(out, "rejected").unwrap(),
        }
    }

    /// Drags an existing token so its top-left corner lands on `(row, col)`.
    pub fn handle_drag<W: Write>(&mut self, id: TokenId, row: i32, col: i32, out: &mut W) {
        let Some(token) = self.session.grid().token(id) else {
            eprintln!("unknown token: {}", id);
            return;
        };
        let size = token.footprint.size;
        let from = token.footprint;
        let start = self.cursor_for(from.row, from.col, size);
        self.session.handle(&Event::PointerDown {
            target: PointerTarget::Token(id),
            at: start,
        });
        // Cross the click/drag threshold before heading to the drop cell,
        // in case source and destination share a cursor position.
        self.session.handle(&Event::PointerMove {
            at: PixelPoint::new(start.x + 2.0 * CELL_PX, start.y),
        });
        let drop = self.cursor_for(row, col, size);
        self.session.handle(&Event::PointerMove { at: drop });
        self.session.handle(&Event::PointerUp { at: drop });

        let landed = self
            .session
            .grid()
            .token(id)
            .map(|t| t.footprint)
            .unwrap_or(from);
        if landed == Footprint::new(row, col, size) {
            writeln!(out, "moved {}", id).unwrap();
        } else {
            writeln!(out, "reverted {}", id).unwrap();
        }
    }

    /// Clicks a token in place (press and release under the threshold).
    pub fn handle_click(&mut self, id: TokenId) {
        let Some(token) = self.session.grid().token(id) else {
            eprintln!("unknown token: {}", id);
            return;
        };
        let fp = token.footprint;
        let at = self.cursor_for(fp.row, fp.col, fp.size);
        self.session.handle(&Event::PointerDown {
            target: PointerTarget::Token(id),
            at,
        });
        self.session.handle(&Event::PointerUp { at });
    }

    pub fn handle_team(&mut self, team: Team) {
        self.session.handle(&Event::TeamChosen(team));
    }

    pub fn handle_hover(&mut self, id: TokenId) {
        self.session.handle(&Event::HoverEnter { token: id });
    }

    pub fn handle_unhover(&mut self) {
        self.session.handle(&Event::HoverLeave);
    }

    pub fn handle_menu(&mut self, target: Option<TokenId>) {
        let target = match target {
            Some(id) => ContextTarget::Token(id),
            None => ContextTarget::Grid,
        };
        self.session.handle(&Event::ContextClick { target });
    }

    pub fn handle_menu_select(&mut self, action: MenuAction) {
        self.session.handle(&Event::MenuSelect(action));
    }

    pub fn handle_outside(&mut self) {
        self.session.handle(&Event::OutsideClick);
    }

    pub fn handle_tick(&mut self, count: u32) {
        for _ in 0..count {
            self.session.handle(&Event::Tick);
        }
    }

    pub fn handle_diagonal(&mut self) {
        self.session.handle(&Event::ToggleDiagonal);
    }

    pub fn handle_clear(&mut self) {
        self.session.handle(&Event::ClearAll);
    }

    /// Loads built-in preset `index` (1-based).
    pub fn handle_scenario<W: Write>(&mut self, index: usize, out: &mut W) {
        if self.session.load_preset(index) {
            writeln!(out, "loaded {}", index).unwrap();
        } else {
            eprintln!("unknown scenario: {}", index);
        }
    }

    /// Loads a scenario from a JSON file.
    pub fn handle_load<W: Write>(&mut self, path: &str, out: &mut W) {
        let json = match fs::read_to_string(path) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("cannot read {}: {}", path, e);
                return;
            }
        };
        let scenario = match scenario::parse(&json) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };
        match self.session.load_scenario(&scenario) {
            Ok(()) => writeln!(out, "loaded {}", scenario.name).unwrap(),
            Err(e) => eprintln!("{}", e),
        }
    }

    /// Prints every token as a JSON array.
    pub fn handle_tokens<W: Write>(&self, out: &mut W) {
        let json = serde_json::to_string(self.session.tokens()).unwrap();
        writeln!(out, "{}", json).unwrap();
    }

    /// Prints the interaction state and rule toggles.
    pub fn handle_state<W: Write>(&self, out: &mut W) {
        writeln!(
            out,
            "state {} diagonal {}",
            self.session.state().name(),
            if self.session.diagonal_enabled() {
                "on"
            } else {
                "off"
            }
        )
        .unwrap();
    }

    /// Prints the hover analysis as JSON, or `no hover`.
    pub fn handle_report<W: Write>(&self, out: &mut W) {
        match self.session.hover_analysis() {
            Some(report) => {
                let json = serde_json::to_string(&report).unwrap();
                writeln!(out, "{}", json).unwrap();
            }
            None => writeln!(out, "no hover").unwrap(),
        }
    }

    pub fn handle_flanked<W: Write>(&self, id: TokenId, out: &mut W) {
        match self.session.is_flanked(id) {
            Some(flanked) => writeln!(out, "flanked {}", flanked).unwrap(),
            None => eprintln!("unknown token: {}", id),
        }
    }

    pub fn handle_bonus<W: Write>(&self, attacker: TokenId, target: TokenId, out: &mut W) {
        match self.session.bonus(attacker, target) {
            Some(bonus) => writeln!(out, "bonus {}", bonus).unwrap(),
            None => eprintln!("unknown token pair: {} {}", attacker, target),
        }
    }
}
