//! Session facade tying grid, rules, and interaction together.
//!
//! Owns the mutable state and runs the event loop step: feed an event to the
//! state machine, then apply the effects it returns. Read accessors expose
//! everything the presentation layer draws from.

use crate::flanking::analysis::{analyze_hover, flanking_bonus, is_flanked, HoverAnalysis, Rules};
use crate::grid::model::GridModel;
use crate::grid::token::{Footprint, Token, TokenId};
use crate::interact::{
    apply, DragSource, Event, InteractionState, Machine, PixelMap,
};
use crate::scenario::{self, Scenario, ScenarioError};

/// The in-flight drag's snapped footprint and whether dropping there would
/// succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPreview {
    pub footprint: Footprint,
    pub valid: bool,
}

/// One editing session over a single grid.
#[derive(Debug)]
pub struct Session {
    grid: GridModel,
    rules: Rules,
    machine: Machine,
    map: PixelMap,
}

impl Session {
    pub fn new(map: PixelMap) -> Self {
        Session {
            grid: GridModel::new(),
            rules: Rules::default(),
            machine: Machine::new(),
            map,
        }
    }

    /// Runs one event through the state machine and applies its effects.
    pub fn handle(&mut self, event: &Event) {
        let effects = self.machine.handle(event, &self.grid, self.map);
        for effect in effects {
            apply(effect, &mut self.grid, &mut self.rules);
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn tokens(&self) -> &[Token] {
        self.grid.tokens()
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn diagonal_enabled(&self) -> bool {
        self.rules.diagonal_flanking
    }

    pub fn state(&self) -> InteractionState {
        self.machine.state()
    }

    pub fn map(&self) -> PixelMap {
        self.map
    }

    /// Whether the named token is currently flanked. `None` for unknown ids.
    pub fn is_flanked(&self, id: TokenId) -> Option<bool> {
        let token = self.grid.token(id)?;
        Some(is_flanked(token, self.grid.tokens(), self.rules))
    }

    /// The bonus `attacker` earns against `target` right now.
    pub fn bonus(&self, attacker: TokenId, target: TokenId) -> Option<u8> {
        let a = self.grid.token(attacker)?;
        let t = self.grid.token(target)?;
        Some(flanking_bonus(a, t, self.grid.tokens(), self.rules))
    }

    /// Flanking overlay for any placed token, hovered or not.
    pub fn analyze(&self, id: TokenId) -> Option<HoverAnalysis> {
        analyze_hover(id, self.grid.tokens(), self.rules)
    }

    /// Flanking overlay for the currently hovered token, if any.
    pub fn hover_analysis(&self) -> Option<HoverAnalysis> {
        match self.machine.state() {
            InteractionState::Hovering { token } => self.analyze(token),
            _ => None,
        }
    }

    /// Snapped drop position and validity of the in-flight drag, if the
    /// cursor is over the grid.
    pub fn drag_preview(&self) -> Option<DragPreview> {
        let InteractionState::Dragging(drag) = self.machine.state() else {
            return None;
        };
        let footprint = drag.candidate?;
        let ignore = match drag.source {
            DragSource::Existing { token, .. } => Some(token),
            DragSource::Palette => None,
        };
        Some(DragPreview {
            footprint,
            valid: self.grid.is_free(footprint, ignore),
        })
    }

    /// Empties the board and returns every flow to idle. Rules keep their
    /// current toggles.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.machine.reset();
    }

    /// Replaces the board with a scenario and returns to idle.
    pub fn load_scenario(&mut self, s: &Scenario) -> Result<(), ScenarioError> {
        scenario::load(s, &mut self.grid, &mut self.rules)?;
        self.machine.reset();
        Ok(())
    }

    /// Loads built-in preset `n` (1-based) and returns to idle.
    pub fn load_preset(&mut self, n: usize) -> bool {
        let loaded = scenario::load_preset(n, &mut self.grid, &mut self.rules);
        if loaded {
            self.machine.reset();
        }
        loaded
    }
}
