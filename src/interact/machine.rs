//! The interaction state machine.
//!
//! Exactly one modal flow (idle, dragging, team selection, hover analysis,
//! context menu) is live at a time. Transitions are a pure function
//! `(state, press, event) -> (state, press, effects)` over a read-only view
//! of the grid, so event sequences are unit-testable without pointer
//! hardware. Effects are applied afterwards by the lifecycle.
//!
//! A pointer press is tracked alongside the state until it is classified:
//! motion beyond `DRAG_THRESHOLD_PX` makes it a drag, release before that
//! makes it a click. Classification happens once and is never revisited.

use super::event::{ContextTarget, Event, MenuAction, PixelMap, PixelPoint, PointerTarget};
use super::lifecycle::Effect;
use crate::grid::model::GridModel;
use crate::grid::token::{Footprint, TokenId};
use crate::scenario;

/// Pointer travel, in pixels, separating a click from a drag.
pub const DRAG_THRESHOLD_PX: f32 = 3.0;

/// Ticks after which an unattended context menu closes itself.
pub const MENU_TIMEOUT_TICKS: u32 = 30;

/// Where a drag originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// A palette button; the token is spawned only on a valid drop.
    Palette,
    /// An existing token, vacated at drag start; `origin` is the footprint
    /// to revert to on an invalid drop.
    Existing { token: TokenId, origin: Footprint },
}

/// Live drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub source: DragSource,
    pub size: i32,
    /// Snapped in-bounds footprint under the cursor, `None` while off-grid.
    /// Validity (freeness) is judged separately, at drop and for feedback.
    pub candidate: Option<Footprint>,
}

/// Which page the context menu is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPage {
    Actions,
    Scenarios,
}

/// An open context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// The token the menu targets, or `None` for the grid menu.
    pub target: Option<TokenId>,
    pub page: MenuPage,
    /// Ticks since the menu opened or was replaced.
    pub age: u32,
}

impl MenuState {
    fn open(target: Option<TokenId>) -> Self {
        MenuState {
            target,
            page: MenuPage::Actions,
            age: 0,
        }
    }
}

/// The single active modal interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionState {
    Idle,
    Dragging(DragState),
    TeamSelect { token: TokenId },
    Hovering { token: TokenId },
    ContextMenu(MenuState),
}

impl InteractionState {
    /// Short state name for cursor/affordance feedback and the driver.
    pub const fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "idle",
            InteractionState::Dragging(_) => "dragging",
            InteractionState::TeamSelect { .. } => "team-select",
            InteractionState::Hovering { .. } => "hovering",
            InteractionState::ContextMenu(_) => "context-menu",
        }
    }
}

/// A pointer press not yet classified as click or drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Press {
    pub target: PointerTarget,
    pub at: PixelPoint,
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: InteractionState,
    pub press: Option<Press>,
    pub effects: Vec<Effect>,
}

impl Step {
    fn stay(state: InteractionState, press: Option<Press>) -> Self {
        Step {
            state,
            press,
            effects: Vec::new(),
        }
    }

    fn to(state: InteractionState) -> Self {
        Step {
            state,
            press: None,
            effects: Vec::new(),
        }
    }

    fn with(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Computes the next state and effects for an event.
///
/// The grid is read-only here: guards consult it (bounds, freeness, token
/// existence, the next spawn id) but every mutation is returned as an
/// `Effect` for the lifecycle.
pub fn transition(
    state: InteractionState,
    press: Option<Press>,
    event: &Event,
    grid: &GridModel,
    map: PixelMap,
) -> Step {
    match state {
        InteractionState::Idle => transition_idle(press, event, grid, map),
        InteractionState::Dragging(drag) => transition_dragging(drag, event, grid, map),
        InteractionState::TeamSelect { token } => transition_team_select(token, event),
        InteractionState::Hovering { token } => transition_hovering(token, press, event, grid, map),
        InteractionState::ContextMenu(menu) => transition_menu(menu, event, grid),
    }
}

fn transition_idle(
    press: Option<Press>,
    event: &Event,
    grid: &GridModel,
    map: PixelMap,
) -> Step {
    let idle = InteractionState::Idle;
    match *event {
        Event::PointerDown { target, at } => match target {
            PointerTarget::Palette { .. } | PointerTarget::Token(_) => {
                Step::stay(idle, Some(Press { target, at }))
            }
            PointerTarget::Empty => Step::to(idle),
        },
        Event::PointerMove { at } => match press {
            Some(p) if at.distance(p.at) > DRAG_THRESHOLD_PX => begin_drag(p, at, grid, map),
            _ => Step::stay(idle, press),
        },
        Event::PointerUp { .. } => match press {
            // A click. Only teamless tokens react: they open team selection.
            Some(Press {
                target: PointerTarget::Token(id),
                ..
            }) if grid.token(id).is_some_and(|t| t.team.is_none()) => {
                Step::to(InteractionState::TeamSelect { token: id })
            }
            _ => Step::to(idle),
        },
        Event::HoverEnter { token } => {
            if grid.token(token).is_some_and(|t| t.is_placed()) {
                Step::to(InteractionState::Hovering { token })
            } else {
                Step::stay(idle, press)
            }
        }
        Event::ContextClick { target } => open_menu(target),
        Event::ToggleDiagonal => Step::stay(idle, press).with(Effect::ToggleDiagonal),
        Event::LoadScenario(n) => Step::to(idle).with(Effect::LoadScenario(n)),
        Event::ClearAll => Step::to(idle).with(Effect::ClearAll),
        Event::HoverLeave
        | Event::TeamChosen(_)
        | Event::MenuSelect(_)
        | Event::OutsideClick
        | Event::Tick => Step::stay(idle, press),
    }
}

/// Classifies a press as a drag once motion exceeds the threshold.
fn begin_drag(press: Press, at: PixelPoint, grid: &GridModel, map: PixelMap) -> Step {
    match press.target {
        PointerTarget::Palette { size } => {
            let drag = DragState {
                source: DragSource::Palette,
                size,
                candidate: snap_candidate(map, at, size),
            };
            Step::to(InteractionState::Dragging(drag))
        }
        PointerTarget::Token(id) => {
            let Some(token) = grid.token(id) else {
                // Stale press target; nothing to pick up.
                return Step::to(InteractionState::Idle);
            };
            let origin = token.footprint;
            let drag = DragState {
                source: DragSource::Existing { token: id, origin },
                size: origin.size,
                candidate: snap_candidate(map, at, origin.size),
            };
            Step::to(InteractionState::Dragging(drag)).with(Effect::Vacate(id))
        }
        PointerTarget::Empty => Step::to(InteractionState::Idle),
    }
}

fn snap_candidate(map: PixelMap, at: PixelPoint, size: i32) -> Option<Footprint> {
    let fp = map.snap_footprint(at, size);
    fp.in_bounds().then_some(fp)
}

fn transition_dragging(drag: DragState, event: &Event, grid: &GridModel, map: PixelMap) -> Step {
    match *event {
        Event::PointerMove { at } => {
            let updated = DragState {
                candidate: snap_candidate(map, at, drag.size),
                ..drag
            };
            Step::to(InteractionState::Dragging(updated))
        }
        Event::PointerUp { at } => {
            let snap = map.snap_footprint(at, drag.size);
            let ignore = match drag.source {
                DragSource::Existing { token, .. } => Some(token),
                DragSource::Palette => None,
            };
            let valid = snap.in_bounds() && grid.is_free(snap, ignore);
            match drag.source {
                DragSource::Palette => {
                    if valid {
                        // Spawn teamless and prompt for a team.
                        let id = grid.peek_next_id();
                        Step::to(InteractionState::TeamSelect { token: id })
                            .with(Effect::Spawn { footprint: snap })
                    } else {
                        // Invalid drop of a brand-new token: discard.
                        Step::to(InteractionState::Idle)
                    }
                }
                DragSource::Existing { token, .. } => {
                    if valid {
                        Step::to(InteractionState::Idle)
                            .with(Effect::MoveTo { token, to: snap })
                    } else {
                        // Revert to the committed position.
                        Step::to(InteractionState::Idle).with(Effect::Occupy(token))
                    }
                }
            }
        }
        // Everything else is ignored while the pointer is captured.
        _ => Step::to(InteractionState::Dragging(drag)),
    }
}

fn transition_team_select(token: TokenId, event: &Event) -> Step {
    match *event {
        Event::TeamChosen(team) => {
            Step::to(InteractionState::Idle).with(Effect::AssignTeam { token, team })
        }
        // The prompt is modal; everything else waits.
        _ => Step::to(InteractionState::TeamSelect { token }),
    }
}

fn transition_hovering(
    token: TokenId,
    press: Option<Press>,
    event: &Event,
    grid: &GridModel,
    map: PixelMap,
) -> Step {
    match *event {
        Event::HoverLeave => Step::to(InteractionState::Idle),
        Event::HoverEnter { token: next } => {
            if grid.token(next).is_some_and(|t| t.is_placed()) {
                Step::to(InteractionState::Hovering { token: next })
            } else {
                Step::stay(InteractionState::Hovering { token }, press)
            }
        }
        // Pressing down ends the hover overlay and arms a possible drag.
        // The idle handler already lands in idle; keep its effects too.
        Event::PointerDown { .. } => transition_idle(None, event, grid, map),
        Event::ContextClick { target } => open_menu(target),
        Event::ToggleDiagonal => {
            // Analysis is recomputed on demand, so the hover survives.
            Step::stay(InteractionState::Hovering { token }, press)
                .with(Effect::ToggleDiagonal)
        }
        Event::LoadScenario(n) => Step::to(InteractionState::Idle).with(Effect::LoadScenario(n)),
        Event::ClearAll => Step::to(InteractionState::Idle).with(Effect::ClearAll),
        _ => Step::stay(InteractionState::Hovering { token }, press),
    }
}

fn open_menu(target: ContextTarget) -> Step {
    let target = match target {
        ContextTarget::Token(id) => Some(id),
        ContextTarget::Grid => None,
    };
    Step::to(InteractionState::ContextMenu(MenuState::open(target)))
}

fn transition_menu(menu: MenuState, event: &Event, grid: &GridModel) -> Step {
    let open = InteractionState::ContextMenu(menu);
    match *event {
        Event::MenuSelect(action) => menu_select(menu, action, grid),
        Event::OutsideClick => Step::to(InteractionState::Idle),
        // A new right-click replaces the menu contents in place.
        Event::ContextClick { target } => open_menu(target),
        // Pointer-down closes the menu first, then may arm a drag press.
        Event::PointerDown { target, at } => match target {
            PointerTarget::Palette { .. } | PointerTarget::Token(_) => {
                Step::stay(InteractionState::Idle, Some(Press { target, at }))
            }
            PointerTarget::Empty => Step::to(InteractionState::Idle),
        },
        Event::Tick => {
            let age = menu.age + 1;
            if age >= MENU_TIMEOUT_TICKS {
                Step::to(InteractionState::Idle)
            } else {
                Step::to(InteractionState::ContextMenu(MenuState { age, ..menu }))
            }
        }
        _ => Step::to(open),
    }
}

fn menu_select(menu: MenuState, action: MenuAction, grid: &GridModel) -> Step {
    let close = Step::to(InteractionState::Idle);
    // Token actions on a target that vanished underneath the menu are not
    // errors; the menu just closes.
    let live_target = menu.target.filter(|&id| grid.token(id).is_some());
    match action {
        MenuAction::Delete => match live_target {
            Some(id) => close.with(Effect::Remove(id)),
            None => close,
        },
        MenuAction::SwapTeam => match live_target {
            Some(id) => close.with(Effect::SwapTeam(id)),
            None => close,
        },
        MenuAction::ToggleSixthSense => match live_target {
            Some(id) => close.with(Effect::ToggleSixthSense(id)),
            None => close,
        },
        MenuAction::ToggleDiagonal => close.with(Effect::ToggleDiagonal),
        MenuAction::ClearAll => close.with(Effect::ClearAll),
        MenuAction::Scenarios => Step::to(InteractionState::ContextMenu(MenuState {
            target: None,
            page: MenuPage::Scenarios,
            age: 0,
        })),
        MenuAction::LoadScenario(n) if n >= 1 && n <= scenario::PRESET_COUNT => {
            close.with(Effect::LoadScenario(n))
        }
        // Unknown scenario index: an invalid user action, just close.
        MenuAction::LoadScenario(_) => close,
    }
}

/// Owns the current state and pending press, and runs transitions.
#[derive(Debug)]
pub struct Machine {
    state: InteractionState,
    press: Option<Press>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    pub fn new() -> Self {
        Machine {
            state: InteractionState::Idle,
            press: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Feeds one event through the transition function and returns the
    /// effects for the lifecycle to apply.
    pub fn handle(&mut self, event: &Event, grid: &GridModel, map: PixelMap) -> Vec<Effect> {
        let step = transition(self.state, self.press, event, grid, map);
        self.state = step.state;
        self.press = step.press;
        step.effects
    }

    /// Returns to idle, dropping any press or open modal.
    pub fn reset(&mut self) {
        self.state = InteractionState::Idle;
        self.press = None;
    }
}
