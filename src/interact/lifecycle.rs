//! Token lifecycle: the effects the state machine emits and their
//! application to the grid.
//!
//! Effects are plain data so transitions stay pure and test assertions can
//! compare them structurally. `apply` is the only place interaction writes
//! to the grid or the rules.

use crate::flanking::analysis::Rules;
use crate::grid::model::GridModel;
use crate::grid::token::{Footprint, Team, TokenId};
use crate::scenario;

/// A grid or rules mutation requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Lift a token off its cells at drag start. The token keeps its
    /// footprint, so a failed drop can re-occupy it.
    Vacate(TokenId),
    /// Re-occupy a token's committed footprint after an invalid drop.
    Occupy(TokenId),
    /// Commit a drag: relocate the token to its drop footprint.
    MoveTo { token: TokenId, to: Footprint },
    /// Create a teamless token from a palette drop; team selection follows.
    Spawn { footprint: Footprint },
    /// Resolve the team-selection prompt; the token starts occupying.
    AssignTeam { token: TokenId, team: Team },
    Remove(TokenId),
    SwapTeam(TokenId),
    ToggleSixthSense(TokenId),
    ToggleDiagonal,
    ClearAll,
    /// Replace the board with preset scenario `n` (1-based). Unknown
    /// indices are ignored.
    LoadScenario(usize),
}

/// Applies one effect to the grid and rules.
pub fn apply(effect: Effect, grid: &mut GridModel, rules: &mut Rules) {
    match effect {
        Effect::Vacate(id) => grid.vacate(id),
        Effect::Occupy(id) => {
            // Teamless tokens never occupy; occupancy stays derivable from
            // the team-bearing token list.
            if grid.token(id).is_some_and(|t| t.is_placed()) {
                grid.occupy(id);
            }
        }
        Effect::MoveTo { token, to } => grid.move_token(token, to),
        Effect::Spawn { footprint } => {
            grid.spawn(footprint, None);
        }
        Effect::AssignTeam { token, team } => grid.assign_team(token, team),
        Effect::Remove(id) => {
            grid.remove(id);
        }
        Effect::SwapTeam(id) => grid.swap_team(id),
        Effect::ToggleSixthSense(id) => grid.toggle_sixth_sense(id),
        Effect::ToggleDiagonal => rules.diagonal_flanking = !rules.diagonal_flanking,
        Effect::ClearAll => grid.clear(),
        Effect::LoadScenario(n) => {
            scenario::load_preset(n, grid, rules);
        }
    }
}
