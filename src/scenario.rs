//! Preset and file-loaded board scenarios.
//!
//! A scenario is a named token layout plus the diagonal-flanking flag. The
//! built-in presets back the context-menu submenu; arbitrary scenarios load
//! from JSON. Loading is transactional: a scenario that fails validation
//! leaves the current board untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flanking::analysis::Rules;
use crate::grid::model::GridModel;
use crate::grid::token::{Footprint, Team, MAX_TOKEN_SIZE};

/// Number of built-in presets, indexed 1-based.
pub const PRESET_COUNT: usize = 6;

/// One token of a scenario layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioToken {
    pub row: i32,
    pub col: i32,
    #[serde(default = "default_size")]
    pub size: i32,
    pub team: Team,
    #[serde(default)]
    pub sixth_sense: bool,
}

fn default_size() -> i32 {
    1
}

/// A named board layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub diagonal_flanking: bool,
    pub tokens: Vec<ScenarioToken>,
}

/// Why a scenario was rejected.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("token size {0} outside 1..={MAX_TOKEN_SIZE}")]
    InvalidSize(i32),
    #[error("token at ({row}, {col}) size {size} leaves the grid")]
    OutOfBounds { row: i32, col: i32, size: i32 },
    #[error("tokens overlap at ({row}, {col})")]
    Overlap { row: i32, col: i32 },
    #[error("malformed scenario: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Parses a scenario from JSON.
pub fn parse(json: &str) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_str(json)?)
}

/// Validates a scenario and replaces the board and rules with it.
///
/// The layout is staged on a scratch grid first, so on error the live grid
/// and rules are unchanged.
pub fn load(scenario: &Scenario, grid: &mut GridModel, rules: &mut Rules) -> Result<(), ScenarioError> {
    let mut staged = GridModel::new();
    for t in &scenario.tokens {
        if !(1..=MAX_TOKEN_SIZE).contains(&t.size) {
            return Err(ScenarioError::InvalidSize(t.size));
        }
        let fp = Footprint::new(t.row, t.col, t.size);
        if !fp.in_bounds() {
            return Err(ScenarioError::OutOfBounds {
                row: t.row,
                col: t.col,
                size: t.size,
            });
        }
        if !staged.is_free(fp, None) {
            return Err(ScenarioError::Overlap {
                row: t.row,
                col: t.col,
            });
        }
        let id = staged.spawn(fp, Some(t.team));
        if t.sixth_sense {
            staged.toggle_sixth_sense(id);
        }
    }
    *grid = staged;
    rules.diagonal_flanking = scenario.diagonal_flanking;
    Ok(())
}

/// Loads built-in preset `n` (1-based). Returns false for unknown indices.
pub fn load_preset(n: usize, grid: &mut GridModel, rules: &mut Rules) -> bool {
    match preset(n) {
        Some(s) => load(&s, grid, rules).is_ok(),
        None => false,
    }
}

/// Names of the built-in presets, for menu display.
pub fn preset_names() -> [&'static str; PRESET_COUNT] {
    [
        "Basic Flanking",
        "Multi-Side",
        "Same-Side Allies",
        "Counter-Flanking",
        "6th Sense",
        "Diagonal",
    ]
}

fn st(row: i32, col: i32, size: i32, team: Team) -> ScenarioToken {
    ScenarioToken {
        row,
        col,
        size,
        team,
        sixth_sense: false,
    }
}

/// The built-in preset `n` (1-based), or `None`.
pub fn preset(n: usize) -> Option<Scenario> {
    let names = preset_names();
    let scenario = match n {
        // A 2x2 enemy caught between two allies.
        1 => Scenario {
            name: names[0].to_owned(),
            diagonal_flanking: false,
            tokens: vec![
                st(9, 9, 2, Team::Enemy),
                st(8, 9, 1, Team::Ally),
                st(11, 9, 1, Team::Ally),
            ],
        },
        // Allies on all four sides.
        2 => Scenario {
            name: names[1].to_owned(),
            diagonal_flanking: false,
            tokens: vec![
                st(9, 9, 2, Team::Enemy),
                st(8, 9, 1, Team::Ally),
                st(11, 9, 1, Team::Ally),
                st(9, 8, 1, Team::Ally),
                st(9, 11, 1, Team::Ally),
            ],
        },
        // A second ally on an already-held side adds nothing.
        3 => Scenario {
            name: names[2].to_owned(),
            diagonal_flanking: false,
            tokens: vec![
                st(9, 9, 2, Team::Enemy),
                st(8, 9, 1, Team::Ally),
                st(11, 9, 1, Team::Ally),
                st(11, 10, 1, Team::Ally),
            ],
        },
        // A pincering enemy neutralizes the north ally.
        4 => Scenario {
            name: names[3].to_owned(),
            diagonal_flanking: false,
            tokens: vec![
                st(9, 9, 2, Team::Enemy),
                st(8, 9, 1, Team::Ally),
                st(11, 9, 1, Team::Ally),
                st(9, 8, 1, Team::Ally),
                st(9, 11, 1, Team::Ally),
                st(7, 9, 1, Team::Enemy),
            ],
        },
        // Surrounded but immune.
        5 => Scenario {
            name: names[4].to_owned(),
            diagonal_flanking: false,
            tokens: vec![
                ScenarioToken {
                    sixth_sense: true,
                    ..st(9, 9, 2, Team::Enemy)
                },
                st(8, 9, 1, Team::Ally),
                st(11, 9, 1, Team::Ally),
                st(9, 8, 1, Team::Ally),
                st(9, 11, 1, Team::Ally),
            ],
        },
        // Corner contact with the diagonal rule enabled.
        6 => Scenario {
            name: names[5].to_owned(),
            diagonal_flanking: true,
            tokens: vec![
                st(9, 9, 2, Team::Enemy),
                st(8, 8, 1, Team::Ally),
                st(11, 11, 1, Team::Ally),
            ],
        },
        _ => return None,
    };
    Some(scenario)
}
