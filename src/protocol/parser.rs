//! Command parser for the driver loop.
//!
//! Parses incoming command lines from raw text into structured `Command`
//! variants that the driver main loop can dispatch on.

use crate::grid::token::{Team, TokenId, MAX_TOKEN_SIZE};
use crate::interact::MenuAction;

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Place a new token via a synthesized palette drag:
    /// `place <size> <row> <col> <team>`.
    Place {
        size: i32,
        row: i32,
        col: i32,
        team: Team,
    },

    /// Drag an existing token so its top-left corner lands on a cell:
    /// `drag <id> <row> <col>`.
    Drag { id: TokenId, row: i32, col: i32 },

    /// Click a token without moving it: `click <id>`.
    Click { id: TokenId },

    /// Answer the team-selection prompt: `team ally|enemy`.
    Team { team: Team },

    /// Start hovering a token: `hover <id>`.
    Hover { id: TokenId },

    /// Stop hovering.
    Unhover,

    /// Open the context menu on a token or the grid: `menu <id>|grid`.
    Menu { target: Option<TokenId> },

    /// Activate a context-menu entry: `menu-select <entry>`.
    MenuSelect { action: MenuAction },

    /// Click outside the open menu.
    Outside,

    /// Advance time: `tick [n]`.
    Tick { count: u32 },

    /// Toggle diagonal flanking from the side panel.
    Diagonal,

    /// Load built-in preset `n`: `scenario <n>`.
    Scenario { index: usize },

    /// Load a scenario from a JSON file: `load <path>`.
    Load { path: String },

    /// Remove every token.
    Clear,

    /// Print all tokens as JSON.
    Tokens,

    /// Print the interaction state and rule toggles.
    State,

    /// Print the hover analysis as JSON.
    Report,

    /// Print whether a token is flanked: `flanked <id>`.
    Flanked { id: TokenId },

    /// Print the bonus one token earns against another: `bonus <a> <t>`.
    Bonus { attacker: TokenId, target: TokenId },

    /// Terminate the driver process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging to stderr.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "unhover" => Some(Command::Unhover),
        "outside" => Some(Command::Outside),
        "diagonal" => Some(Command::Diagonal),
        "clear" => Some(Command::Clear),
        "tokens" => Some(Command::Tokens),
        "state" => Some(Command::State),
        "report" => Some(Command::Report),
        "quit" => Some(Command::Quit),

        "place" => parse_place(&tokens),
        "drag" => parse_drag(&tokens),
        "click" => parse_id(&tokens, "click").map(|id| Command::Click { id }),
        "team" => parse_team(&tokens),
        "hover" => parse_id(&tokens, "hover").map(|id| Command::Hover { id }),
        "menu" => parse_menu(&tokens),
        "menu-select" => parse_menu_select(&tokens),
        "tick" => parse_tick(&tokens),
        "scenario" => parse_scenario(&tokens),
        "load" => parse_load(&tokens),
        "flanked" => parse_id(&tokens, "flanked").map(|id| Command::Flanked { id }),
        "bonus" => parse_bonus(&tokens),

        other => {
            eprintln!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `place <size> <row> <col> <team>`.
fn parse_place(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 5 {
        eprintln!("malformed place: expected 'place <size> <row> <col> <team>'");
        return None;
    }
    let (Ok(size), Ok(row), Ok(col)) = (tokens[1].parse(), tokens[2].parse(), tokens[3].parse())
    else {
        eprintln!("malformed place: size, row, col must be integers");
        return None;
    };
    if !(1..=MAX_TOKEN_SIZE).contains(&size) {
        eprintln!("malformed place: size must be 1..={}", MAX_TOKEN_SIZE);
        return None;
    }
    let Some(team) = Team::from_keyword(tokens[4]) else {
        eprintln!("malformed place: team must be 'ally' or 'enemy'");
        return None;
    };
    Some(Command::Place {
        size,
        row,
        col,
        team,
    })
}

/// Parses `drag <id> <row> <col>`.
fn parse_drag(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 4 {
        eprintln!("malformed drag: expected 'drag <id> <row> <col>'");
        return None;
    }
    let (Ok(id), Ok(row), Ok(col)) = (tokens[1].parse(), tokens[2].parse(), tokens[3].parse())
    else {
        eprintln!("malformed drag: id, row, col must be integers");
        return None;
    };
    Some(Command::Drag {
        id: TokenId(id),
        row,
        col,
    })
}

/// Parses commands of the shape `<verb> <id>`.
fn parse_id(tokens: &[&str], verb: &str) -> Option<TokenId> {
    if tokens.len() != 2 {
        eprintln!("malformed {verb}: expected '{verb} <id>'");
        return None;
    }
    match tokens[1].parse() {
        Ok(id) => Some(TokenId(id)),
        Err(_) => {
            eprintln!("malformed {verb}: id must be an integer");
            None
        }
    }
}

/// Parses `team ally|enemy`.
fn parse_team(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed team: expected 'team ally|enemy'");
        return None;
    }
    match Team::from_keyword(tokens[1]) {
        Some(team) => Some(Command::Team { team }),
        None => {
            eprintln!("malformed team: must be 'ally' or 'enemy'");
            None
        }
    }
}

/// Parses `menu <id>|grid`.
fn parse_menu(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed menu: expected 'menu <id>|grid'");
        return None;
    }
    if tokens[1] == "grid" {
        return Some(Command::Menu { target: None });
    }
    match tokens[1].parse() {
        Ok(id) => Some(Command::Menu {
            target: Some(TokenId(id)),
        }),
        Err(_) => {
            eprintln!("malformed menu: target must be a token id or 'grid'");
            None
        }
    }
}

/// Parses `menu-select <entry>` where the entry is one of
/// delete, swap-team, sixth-sense, diagonal, clear, scenarios, load <n>.
fn parse_menu_select(tokens: &[&str]) -> Option<Command> {
    let action = match tokens.get(1).copied() {
        Some("delete") => MenuAction::Delete,
        Some("swap-team") => MenuAction::SwapTeam,
        Some("sixth-sense") => MenuAction::ToggleSixthSense,
        Some("diagonal") => MenuAction::ToggleDiagonal,
        Some("clear") => MenuAction::ClearAll,
        Some("scenarios") => MenuAction::Scenarios,
        Some("load") => {
            let Some(Ok(n)) = tokens.get(2).map(|t| t.parse()) else {
                eprintln!("malformed menu-select: expected 'menu-select load <n>'");
                return None;
            };
            MenuAction::LoadScenario(n)
        }
        _ => {
            eprintln!("malformed menu-select: unknown entry");
            return None;
        }
    };
    Some(Command::MenuSelect { action })
}

/// Parses `tick [n]`; the count defaults to 1.
fn parse_tick(tokens: &[&str]) -> Option<Command> {
    let count = match tokens.get(1) {
        None => 1,
        Some(t) => match t.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("malformed tick: count must be an integer");
                return None;
            }
        },
    };
    Some(Command::Tick { count })
}

/// Parses `scenario <n>`.
fn parse_scenario(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed scenario: expected 'scenario <n>'");
        return None;
    }
    match tokens[1].parse() {
        Ok(index) => Some(Command::Scenario { index }),
        Err(_) => {
            eprintln!("malformed scenario: index must be an integer");
            None
        }
    }
}

/// Parses `load <path>`.
fn parse_load(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 2 {
        eprintln!("malformed load: expected 'load <path>'");
        return None;
    }
    Some(Command::Load {
        path: tokens[1].to_owned(),
    })
}

/// Parses `bonus <attacker> <target>`.
fn parse_bonus(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        eprintln!("malformed bonus: expected 'bonus <attacker> <target>'");
        return None;
    }
    let (Ok(a), Ok(t)) = (tokens[1].parse(), tokens[2].parse()) else {
        eprintln!("malformed bonus: ids must be integers");
        return None;
    };
    Some(Command::Bonus {
        attacker: TokenId(a),
        target: TokenId(t),
    })
}
