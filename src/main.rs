//! Flanktool -- a tabletop flanking sandbox driven over a text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one command per line.

use std::io::{self, BufRead, Write};

use flanktool::driver::Driver;
use flanktool::protocol::parser::{parse_command, Command};

/// Runs the main command loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut driver = Driver::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Place {
                size,
                row,
                col,
                team,
            } => {
                driver.handle_place(size, row, col, team, &mut out);
            }
            Command::Drag { id, row, col } => {
                driver.handle_drag(id, row, col, &mut out);
            }
            Command::Click { id } => {
                driver.handle_click(id);
            }
            Command::Team { team } => {
                driver.handle_team(team);
            }
            Command::Hover { id } => {
                driver.handle_hover(id);
            }
            Command::Unhover => {
                driver.handle_unhover();
            }
            Command::Menu { target } => {
                driver.handle_menu(target);
            }
            Command::MenuSelect { action } => {
                driver.handle_menu_select(action);
            }
            Command::Outside => {
                driver.handle_outside();
            }
            Command::Tick { count } => {
                driver.handle_tick(count);
            }
            Command::Diagonal => {
                driver.handle_diagonal();
            }
            Command::Scenario { index } => {
                driver.handle_scenario(index, &mut out);
            }
            Command::Load { path } => {
                driver.handle_load(&path, &mut out);
            }
            Command::Clear => {
                driver.handle_clear();
            }
            Command::Tokens => {
                driver.handle_tokens(&mut out);
            }
            Command::State => {
                driver.handle_state(&mut out);
            }
            Command::Report => {
                driver.handle_report(&mut out);
            }
            Command::Flanked { id } => {
                driver.handle_flanked(id, &mut out);
            }
            Command::Bonus { attacker, target } => {
                driver.handle_bonus(attacker, target, &mut out);
            }
            Command::Quit => {
                break;
            }
        }
        out.flush().unwrap();
    }
}
