//! Text protocol for driving a session over stdin/stdout.
//!
//! One command per line in, one-line or JSON responses out. Pointer gestures
//! (place, drag, click) are synthesized from grid coordinates by the driver.

pub mod parser;

pub use parser::{parse_command, Command};
