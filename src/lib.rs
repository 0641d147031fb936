//! Flanktool core library.
//!
//! Exposes the grid model, flanking analysis, interaction state machine, and
//! protocol modules for use by integration tests and the binary entry point.

pub mod driver;
pub mod flanking;
pub mod grid;
pub mod interact;
pub mod protocol;
pub mod scenario;
pub mod session;
