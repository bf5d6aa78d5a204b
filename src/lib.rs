//! TUI Bingo (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_bingo::{core,driver,input,term,types}`
//! and hosts the mock wallet data used by the interactive binary.

pub mod mock;

pub use tui_bingo_core as core;
pub use tui_bingo_driver as driver;
pub use tui_bingo_input as input;
pub use tui_bingo_term as term;
pub use tui_bingo_types as types;
