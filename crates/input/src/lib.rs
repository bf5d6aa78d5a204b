//! Terminal input module.
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into card-screen actions ([`UiAction`]) and seed-picker keys
//! ([`SeedKey`]).

pub mod map;

pub use tui_bingo_types as types;

pub use map::{handle_key_event, handle_seed_key, should_quit, CursorMove, SeedKey, UiAction};
