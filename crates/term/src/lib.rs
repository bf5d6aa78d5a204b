//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for the bingo screens. It renders
//! into a plain framebuffer that is flushed to the terminal backend, with no
//! widget or layout library in between.
//!
//! - [`CardView`] draws a running round from a `RoundSnapshot`
//! - [`PickerView`] draws the room picker and wallet summary
//! - [`TerminalRenderer`] diffs consecutive frames and writes only the changes

pub mod card_view;
pub mod fb;
pub mod picker_view;
pub mod renderer;

pub use tui_bingo_core as core;
pub use tui_bingo_types as types;

pub use card_view::{AnchorY, CardOverlay, CardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use picker_view::{LeaderboardEntry, PickerView, PlayerExtras, SeedInput};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
