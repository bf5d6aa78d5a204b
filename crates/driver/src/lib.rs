//! Driver - runs the bingo engine on a tokio task
//!
//! The engine itself has no clock. This crate hosts one
//! [`GameController`](tui_bingo_core::GameController) on a single task, feeds it
//! wall-clock time from a `tokio::time::interval`, applies commands that arrive
//! over a channel and streams every [`GameEvent`](tui_bingo_core::GameEvent)
//! back out.
//!
//! # Message Types
//!
//! ## Host → Driver ([`DriverCommand`])
//!
//! - **start_round**: generate the card for a seed and begin the countdown
//! - **mark**: toggle a cell
//! - **set_auto_mark**: mark called numbers automatically
//! - **claim**: claim bingo
//! - **cancel**: abandon a round (the current one when no handle is given)
//! - **play_again**: new round on the last seed
//! - **shutdown**: stop the task
//!
//! ## Driver → Host ([`DriverOutput`])
//!
//! - **event**: one engine event
//! - **rejected**: a command failed; the engine state is unchanged
//! - **stopped**: the task is exiting
//!
//! # Environment Variables
//!
//! - `BINGO_TICK_MS`: driver clock resolution (default: 16)
//! - `BINGO_EVENT_LOG`: append every event as a JSON line to this file
//!
//! Engine timing reads its own `BINGO_*` variables, see
//! [`EngineConfig::from_env`](tui_bingo_core::EngineConfig::from_env).
//!
//! # Event Log Format
//!
//! ```text
//! {"seq":1,"ts":0,"event":{"type":"round_started","round":1,"seed":42}}
//! {"seq":2,"ts":1000,"event":{"type":"countdown_tick","seconds_left":29}}
//! ```

pub mod host;
pub mod protocol;
pub mod runtime;

pub use tui_bingo_core as core;
pub use tui_bingo_types as types;

pub use host::{is_final, run_driver, DriverConfig};
pub use protocol::{DriverCommand, DriverOutput, LogRecord};
pub use runtime::Driver;
