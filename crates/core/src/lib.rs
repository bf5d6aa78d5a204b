//! Core bingo engine - pure, deterministic where it matters, and testable
//!
//! This crate contains the game rules, round state and the clock-driven
//! calling logic. It has **zero dependencies** on UI, networking, or I/O,
//! making it:
//!
//! - **Deterministic**: Same seed produces the identical card (for "play again")
//! - **Testable**: Time only moves through [`GameController::advance`]
//! - **Portable**: Can run in any host (terminal loop, tokio task, benchmark)
//!
//! # Module Structure
//!
//! - [`rng`]: LCG stream behind card generation
//! - [`card`]: 5x5 card from a seed
//! - [`called`]: ordered, duplicate-free record of called balls
//! - [`scheduler`]: unseeded call order and cadence
//! - [`timer`]: generation-checked one-shot timers
//! - [`marks`]: marked cells and the "must be called" rule
//! - [`patterns`]: the 12 win lines and detection
//! - [`reward`]: replaceable payout policy
//! - [`ledger`]: in-memory wallet and win statistics
//! - [`controller`]: the round lifecycle and the public contract
//! - [`snapshot`] / [`event`]: what presenters consume
//!
//! # Game Rules
//!
//! - **Card**: column B holds 1-15, I 16-30, N 31-45, G 46-60, O 61-75; the
//!   centre is FREE and always marked
//! - **Calls**: after a 30 s countdown the 75 balls are called in random order,
//!   the first after 2 s, then every 3-5 s
//! - **Marks**: only called numbers can be marked; marking again unmarks
//! - **Win**: any full row, column or diagonal; detected on every mark
//!
//! # Example
//!
//! ```
//! use tui_bingo_core::{EngineConfig, GameController, GameEvent};
//! use tui_bingo_core::types::RoundPhase;
//!
//! let mut game = GameController::new(EngineConfig::default());
//! game.set_auto_mark(true);
//! let round = game.start_round(42).unwrap();
//!
//! // Countdown, then every ball; auto-mark always finishes the card.
//! game.advance(30_000 + 2_000 + 75 * 5_000);
//! assert_eq!(game.phase(), RoundPhase::Won);
//!
//! let events: Vec<GameEvent> = game.drain_events().collect();
//! assert!(events.contains(&GameEvent::RoundActive { round }));
//! ```
//!
//! # Timing
//!
//! Hosts call [`GameController::advance`] with elapsed milliseconds, usually
//! every 16 ms tick. Countdown, calls and the elapsed clock are timers in one
//! [`timer::Timers`] set, fired in due order however large the step.

pub mod called;
pub mod card;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod ledger;
pub mod marks;
pub mod patterns;
pub mod reward;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod timer;

pub use tui_bingo_types as types;

// Re-export commonly used types for convenience
pub use called::CalledSequence;
pub use card::{generate_card, Card};
pub use config::EngineConfig;
pub use controller::{GameController, GameRound, RoundHandle, WinInfo};
pub use error::{BingoError, Result};
pub use event::GameEvent;
pub use ledger::{Credits, Ledger, LedgerStats, Transaction, TransactionKind};
pub use marks::{MarkOutcome, MarkState, MarkTracker, MarkedSet};
pub use patterns::{check_win, is_win, PatternKind, WinPattern, WIN_PATTERNS};
pub use reward::{FixedReward, RewardPolicy, UniformReward};
pub use rng::SeededRng;
pub use scheduler::{CallScheduler, Emission, SchedulerState};
pub use snapshot::RoundSnapshot;
pub use timer::{TimerHandle, TimerKind, Timers};
