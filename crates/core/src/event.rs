//! Events from the controller toward presenters.
//!
//! Serialized with an internal `type` tag so the event log and headless
//! output read as one flat JSON object per line.

use serde::Serialize;

use crate::controller::RoundHandle;
use crate::marks::MarkState;
use crate::patterns::PatternKind;
use crate::types::{BingoLetter, CellPos, CARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    RoundStarted {
        round: RoundHandle,
        seed: i64,
    },
    CountdownTick {
        seconds_left: u32,
    },
    RoundActive {
        round: RoundHandle,
    },
    NumberCalled {
        number: u8,
        letter: BingoLetter,
    },
    MarkChanged {
        col: u8,
        row: u8,
        state: MarkState,
    },
    AutoMarkChanged {
        enabled: bool,
    },
    Won {
        pattern: PatternKind,
        cells: [CellPos; CARD_SIZE],
        reward: u32,
    },
    ClaimRejected,
    CallsExhausted,
    RoundAbandoned {
        round: RoundHandle,
    },
    ElapsedTick {
        seconds: u32,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::CountdownTick { .. } => "countdown_tick",
            GameEvent::RoundActive { .. } => "round_active",
            GameEvent::NumberCalled { .. } => "number_called",
            GameEvent::MarkChanged { .. } => "mark_changed",
            GameEvent::AutoMarkChanged { .. } => "auto_mark_changed",
            GameEvent::Won { .. } => "won",
            GameEvent::ClaimRejected => "claim_rejected",
            GameEvent::CallsExhausted => "calls_exhausted",
            GameEvent::RoundAbandoned { .. } => "round_abandoned",
            GameEvent::ElapsedTick { .. } => "elapsed_tick",
        }
    }

    /// True for events after which the round accepts no more play
    pub fn ends_round(&self) -> bool {
        matches!(self, GameEvent::Won { .. } | GameEvent::RoundAbandoned { .. })
    }
}
