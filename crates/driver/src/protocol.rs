//! Messages into and out of the driver task.

use serde::{Serialize, Serializer};

use crate::core::{BingoError, GameEvent, RoundHandle};

/// Command delivered to the driver task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverCommand {
    StartRound { seed: i64 },
    Mark { col: u8, row: u8 },
    SetAutoMark { enabled: bool },
    Claim,
    /// Cancel `round`, or the current round when `None`
    Cancel { round: Option<RoundHandle> },
    PlayAgain,
    Shutdown,
}

impl DriverCommand {
    pub fn name(&self) -> &'static str {
        match self {
            DriverCommand::StartRound { .. } => "start_round",
            DriverCommand::Mark { .. } => "mark",
            DriverCommand::SetAutoMark { .. } => "set_auto_mark",
            DriverCommand::Claim => "claim",
            DriverCommand::Cancel { .. } => "cancel",
            DriverCommand::PlayAgain => "play_again",
            DriverCommand::Shutdown => "shutdown",
        }
    }
}

/// Output streamed from the driver task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DriverOutput {
    Event { event: GameEvent },
    Rejected {
        command: DriverCommand,
        #[serde(serialize_with = "error_message")]
        error: BingoError,
    },
    Stopped,
}

impl DriverOutput {
    pub fn event(&self) -> Option<&GameEvent> {
        match self {
            DriverOutput::Event { event } => Some(event),
            _ => None,
        }
    }
}

fn error_message<S: Serializer>(error: &BingoError, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(error)
}

/// One line of the event log
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub seq: u64,
    /// Milliseconds since the driver started
    pub ts: u64,
    pub event: GameEvent,
}
