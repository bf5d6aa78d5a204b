//! Render-ready copy of the current round.

use crate::called::CalledSequence;
use crate::card::Card;
use crate::controller::{RoundHandle, WinInfo};
use crate::ledger::LedgerStats;
use crate::marks::MarkedSet;
use crate::patterns::cells_to_win;
use crate::types::{CellPos, RoundPhase};

/// Read-only view of the controller for presenters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundSnapshot {
    pub round: Option<RoundHandle>,
    pub phase: RoundPhase,
    pub seed: Option<i64>,
    pub card: Option<Card>,
    pub called: CalledSequence,
    pub marked: MarkedSet,
    pub countdown_left: u32,
    pub countdown_total: u32,
    pub elapsed_secs: u32,
    pub auto_mark: bool,
    pub next_call_ms: Option<u32>,
    pub win: Option<WinInfo>,
    pub calls_exhausted: bool,
    pub ledger: LedgerStats,
}

impl RoundSnapshot {
    pub fn clear(&mut self) {
        self.round = None;
        self.phase = RoundPhase::Idle;
        self.seed = None;
        self.card = None;
        self.called.clear();
        self.marked = MarkedSet::new();
        self.countdown_left = 0;
        self.countdown_total = 0;
        self.elapsed_secs = 0;
        self.auto_mark = false;
        self.next_call_ms = None;
        self.win = None;
        self.calls_exhausted = false;
        self.ledger = LedgerStats::default();
    }

    /// Marks and claims are accepted
    pub fn playable(&self) -> bool {
        self.phase == RoundPhase::Active
    }

    pub fn last_called(&self) -> Option<u8> {
        self.called.last()
    }

    pub fn is_marked(&self, pos: CellPos) -> bool {
        self.marked.contains(pos)
    }

    pub fn is_called(&self, number: u8) -> bool {
        self.called.contains(number)
    }

    pub fn cells_to_win(&self) -> u8 {
        cells_to_win(&self.marked)
    }

    /// Elapsed clock as `MM:SS`
    pub fn elapsed_display(&self) -> String {
        format!("{:02}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}
