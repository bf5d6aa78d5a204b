//! Mark tracking - which cells the player has daubed.
//!
//! Marks live in a 25-bit mask (bit = `CellPos::index()`). The FREE space is
//! always a member. A cell can only be toggled while its number is in the
//! round's [`CalledSequence`].

use serde::Serialize;

use crate::called::CalledSequence;
use crate::card::Card;
use crate::error::{BingoError, Result};
use crate::types::{CellPos, CellValue, CARD_CELLS, FREE_POS, MARKABLE_CELLS};

/// Set of marked cells on one card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkedSet {
    bits: u32,
}

impl MarkedSet {
    const FREE_BIT: u32 = 1 << (FREE_POS.col as u32 * 5 + FREE_POS.row as u32);

    /// A fresh set holding only the FREE space
    pub fn new() -> Self {
        Self {
            bits: Self::FREE_BIT,
        }
    }

    pub fn from_bits(bits: u32) -> Self {
        Self {
            bits: (bits & ((1 << CARD_CELLS) - 1)) | Self::FREE_BIT,
        }
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn contains(&self, pos: CellPos) -> bool {
        self.bits & (1 << pos.index()) != 0
    }

    /// Returns true if the cell was newly marked
    pub fn insert(&mut self, pos: CellPos) -> bool {
        let was = self.contains(pos);
        self.bits |= 1 << pos.index();
        !was
    }

    /// Returns true if the cell was marked. The FREE space cannot be removed.
    pub fn remove(&mut self, pos: CellPos) -> bool {
        if pos.is_free() {
            return false;
        }
        let was = self.contains(pos);
        self.bits &= !(1 << pos.index());
        was
    }

    /// True if every cell in `cells` is marked
    pub fn covers(&self, cells: &[CellPos]) -> bool {
        cells.iter().all(|&p| self.contains(p))
    }

    /// Marked cells including FREE
    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Marked cells excluding FREE
    pub fn daubed(&self) -> u32 {
        self.len() - 1
    }

    /// Share of the 24 markable cells that are marked, rounded
    pub fn completion_percent(&self) -> u32 {
        (self.daubed() * 100 + MARKABLE_CELLS / 2) / MARKABLE_CELLS
    }

    pub fn iter(&self) -> impl Iterator<Item = CellPos> + '_ {
        (0..CARD_CELLS)
            .filter(move |&i| self.bits & (1 << i) != 0)
            .filter_map(CellPos::from_index)
    }
}

impl Default for MarkedSet {
    fn default() -> Self {
        Self::new()
    }
}

/// State of a cell after a mark operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkState {
    Marked,
    Unmarked,
}

impl MarkState {
    pub fn is_marked(&self) -> bool {
        matches!(self, MarkState::Marked)
    }
}

/// Result of a successful mark/unmark, for UI feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOutcome {
    pub pos: CellPos,
    pub value: CellValue,
    pub state: MarkState,
}

/// Marked set bound to the call-gating rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkTracker {
    marked: MarkedSet,
}

impl MarkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marked(&self) -> &MarkedSet {
        &self.marked
    }

    pub fn reset(&mut self) {
        self.marked = MarkedSet::new();
    }

    /// Toggle a cell.
    ///
    /// Fails with `NotCalled` if the cell's number has not been called; the
    /// FREE space always reports `Marked` and never toggles.
    pub fn toggle(
        &mut self,
        card: &Card,
        called: &CalledSequence,
        col: u8,
        row: u8,
    ) -> Result<MarkOutcome> {
        let pos = CellPos::new(col, row).ok_or(BingoError::OutOfBounds { col, row })?;
        let value = card.get(pos);

        let number = match value {
            CellValue::Free => {
                return Ok(MarkOutcome {
                    pos,
                    value,
                    state: MarkState::Marked,
                })
            }
            CellValue::Number(n) => n,
        };

        if !called.contains(number) {
            return Err(BingoError::NotCalled {
                col,
                row,
                value: number,
            });
        }

        let state = if self.marked.contains(pos) {
            self.marked.remove(pos);
            MarkState::Unmarked
        } else {
            self.marked.insert(pos);
            MarkState::Marked
        };

        Ok(MarkOutcome { pos, value, state })
    }

    /// Mark the cell holding `number`, if any, without toggling.
    ///
    /// Returns the cell only when it changed from unmarked to marked.
    pub fn auto_mark(&mut self, card: &Card, called: &CalledSequence, number: u8) -> Option<CellPos> {
        if !called.contains(number) {
            return None;
        }
        let pos = card.position_of(number)?;
        self.marked.insert(pos).then_some(pos)
    }
}
