//! Win patterns - the 12 fixed lines of a bingo card
//!
//! Rows 0..4, columns 0..4, the main diagonal and the anti-diagonal, in that
//! order. Detection scans them in table order and reports the first pattern
//! whose five cells are all marked.

use serde::Serialize;

use crate::marks::MarkedSet;
use crate::types::{CellPos, CARD_SIZE};

/// Which line a pattern is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum PatternKind {
    Row(u8),
    Column(u8),
    Diagonal,
    AntiDiagonal,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::Row(r) => write!(f, "row {}", r + 1),
            PatternKind::Column(c) => write!(f, "column {}", c + 1),
            PatternKind::Diagonal => f.write_str("diagonal"),
            PatternKind::AntiDiagonal => f.write_str("anti-diagonal"),
        }
    }
}

/// A winning line: five coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinPattern {
    pub kind: PatternKind,
    pub cells: [CellPos; CARD_SIZE],
}

impl WinPattern {
    const fn row(r: u8) -> Self {
        Self {
            kind: PatternKind::Row(r),
            cells: [
                CellPos::at(0, r),
                CellPos::at(1, r),
                CellPos::at(2, r),
                CellPos::at(3, r),
                CellPos::at(4, r),
            ],
        }
    }

    const fn column(c: u8) -> Self {
        Self {
            kind: PatternKind::Column(c),
            cells: [
                CellPos::at(c, 0),
                CellPos::at(c, 1),
                CellPos::at(c, 2),
                CellPos::at(c, 3),
                CellPos::at(c, 4),
            ],
        }
    }

    /// True if every cell of this pattern is marked
    pub fn is_covered(&self, marked: &MarkedSet) -> bool {
        marked.covers(&self.cells)
    }

    /// Cells of this pattern not yet marked
    pub fn missing(&self, marked: &MarkedSet) -> u8 {
        self.cells.iter().filter(|&&p| !marked.contains(p)).count() as u8
    }
}

/// All 12 win patterns in detection order
pub static WIN_PATTERNS: [WinPattern; 12] = [
    WinPattern::row(0),
    WinPattern::row(1),
    WinPattern::row(2),
    WinPattern::row(3),
    WinPattern::row(4),
    WinPattern::column(0),
    WinPattern::column(1),
    WinPattern::column(2),
    WinPattern::column(3),
    WinPattern::column(4),
    WinPattern {
        kind: PatternKind::Diagonal,
        cells: [
            CellPos::at(0, 0),
            CellPos::at(1, 1),
            CellPos::at(2, 2),
            CellPos::at(3, 3),
            CellPos::at(4, 4),
        ],
    },
    WinPattern {
        kind: PatternKind::AntiDiagonal,
        cells: [
            CellPos::at(0, 4),
            CellPos::at(1, 3),
            CellPos::at(2, 2),
            CellPos::at(3, 1),
            CellPos::at(4, 0),
        ],
    },
];

/// First fully marked pattern, if any
pub fn check_win(marked: &MarkedSet) -> Option<&'static WinPattern> {
    WIN_PATTERNS.iter().find(|p| p.is_covered(marked))
}

pub fn is_win(marked: &MarkedSet) -> bool {
    check_win(marked).is_some()
}

/// Fewest unmarked cells standing between the player and any pattern
pub fn cells_to_win(marked: &MarkedSet) -> u8 {
    WIN_PATTERNS
        .iter()
        .map(|p| p.missing(marked))
        .min()
        .unwrap_or(CARD_SIZE as u8)
}
