//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no behavior beyond small conversions, so they
//! can be used by the engine, the terminal views and the async driver alike.
//!
//! # Card Layout
//!
//! A bingo card is 5 columns by 5 rows, indexed `[col][row]`. Each column draws
//! from a fixed range of balls:
//!
//! | Column | Letter | Range |
//! |--------|--------|-------|
//! | 0 | B | 1-15 |
//! | 1 | I | 16-30 |
//! | 2 | N | 31-45 |
//! | 3 | G | 46-60 |
//! | 4 | O | 61-75 |
//!
//! The centre cell (column 2, row 2) is the FREE space.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop timestep (~60 FPS) |
//! | `COUNTDOWN_SECS` | 30 | Seconds before calling starts |
//! | `SECOND_MS` | 1000 | Countdown and elapsed-clock period |
//! | `FIRST_CALL_DELAY_MS` | 2000 | Delay before the first ball |
//! | `CALL_DELAY_MIN_MS` | 3000 | Shortest gap between balls |
//! | `CALL_DELAY_MAX_MS` | 5000 | Upper bound (exclusive) of the gap |
//!
//! # Examples
//!
//! ```
//! use tui_bingo_types::{BingoLetter, CellPos, CellValue, FREE_POS};
//!
//! assert_eq!(BingoLetter::from_number(7), Some(BingoLetter::B));
//! assert_eq!(BingoLetter::from_number(75), Some(BingoLetter::O));
//! assert_eq!(BingoLetter::from_number(76), None);
//!
//! let pos = CellPos::new(2, 2).unwrap();
//! assert_eq!(pos, FREE_POS);
//! assert!(CellPos::new(5, 0).is_none());
//!
//! assert!(CellValue::Free.is_free());
//! assert_eq!(CellValue::Number(12).number(), Some(12));
//! ```

use serde::{Deserialize, Serialize};

/// Card width and height in cells
pub const CARD_SIZE: usize = 5;

/// Number of cells on a card
pub const CARD_CELLS: usize = CARD_SIZE * CARD_SIZE;

/// Highest ball number (balls are 1..=75)
pub const MAX_BALL: u8 = 75;

/// Balls per column range
pub const COLUMN_SPAN: u8 = 15;

/// Inclusive ball range of each column
pub const COLUMN_RANGES: [(u8, u8); CARD_SIZE] = [(1, 15), (16, 30), (31, 45), (46, 60), (61, 75)];

/// Position of the FREE space
pub const FREE_POS: CellPos = CellPos { col: 2, row: 2 };

/// Host loop timestep in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// One second, the period of the countdown and elapsed clocks
pub const SECOND_MS: u32 = 1000;

/// Countdown length before a round goes active
pub const COUNTDOWN_SECS: u32 = 30;

/// Delay between the round going active and the first call
pub const FIRST_CALL_DELAY_MS: u32 = 2000;

/// Minimum delay between calls
pub const CALL_DELAY_MIN_MS: u32 = 3000;

/// Maximum delay between calls (exclusive)
pub const CALL_DELAY_MAX_MS: u32 = 5000;

/// Smallest mock reward (inclusive)
pub const REWARD_MIN: u32 = 100;

/// Largest mock reward (inclusive)
pub const REWARD_MAX: u32 = 599;

/// Seeds offered by the room picker
pub const SEED_MIN: i64 = 1;
pub const SEED_MAX: i64 = 200;

/// Non-FREE cells, the denominator of the completion percentage
pub const MARKABLE_CELLS: u32 = (CARD_CELLS - 1) as u32;


/// Column letter of a ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BingoLetter {
    B,
    I,
    N,
    G,
    O,
}

impl BingoLetter {
    pub const ALL: [BingoLetter; CARD_SIZE] = [
        BingoLetter::B,
        BingoLetter::I,
        BingoLetter::N,
        BingoLetter::G,
        BingoLetter::O,
    ];

    /// Letter for a ball number, `None` outside 1..=75
    pub fn from_number(number: u8) -> Option<Self> {
        if number == 0 || number > MAX_BALL {
            return None;
        }
        Self::ALL.get(((number - 1) / COLUMN_SPAN) as usize).copied()
    }

    /// Card column this letter heads
    pub fn column(&self) -> usize {
        match self {
            BingoLetter::B => 0,
            BingoLetter::I => 1,
            BingoLetter::N => 2,
            BingoLetter::G => 3,
            BingoLetter::O => 4,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            BingoLetter::B => 'B',
            BingoLetter::I => 'I',
            BingoLetter::N => 'N',
            BingoLetter::G => 'G',
            BingoLetter::O => 'O',
        }
    }
}

/// A cell coordinate on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub col: u8,
    pub row: u8,
}

impl CellPos {
    /// Checked constructor, `None` if off the card
    pub fn new(col: u8, row: u8) -> Option<Self> {
        if (col as usize) < CARD_SIZE && (row as usize) < CARD_SIZE {
            Some(Self { col, row })
        } else {
            None
        }
    }

    /// Unchecked constructor for compile-time tables
    pub const fn at(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Flat index, column-major (`col * 5 + row`)
    pub fn index(&self) -> usize {
        self.col as usize * CARD_SIZE + self.row as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CARD_CELLS {
            return None;
        }
        Some(Self {
            col: (index / CARD_SIZE) as u8,
            row: (index % CARD_SIZE) as u8,
        })
    }

    pub fn is_free(&self) -> bool {
        *self == FREE_POS
    }
}

/// Content of a card cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    Number(u8),
    Free,
}

impl CellValue {
    pub fn is_free(&self) -> bool {
        matches!(self, CellValue::Free)
    }

    pub fn number(&self) -> Option<u8> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Free => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Free => f.write_str("FREE"),
        }
    }
}

/// Lifecycle phase of a round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    #[default]
    Idle,
    CountingDown,
    Active,
    Won,
    Abandoned,
}

impl RoundPhase {
    /// Won and Abandoned rounds accept no further play
    pub fn is_terminal(&self) -> bool {
        matches!(self, RoundPhase::Won | RoundPhase::Abandoned)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoundPhase::Idle => "idle",
            RoundPhase::CountingDown => "counting_down",
            RoundPhase::Active => "active",
            RoundPhase::Won => "won",
            RoundPhase::Abandoned => "abandoned",
        }
    }
}

/// Player actions that do not carry a cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    ToggleAutoMark,
    Claim,
    PlayAgain,
    Leave,
}
