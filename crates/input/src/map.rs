//! Key mapping from terminal events to bingo actions.

use crate::types::PlayerAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Cursor movement on the card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Left,
    Right,
    Up,
    Down,
}

impl CursorMove {
    /// Apply to a `(col, row)` cursor, clamped to a `size`x`size` card
    pub fn apply(self, (col, row): (u8, u8), size: u8) -> (u8, u8) {
        let last = size.saturating_sub(1);
        match self {
            CursorMove::Left => (col.saturating_sub(1), row),
            CursorMove::Right => (col.saturating_add(1).min(last), row),
            CursorMove::Up => (col, row.saturating_sub(1)),
            CursorMove::Down => (col, row.saturating_add(1).min(last)),
        }
    }
}

/// What a key does on the card screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Cursor(CursorMove),
    /// Toggle the mark under the cursor
    Mark,
    Player(PlayerAction),
}

/// What a key does on the seed picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKey {
    Digit(u8),
    Backspace,
    Confirm,
    /// Top up the wallet
    Deposit,
}

/// Map keyboard input on the card screen.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(UiAction::Cursor(CursorMove::Left)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(UiAction::Cursor(CursorMove::Right)),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(UiAction::Cursor(CursorMove::Up)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(UiAction::Cursor(CursorMove::Down)),

        // Marking
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('m') | KeyCode::Char('M') => Some(UiAction::Mark),

        // Round actions
        KeyCode::Char('a') | KeyCode::Char('A') => Some(UiAction::Player(PlayerAction::ToggleAutoMark)),
        KeyCode::Char('b') | KeyCode::Char('B') => Some(UiAction::Player(PlayerAction::Claim)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(UiAction::Player(PlayerAction::PlayAgain)),
        KeyCode::Esc => Some(UiAction::Player(PlayerAction::Leave)),

        _ => None,
    }
}

/// Map keyboard input on the seed picker.
pub fn handle_seed_key(key: KeyEvent) -> Option<SeedKey> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => Some(SeedKey::Digit(c as u8 - b'0')),
        KeyCode::Backspace | KeyCode::Delete => Some(SeedKey::Backspace),
        KeyCode::Enter => Some(SeedKey::Confirm),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(SeedKey::Deposit),
        _ => None,
    }
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
