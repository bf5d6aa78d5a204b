//! Room picker screen: seed entry plus wallet summary.

use std::ops::RangeInclusive;

use crate::card_view::{put_credits, put_i64, Viewport};
use crate::core::{Credits, Ledger};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{SEED_MAX, SEED_MIN};

const TITLE: CellStyle = CellStyle::new(Rgb::new(255, 200, 80), Rgb::new(0, 0, 0)).bold();
const TEXT: CellStyle = CellStyle::new(Rgb::new(210, 210, 210), Rgb::new(0, 0, 0));
const INPUT: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 70)).bold();
const ERROR: CellStyle = CellStyle::new(Rgb::new(255, 110, 110), Rgb::new(0, 0, 0));
const GAIN: CellStyle = CellStyle::new(Rgb::new(120, 220, 140), Rgb::new(0, 0, 0));
const LOSS: CellStyle = CellStyle::new(Rgb::new(230, 120, 120), Rgb::new(0, 0, 0));

/// Digits typed so far, bounded by the accepted room range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInput {
    digits: String,
    range: Option<RangeInclusive<i64>>,
}

impl Default for SeedInput {
    fn default() -> Self {
        Self::with_range(Some(SEED_MIN..=SEED_MAX))
    }
}

impl SeedInput {
    /// `None` accepts any non-negative seed that fits in an `i64`.
    pub fn with_range(range: Option<RangeInclusive<i64>>) -> Self {
        Self {
            digits: String::new(),
            range,
        }
    }

    pub fn range(&self) -> Option<&RangeInclusive<i64>> {
        self.range.as_ref()
    }

    fn max_digits(&self) -> usize {
        match &self.range {
            Some(range) => {
                let widest = range.start().unsigned_abs().max(range.end().unsigned_abs());
                widest.checked_ilog10().map_or(1, |d| d as usize + 1)
            }
            None => 18,
        }
    }

    pub fn push_digit(&mut self, digit: u8) {
        if digit < 10 && self.digits.len() < self.max_digits() {
            self.digits.push(char::from(b'0' + digit));
        }
    }

    pub fn backspace(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Parsed seed when it falls in the room range
    pub fn seed(&self) -> Option<i64> {
        self.digits
            .parse::<i64>()
            .ok()
            .filter(|s| self.range.as_ref().map_or(true, |r| r.contains(s)))
    }

    /// Shown when `seed` rejects the input
    pub fn hint(&self) -> String {
        match &self.range {
            Some(r) => format!("Pick a room between {} and {}", r.start(), r.end()),
            None => "Type a room number".to_string(),
        }
    }
}

/// One row of the top-players table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub winnings: Credits,
    pub games: u32,
}

/// Profile figures that live outside the ledger
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerExtras {
    pub hours_played: u32,
    pub favorite_number: u8,
}

pub struct PickerView<'a> {
    pub input: &'a SeedInput,
    pub message: Option<&'a str>,
    pub ledger: &'a Ledger,
    pub extras: Option<PlayerExtras>,
    pub leaderboard: &'a [LeaderboardEntry],
}

impl PickerView<'_> {
    const RECENT: usize = 4;
    const TOP: usize = 5;

    pub fn render_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = 46u16;
        let h = 24u16;
        let x = viewport.width.saturating_sub(w) / 2;
        let mut y = viewport.height.saturating_sub(h) / 2;
        let box_y = y;

        fb.draw_box(x, y, w, h, TEXT.dim());
        fb.put_str_centered(x, w, y + 1, "B I N G O", TITLE);
        y += 3;

        let cx = x + 2;
        let after = fb.put_str(cx, y, "Room number", TEXT);
        match self.input.range() {
            Some(range) => {
                let after = fb.put_str(after, y, " (", TEXT);
                let after = put_i64(fb, after, y, *range.start(), TEXT);
                let after = fb.put_str(after, y, "-", TEXT);
                let after = put_i64(fb, after, y, *range.end(), TEXT);
                fb.put_str(after, y, "):", TEXT);
            }
            None => {
                fb.put_str(after, y, ":", TEXT);
            }
        }
        y += 1;
        let field_w = (self.input.max_digits() as u16 + 2).min(w - 4);
        fb.fill_rect(cx, y, field_w, 1, ' ', INPUT);
        fb.put_str(cx + 1, y, self.input.as_str(), INPUT);
        y += 1;
        if let Some(msg) = self.message {
            fb.put_str(cx, y, msg, ERROR);
        }
        y += 2;

        let stats = self.ledger.stats();
        let after = fb.put_str(cx, y, "Balance  ", TEXT);
        put_credits(fb, after, y, stats.balance.hundredths(), TITLE);
        y += 1;
        let after = fb.put_str(cx, y, "Winnings ", TEXT);
        put_credits(fb, after, y, stats.total_winnings.hundredths(), TEXT);
        y += 1;
        let after = fb.put_str(cx, y, "Won ", TEXT);
        let after = fb.put_u32(after, y, stats.games_won, TEXT);
        let after = fb.put_str(after, y, " of ", TEXT);
        let after = fb.put_u32(after, y, stats.games_played, TEXT);
        let after = fb.put_str(after, y, "  streak ", TEXT);
        fb.put_u32(after, y, stats.streak, TEXT);
        y += 1;
        if let Some(extras) = self.extras {
            let after = fb.put_u32(cx, y, extras.hours_played, TEXT);
            let after = fb.put_str(after, y, "h played  favourite ", TEXT);
            fb.put_u32(after, y, u32::from(extras.favorite_number), TEXT);
        }
        y += 2;

        for tx in self.ledger.transactions().take(Self::RECENT) {
            let style = if tx.amount.is_negative() { LOSS } else { GAIN };
            let after = put_credits(fb, cx, y, tx.amount.hundredths(), style);
            let after = fb.put_str(after + 1, y, &tx.description, TEXT.dim());
            if let Some(date) = tx.date.as_deref() {
                fb.put_str(after + 1, y, date, TEXT.dim());
            }
            y += 1;
        }

        if !self.leaderboard.is_empty() {
            y = box_y + 17;
            fb.put_str(cx, y, "TOP PLAYERS", TITLE);
            y += 1;
            for (rank, entry) in self.leaderboard.iter().take(Self::TOP).enumerate() {
                let after = fb.put_u32(cx, y, rank as u32 + 1, TEXT);
                let after = fb.put_str(after, y, ". ", TEXT);
                fb.put_str(after, y, &entry.name, TEXT);
                let after = put_credits(fb, cx + 20, y, entry.winnings.hundredths(), GAIN);
                fb.put_u32(after + 1, y, entry.games, TEXT.dim());
                y += 1;
            }
        }

        fb.put_str_centered(
            x,
            w,
            viewport.height.saturating_sub(1),
            "enter play  d deposit  q quit",
            TEXT.dim(),
        );
    }
}
