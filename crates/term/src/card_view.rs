//! CardView: maps a [`RoundSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::RoundSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BingoLetter, CellPos, CellValue, RoundPhase, CARD_SIZE, MAX_BALL};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Presentation-only state the engine does not know about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardOverlay<'a> {
    pub cursor: CellPos,
    /// Last toast line ("B-13 called!", errors)
    pub message: Option<&'a str>,
}

impl Default for CardOverlay<'_> {
    fn default() -> Self {
        Self {
            cursor: CellPos::at(0, 0),
            message: None,
        }
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const CARD_BG: Rgb = Rgb::new(28, 28, 44);
const LABEL: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
const VALUE: CellStyle = CellStyle::new(Rgb::new(200, 200, 200), BG);
const BORDER: CellStyle = CellStyle::new(Rgb::new(170, 170, 200), BG);
const HEADER: CellStyle = CellStyle::new(Rgb::new(255, 200, 80), BG).bold();
const EMPTY: CellStyle = CellStyle::new(Rgb::new(210, 210, 220), CARD_BG);
const CALLED: CellStyle = CellStyle::new(Rgb::new(255, 220, 90), CARD_BG).bold();
const MARKED: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 140, 80)).bold();
const WIN_LINE: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(255, 200, 80)).bold();
const CURSOR: CellStyle = CellStyle::new(Rgb::new(120, 200, 255), CARD_BG).bold();

/// A lightweight terminal view of one bingo round.
pub struct CardView {
    /// Card cell width in terminal columns.
    cell_w: u16,
    /// Card cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for CardView {
    fn default() -> Self {
        // 6x2 leaves room for "[ 75 ]" and a spacer row.
        Self {
            cell_w: 6,
            cell_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl CardView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(4),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    fn frame_size(&self) -> (u16, u16) {
        let n = CARD_SIZE as u16;
        // Header row of letters inside the frame.
        (n * self.cell_w + 2, n * self.cell_h + 3)
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &RoundSnapshot,
        overlay: &CardOverlay<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let panel_w = 24;
        let total_w = frame_w + 2 + panel_w;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        // Called board and help line below the card.
        let total_h = frame_h + CARD_SIZE as u16 + 3;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', EMPTY);
        fb.draw_box(start_x, start_y, frame_w, frame_h, BORDER);

        for letter in BingoLetter::ALL {
            let x = start_x + 1 + letter.column() as u16 * self.cell_w;
            let mut buf = [0u8; 4];
            let s = letter.as_char().encode_utf8(&mut buf);
            fb.put_str_centered(x, self.cell_w, start_y + 1, s, HEADER.with_bg(CARD_BG));
        }

        if let Some(card) = snap.card.as_ref() {
            let win_cells = snap.win.map(|w| w.cells);
            for (pos, value) in card.iter() {
                let on_win_line = win_cells.is_some_and(|cells| cells.contains(&pos));
                let style = if on_win_line {
                    WIN_LINE
                } else if snap.is_marked(pos) {
                    MARKED
                } else if value.number().is_some_and(|n| snap.is_called(n)) {
                    CALLED
                } else {
                    EMPTY
                };
                let cursor = snap.playable() && pos == overlay.cursor;
                self.draw_card_cell(fb, start_x, start_y, pos, value, style, cursor);
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);
        self.draw_called_board(fb, snap, viewport, start_x, start_y + frame_h + 1);

        let help_y = start_y + frame_h + CARD_SIZE as u16 + 2;
        match overlay.message {
            Some(msg) => {
                fb.put_str(start_x, help_y, msg, VALUE.bold());
            }
            None => {
                fb.put_str(start_x, help_y, help_text(snap.phase), VALUE.dim());
            }
        }

        match snap.phase {
            RoundPhase::CountingDown => {
                let mut text = [0u8; 32];
                let line = countdown_text(snap.countdown_left, &mut text);
                self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, line);
            }
            RoundPhase::Won => self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "B I N G O !"),
            RoundPhase::Abandoned => self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "ROUND LEFT"),
            RoundPhase::Idle | RoundPhase::Active => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &RoundSnapshot, overlay: &CardOverlay<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    /// Screen origin of a card cell
    pub fn cell_origin(&self, viewport: Viewport, pos: CellPos) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        let total_w = frame_w + 2 + 24;
        let total_h = frame_h + CARD_SIZE as u16 + 3;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        (
            start_x + 1 + pos.col as u16 * self.cell_w,
            start_y + 2 + pos.row as u16 * self.cell_h,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_card_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        pos: CellPos,
        value: CellValue,
        style: CellStyle,
        cursor: bool,
    ) {
        let px = start_x + 1 + pos.col as u16 * self.cell_w;
        let py = start_y + 2 + pos.row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);

        match value {
            CellValue::Free => fb.put_str_centered(px, self.cell_w, py, "FREE", style),
            CellValue::Number(n) => {
                let w = if n >= 10 { 2 } else { 1 };
                let x = px + (self.cell_w - w) / 2;
                fb.put_u32(x, py, u32::from(n), style);
            }
        }

        if cursor {
            let cur = CURSOR.with_bg(style.bg);
            fb.put_char(px, py, '[', cur);
            fb.put_char(px + self.cell_w - 1, py, ']', cur);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport, panel_x: u16, start_y: u16) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;

        fb.put_str(panel_x, y, "ROOM", LABEL);
        if let Some(seed) = snap.seed {
            let x = fb.put_str(panel_x + 6, y, "#", VALUE);
            put_i64(fb, x, y, seed, VALUE);
        }
        y += 1;

        fb.put_str(panel_x, y, "STATUS", LABEL);
        fb.put_str(panel_x + 8, y, status_text(snap.phase), VALUE);
        y += 2;

        fb.put_str(panel_x, y, "BALL", LABEL);
        match snap.last_called().and_then(|n| BingoLetter::from_number(n).map(|l| (l, n))) {
            Some((letter, n)) => {
                fb.put_char(panel_x + 8, y, letter.as_char(), HEADER);
                fb.put_char(panel_x + 9, y, '-', HEADER);
                fb.put_u32(panel_x + 10, y, u32::from(n), HEADER);
            }
            None => {
                fb.put_char(panel_x + 8, y, '-', VALUE);
            }
        }
        y += 1;

        fb.put_str(panel_x, y, "TIME", LABEL);
        let (m, s) = (snap.elapsed_secs / 60, snap.elapsed_secs % 60);
        put_two_digits(fb, panel_x + 8, y, m, VALUE);
        fb.put_char(panel_x + 10, y, ':', VALUE);
        put_two_digits(fb, panel_x + 11, y, s, VALUE);
        y += 1;

        fb.put_str(panel_x, y, "CALLED", LABEL);
        let x = fb.put_u32(panel_x + 8, y, snap.called.len() as u32, VALUE);
        let x = fb.put_str(x, y, "/", VALUE);
        fb.put_u32(x, y, u32::from(MAX_BALL), VALUE);
        y += 1;

        fb.put_str(panel_x, y, "MARKED", LABEL);
        let x = fb.put_u32(panel_x + 8, y, snap.marked.daubed(), VALUE);
        let x = fb.put_str(x, y, " (", VALUE);
        let x = fb.put_u32(x, y, snap.marked.completion_percent(), VALUE);
        fb.put_str(x, y, "%)", VALUE);
        y += 1;

        fb.put_str(panel_x, y, "TO WIN", LABEL);
        fb.put_u32(panel_x + 8, y, u32::from(snap.cells_to_win()), VALUE);
        y += 1;

        fb.put_str(panel_x, y, "AUTO", LABEL);
        fb.put_str(panel_x + 8, y, if snap.auto_mark { "ON" } else { "OFF" }, VALUE);
        y += 2;

        let stats = &snap.ledger;
        fb.put_str(panel_x, y, "WALLET", LABEL);
        put_credits(fb, panel_x + 8, y, stats.balance.hundredths(), VALUE);
        y += 1;
        fb.put_str(panel_x, y, "WON", LABEL);
        let x = fb.put_u32(panel_x + 8, y, stats.games_won, VALUE);
        let x = fb.put_str(x, y, "/", VALUE);
        fb.put_u32(x, y, stats.games_played, VALUE);
        y += 1;
        fb.put_str(panel_x, y, "RATE", LABEL);
        let x = fb.put_u32(panel_x + 8, y, stats.win_rate, VALUE);
        fb.put_char(x, y, '%', VALUE);
        y += 1;
        fb.put_str(panel_x, y, "STREAK", LABEL);
        fb.put_u32(panel_x + 8, y, stats.streak, VALUE);
        y += 2;

        if let Some(win) = snap.win {
            fb.put_str(panel_x, y, "WON", HEADER);
            let x = fb.put_str(panel_x + 4, y, "+", HEADER);
            fb.put_u32(x, y, win.reward, HEADER);
        } else if snap.calls_exhausted {
            fb.put_str(panel_x, y, "ALL BALLS CALLED", VALUE.dim());
        }
    }

    fn draw_called_board(&self, fb: &mut FrameBuffer, snap: &RoundSnapshot, viewport: Viewport, x: u16, y: u16) {
        for letter in BingoLetter::ALL {
            let row = y + letter.column() as u16;
            if row >= viewport.height {
                break;
            }
            fb.put_char(x, row, letter.as_char(), HEADER);
            let mut cx = x + 2;
            for n in snap.called.by_letter(letter) {
                if cx + 3 > viewport.width {
                    break;
                }
                let style = if Some(n) == snap.last_called() { HEADER } else { VALUE };
                fb.put_u32(cx, row, u32::from(n), style);
                cx += 3;
            }
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
    ) {
        let mid_y = start_y.saturating_add(frame_h / 2);
        let w = text.chars().count() as u16 + 4;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
        fb.fill_rect(x, mid_y, w, 1, ' ', style);
        fb.put_str(x + 2, mid_y, text, style);
    }
}

fn put_two_digits(fb: &mut FrameBuffer, x: u16, y: u16, v: u32, style: CellStyle) {
    let v = v.min(99);
    fb.put_char(x, y, char::from(b'0' + (v / 10) as u8), style);
    fb.put_char(x + 1, y, char::from(b'0' + (v % 10) as u8), style);
}

pub(crate) fn put_i64(fb: &mut FrameBuffer, x: u16, y: u16, v: i64, style: CellStyle) -> u16 {
    let x = if v < 0 { fb.put_str(x, y, "-", style) } else { x };
    let abs = v.unsigned_abs();
    match u32::try_from(abs) {
        Ok(small) => fb.put_u32(x, y, small, style),
        Err(_) => fb.put_str(x, y, &abs.to_string(), style),
    }
}

/// `hundredths` as `123.45`
pub(crate) fn put_credits(fb: &mut FrameBuffer, x: u16, y: u16, hundredths: i64, style: CellStyle) -> u16 {
    let x = if hundredths < 0 { fb.put_str(x, y, "-", style) } else { x };
    let abs = hundredths.unsigned_abs();
    let x = match u32::try_from(abs / 100) {
        Ok(units) => fb.put_u32(x, y, units, style),
        Err(_) => fb.put_str(x, y, &(abs / 100).to_string(), style),
    };
    let x = fb.put_str(x, y, ".", style);
    put_two_digits(fb, x, y, (abs % 100) as u32, style);
    x + 2
}

fn status_text(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Idle => "Waiting",
        RoundPhase::CountingDown => "Starting Soon...",
        RoundPhase::Active => "Game Active",
        RoundPhase::Won => "BINGO!",
        RoundPhase::Abandoned => "Left",
    }
}

fn help_text(phase: RoundPhase) -> &'static str {
    match phase {
        RoundPhase::Won | RoundPhase::Abandoned => "p play again  esc rooms  q quit",
        _ => "arrows/hjkl move  space mark  a auto  b bingo  esc leave  q quit",
    }
}

/// "STARTING IN <n>" into a stack buffer
fn countdown_text(seconds: u32, buf: &mut [u8; 32]) -> &str {
    use std::io::Write;
    let mut cursor = std::io::Cursor::new(&mut buf[..]);
    let _ = write!(cursor, "STARTING IN {seconds}");
    let len = cursor.position() as usize;
    std::str::from_utf8(&buf[..len]).unwrap_or("STARTING")
}
