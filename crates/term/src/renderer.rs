//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! The first frame (and any frame after a resize or `invalidate`) is a full
//! redraw; later frames only rewrite runs of cells that changed.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.buf.queue(terminal::SetTitle("tui-bingo"))?;
        self.flush_buf()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw (terminal resize).
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// The caller gets the previous frame's buffer back to render the next
    /// frame into, so no frame is ever cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        let mut prev = match self.last.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.buf)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.buf)?;
                let mut prev = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                prev.resize(fb.width(), fb.height());
                prev
            }
        };
        self.flush_buf()?;

        std::mem::swap(&mut prev, fb);
        self.last = Some(prev);
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Tracks the style last emitted so runs of equal style emit it once
struct StyleState {
    current: Option<CellStyle>,
}

impl StyleState {
    fn new() -> Self {
        Self { current: None }
    }

    fn print(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, x: u16, y: u16) -> Result<()> {
        let cell = fb.get(x, y).unwrap_or_default();
        if self.current != Some(cell.style) {
            apply_style_into(out, cell.style)?;
            self.current = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out` without touching stdout.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut style = StyleState::new();
    for y in 0..fb.height() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        for x in 0..fb.width() {
            style.print(out, fb, x, y)?;
        }
    }

    finish_into(out)
}

/// Encode only the changed runs of `next` relative to `prev` into `out`.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = StyleState::new();
    for (x, y, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(x, y))?;
        for dx in 0..len {
            style.print(out, next, x + dx, y)?;
        }
    }
    finish_into(out)
}

fn finish_into(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// `(x, y, len)` runs of differing cells, row by row. A size change marks
/// every row dirty.
fn changed_runs<'a>(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> impl Iterator<Item = (u16, u16, u16)> + 'a {
    let resized = prev.width() != next.width() || prev.height() != next.height();
    let w = next.width();

    (0..next.height()).flat_map(move |y| {
        let differs = move |x: u16| resized || prev.get(x, y) != next.get(x, y);
        let mut x = 0;
        std::iter::from_fn(move || {
            while x < w && !differs(x) {
                x += 1;
            }
            if x >= w {
                return None;
            }
            let start = x;
            while x < w && differs(x) {
                x += 1;
            }
            Some((start, y, x - start))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::Cell;

    #[test]
    fn changed_runs_coalesce_adjacent_cells() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        b.set(5, 1, Cell { ch: 'O', style });

        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn identical_frames_have_no_runs() {
        let a = FrameBuffer::new(4, 4);
        assert_eq!(changed_runs(&a, &a.clone()).count(), 0);
    }

    #[test]
    fn resized_frame_is_fully_dirty() {
        let a = FrameBuffer::new(3, 1);
        let b = FrameBuffer::new(4, 2);
        let runs: Vec<_> = changed_runs(&a, &b).collect();
        assert_eq!(runs, vec![(0, 0, 4), (0, 1, 4)]);
    }

    #[test]
    fn diff_encoding_is_smaller_than_full() {
        let mut a = FrameBuffer::new(20, 5);
        a.put_str(0, 0, "BINGO", CellStyle::default());
        let mut b = a.clone();
        b.put_char(3, 2, '*', CellStyle::default().bold());

        let mut full = Vec::new();
        let mut diff = Vec::new();
        encode_full_into(&b, &mut full).unwrap();
        encode_diff_into(&a, &b, &mut diff).unwrap();
        assert!(!diff.is_empty());
        assert!(diff.len() < full.len());
    }
}
