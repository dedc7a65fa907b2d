//! Terminal output for framebuffers.
//!
//! A frame is encoded into an in-memory byte buffer and written with a single
//! flush. The previous frame is kept so that later frames only repaint the runs
//! of cells that changed. A resize (or [`TerminalRenderer::invalidate`]) makes
//! the next frame a full repaint.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// Last frame written, `None` when the screen contents are unknown
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(self.bytes, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.write_out()
    }

    /// Leave the alternate screen. Raw mode is switched off even when the
    /// restore sequence cannot be written.
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            EnableLineWrap,
            Show,
            LeaveAlternateScreen
        )?;
        let written = self.write_out();
        terminal::disable_raw_mode()?;
        written
    }

    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Write `fb` to the terminal.
    ///
    /// On return `fb` holds the frame shown before this one, so one pair of
    /// buffers is recycled for the whole session.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();

        let (w, h) = (fb.width(), fb.height());
        let mut recycled = match self.shown.take() {
            Some(old) if old.width() == w && old.height() == h => {
                encode_diff_into(&old, fb, &mut self.bytes)?;
                old
            }
            _ => {
                encode_full_into(fb, &mut self.bytes)?;
                FrameBuffer::new(w, h)
            }
        };
        self.write_out()?;

        std::mem::swap(&mut recycled, fb);
        self.shown = Some(recycled);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes cells while remembering the active style, so a style change is only
/// emitted when the next cell differs from the last one written.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn paint(&mut self, x: u16, y: u16, cells: &[Cell]) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                set_style(self.out, cell.style)?;
                self.style = Some(cell.style);
            }
            queue!(self.out, Print(cell.ch))?;
        }
        Ok(())
    }

    /// Reset attributes if anything was painted.
    fn finish(self) -> io::Result<()> {
        if self.style.is_some() {
            queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(to_color(style.fg)),
        SetBackgroundColor(to_color(style.bg))
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    // `chunks` rejects a zero width; such a frame has no rows to yield anyway.
    fb.cells().chunks(fb.width().max(1) as usize)
}

/// Clear the screen and paint every cell of `fb` into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let mut painter = Painter::new(out);
    for (y, row) in rows(fb).enumerate() {
        painter.paint(0, y as u16, row)?;
    }
    painter.finish()?;
    Ok(())
}

/// Paint into `out` only the cells of `next` that differ from `prev`.
///
/// Frames of different sizes are repainted row by row in full.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    let resized = prev.width() != next.width() || prev.height() != next.height();

    for (y, row) in rows(next).enumerate() {
        if resized {
            painter.paint(0, y as u16, row)?;
            continue;
        }
        let old = &prev.cells()[y * row.len()..(y + 1) * row.len()];
        for span in changed_spans(old, row) {
            painter.paint(span.start as u16, y as u16, &row[span])?;
        }
    }

    painter.finish()?;
    Ok(())
}

/// Maximal ranges of indices where `old` and `new` disagree
fn changed_spans<'a>(old: &'a [Cell], new: &'a [Cell]) -> impl Iterator<Item = Range<usize>> + 'a {
    let mut x = 0;
    std::iter::from_fn(move || {
        let differs = |i: usize| old[i] != new[i];
        while x < new.len() && !differs(x) {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && differs(x) {
            x += 1;
        }
        Some(start..x)
    })
}
