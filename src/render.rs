use crate::arena::{Vec2, WORLD_H, WORLD_W};
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const FRAME_W: usize = 48;
pub const FRAME_H: usize = 30;
pub const CELL_W: usize = 2;

const EMPTY: char = '\0';

/// One frame tile, `CELL_W` terminal columns wide. A wide glyph fills the
/// first slot and leaves the second empty.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub text: [char; 2],
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const fn blank(bg: Color) -> Self {
        Self {
            text: [' ', ' '],
            fg: Color::Reset,
            bg,
        }
    }

    fn glyph(&self) -> String {
        self.text.iter().filter(|c| **c != EMPTY).collect()
    }
}

pub struct Frame {
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::blank(Color::Reset); FRAME_W * FRAME_H],
        }
    }

    pub fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell::blank(bg));
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < FRAME_W && row < FRAME_H {
            self.cells.get(row * FRAME_W + col)
        } else {
            None
        }
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> Option<&mut Cell> {
        if col < FRAME_W && row < FRAME_H {
            self.cells.get_mut(row * FRAME_W + col)
        } else {
            None
        }
    }

    /// Puts a sprite (one wide glyph or up to two narrow ones) on a tile.
    pub fn put(&mut self, col: usize, row: usize, glyph: &str, fg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            let mut chars = glyph.chars();
            let first = chars.next().unwrap_or(' ');
            let second = if first.width().unwrap_or(1) >= CELL_W {
                EMPTY
            } else {
                chars.next().unwrap_or(' ')
            };
            cell.text = [first, second];
            cell.fg = fg;
        }
    }

    pub fn paint(&mut self, col: usize, row: usize, bg: Color) {
        if let Some(cell) = self.cell_mut(col, row) {
            cell.bg = bg;
        }
    }

    /// Writes `text` starting at terminal column `x` (not tile) on `row`.
    pub fn text(&mut self, x: usize, row: usize, text: &str, fg: Color) {
        let mut col = x / CELL_W;
        let mut half = x % CELL_W;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0);
            if w == 0 {
                continue;
            }
            if w >= CELL_W && half == 1 {
                col += 1;
                half = 0;
            }
            let Some(cell) = self.cell_mut(col, row) else {
                return;
            };
            cell.fg = fg;
            if w >= CELL_W {
                cell.text = [ch, EMPTY];
                col += 1;
            } else {
                if cell.text[1] == EMPTY {
                    cell.text = [' ', ' '];
                }
                cell.text[half] = ch;
                half += 1;
                if half == CELL_W {
                    half = 0;
                    col += 1;
                }
            }
        }
    }

    pub fn text_center(&mut self, row: usize, text: &str, fg: Color) {
        let w = UnicodeWidthStr::width(text);
        let x = (FRAME_W * CELL_W).saturating_sub(w) / 2;
        self.text(x, row, text, fg);
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Tile under a world-space point.
pub fn world_to_tile(p: Vec2) -> (usize, usize) {
    let col = (p.x / (WORLD_W / FRAME_W as f32)).max(0.0) as usize;
    let row = (p.y / (WORLD_H / FRAME_H as f32)).max(0.0) as usize;
    (col.min(FRAME_W - 1), row.min(FRAME_H - 1))
}

/// Draws frames to the terminal, rewriting only tiles that changed.
pub struct Renderer {
    last: Vec<Cell>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: vec![Cell::blank(Color::Reset); FRAME_W * FRAME_H],
            needs_full: true,
            origin_x: 0,
            origin_y: 0,
        }
    }

    /// World position under a terminal cell, if it falls on the frame.
    pub fn to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        let x = column.checked_sub(self.origin_x)? as usize;
        let y = row.checked_sub(self.origin_y)? as usize;
        if x >= FRAME_W * CELL_W || y >= FRAME_H {
            return None;
        }
        let px_per_col = WORLD_W / (FRAME_W * CELL_W) as f32;
        let px_per_row = WORLD_H / FRAME_H as f32;
        Some(Vec2::new(
            (x as f32 + 0.5) * px_per_col,
            (y as f32 + 0.5) * px_per_row,
        ))
    }

    pub fn render(&mut self, out: &mut impl Write, frame: &Frame) -> io::Result<()> {
        let needed_w = (FRAME_W * CELL_W) as u16;
        let needed_h = FRAME_H as u16;

        let (term_w, term_h) = terminal::size()?;
        if term_w < needed_w || term_h < needed_h {
            out.queue(ResetColor)?;
            out.queue(Clear(ClearType::All))?;
            out.queue(MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                needed_w, needed_h, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            return Ok(());
        }

        let origin_x = (term_w - needed_w) / 2;
        let origin_y = (term_h - needed_h) / 2;
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(ResetColor)?;
            out.queue(Clear(ClearType::All))?;
        }

        for (idx, cell) in frame.cells.iter().enumerate() {
            if self.needs_full || *cell != self.last[idx] {
                self.last[idx] = *cell;
                self.draw_cell(out, idx % FRAME_W, idx / FRAME_W, cell)?;
            }
        }
        self.needs_full = false;

        out.queue(ResetColor)?;
        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, col: usize, row: usize, cell: &Cell) -> io::Result<()> {
        let text = cell.glyph();
        let x_pos = self.origin_x + (col * CELL_W) as u16;
        let y_pos = self.origin_y + row as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetBackgroundColor(cell.bg))?;
        out.queue(SetForegroundColor(cell.fg))?;
        out.queue(Print(&text))?;
        let w = UnicodeWidthStr::width(text.as_str());
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
