//! Renderer — the in-memory cell canvas.
//!
//! Implements the drawing primitives on a fixed-size grid of `Cell`s and
//! computes cell-level diffs between two frames. It knows nothing about
//! terminals or time; the player decides how and when changes reach the
//! screen.

use crate::types::{Cell, CellChange, Rect, Style, TerminalContract};

#[derive(Debug, Clone)]
pub struct Canvas {
    contract: TerminalContract,
    grid: Vec<Vec<Cell>>,
}

impl Canvas {
    pub fn new(contract: TerminalContract) -> Self {
        let w = contract.width as usize;
        let h = contract.height as usize;
        Canvas {
            contract,
            grid: vec![vec![Cell::default(); w]; h],
        }
    }

    pub fn contract(&self) -> TerminalContract {
        self.contract
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<&Cell> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize))
    }

    /// Reset every cell to a blank default.
    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::default());
        }
    }

    /// Fill `rect` with blanks in `style` (the style's background shows).
    pub fn fill(&mut self, rect: Rect, style: &Style) {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.put(x, y, ' ', style);
            }
        }
    }

    /// Draw a single-line box-drawing border along the edge of `rect`.
    pub fn outline(&mut self, rect: Rect, style: &Style) {
        let Rect { x, y, width: w, height: h } = rect;
        if w == 0 || h == 0 {
            return;
        }

        // Top edge
        self.put(x, y, '┌', style);
        for i in 1..w.saturating_sub(1) {
            self.put(x + i, y, '─', style);
        }
        if w > 1 {
            self.put(x + w - 1, y, '┐', style);
        }

        // Side edges
        for j in 1..h.saturating_sub(1) {
            self.put(x, y + j, '│', style);
            if w > 1 {
                self.put(x + w - 1, y + j, '│', style);
            }
        }

        // Bottom edge
        if h > 1 {
            self.put(x, y + h - 1, '└', style);
            for i in 1..w.saturating_sub(1) {
                self.put(x + i, y + h - 1, '─', style);
            }
            if w > 1 {
                self.put(x + w - 1, y + h - 1, '┘', style);
            }
        }
    }

    /// Write `text` left to right from `(x, y)`, one char per cell.
    ///
    /// Text is not wrapped: anything past the right edge is dropped, and a
    /// newline ends the write.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: &Style) {
        for (i, ch) in text.chars().take_while(|&c| c != '\n').enumerate() {
            let Some(cx) = x.checked_add(i as u16) else { break };
            if cx >= self.contract.width {
                break;
            }
            self.put(cx, y, ch, style);
        }
    }

    /// Contents of row `y` as a string, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        self.grid
            .get(y as usize)
            .map(|row| row.iter().map(|c| c.ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    /// Compute a cell-level diff between two grids of the same size.
    pub fn diff(prev: &[Vec<Cell>], next: &[Vec<Cell>]) -> Vec<CellChange> {
        let mut changes = Vec::new();
        for (y, (prev_row, next_row)) in prev.iter().zip(next.iter()).enumerate() {
            for (x, (prev_cell, next_cell)) in prev_row.iter().zip(next_row.iter()).enumerate() {
                if prev_cell != next_cell {
                    changes.push(CellChange {
                        x: x as u16,
                        y: y as u16,
                        cell: next_cell.clone(),
                    });
                }
            }
        }
        changes
    }

    fn put(&mut self, x: u16, y: u16, ch: char, style: &Style) {
        if let Some(cell) = self
            .grid
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = Cell {
                ch,
                style: style.clone(),
            };
        }
    }
}
