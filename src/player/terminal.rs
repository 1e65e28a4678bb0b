//! `Surface` backed by a real terminal.
//!
//! Draw calls land on an in-memory `Canvas`; `end_frame` writes only the
//! cells that changed since the previous frame.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::{cursor, queue, style};

use crate::config::KeyBindings;
use crate::renderer::Canvas;
use crate::types::{Cell, Color, NamedColor, Rect, Style, Surface, TerminalContract};

use super::menubar::hint_spans;

/// Hint bar shown on the last row of the contract.
const HINTS: &[&str] = &["[Enter][Space] next", "[q][Esc] quit"];

pub struct TerminalSurface {
    out: io::Stdout,
    bindings: KeyBindings,
    canvas: Canvas,
    /// What is currently on screen; `None` forces a full redraw.
    shown: Option<Vec<Vec<Cell>>>,
    advance_pressed: bool,
    close_requested: bool,
}

impl TerminalSurface {
    pub fn new(out: io::Stdout, contract: TerminalContract, bindings: KeyBindings) -> Self {
        TerminalSurface {
            out,
            bindings,
            canvas: Canvas::new(contract),
            shown: None,
            advance_pressed: false,
            close_requested: false,
        }
    }

    /// Drain pending terminal events without blocking.
    fn poll_input(&mut self) -> Result<()> {
        self.advance_pressed = false;
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.bindings.is_quit(&key) {
                        log::debug!("quit requested");
                        self.close_requested = true;
                    } else if self.bindings.is_advance(&key) {
                        self.advance_pressed = true;
                    }
                }
                Event::Resize(_, _) => self.shown = None,
                _ => {}
            }
        }
        Ok(())
    }

    fn draw_hints(&mut self) {
        let y = self.canvas.contract().height.saturating_sub(1);
        let mut x = 1;
        for (i, item) in HINTS.iter().enumerate() {
            if i > 0 {
                x += 2;
            }
            for (text, style) in hint_spans(item) {
                self.canvas.text(x, y, &text, &style);
                x += text.chars().count() as u16;
            }
        }
    }

    fn write_cell(&mut self, x: u16, y: u16, cell: &Cell) -> Result<()> {
        let cs = to_content_style(&cell.style);
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            style::PrintStyledContent(style::StyledContent::new(cs, cell.ch)),
        )?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn contract(&self) -> TerminalContract {
        self.canvas.contract()
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.poll_input()
    }

    fn end_frame(&mut self) -> Result<()> {
        self.draw_hints();
        let next = self.canvas.cells().to_vec();

        match self.shown.take() {
            Some(prev) => {
                for change in Canvas::diff(&prev, &next) {
                    self.write_cell(change.x, change.y, &change.cell)?;
                }
            }
            None => {
                for (y, row) in next.iter().enumerate() {
                    for (x, cell) in row.iter().enumerate() {
                        self.write_cell(x as u16, y as u16, cell)?;
                    }
                }
            }
        }
        self.out.flush()?;
        self.shown = Some(next);
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn is_advance_pressed(&self) -> bool {
        self.advance_pressed
    }

    fn clear(&mut self) {
        self.canvas.clear();
    }

    fn draw_rect(&mut self, rect: Rect, style: &Style) {
        self.canvas.fill(rect, style);
    }

    fn draw_rect_outline(&mut self, rect: Rect, style: &Style) {
        self.canvas.outline(rect, style);
    }

    fn draw_text(&mut self, text: &str, x: u16, y: u16, style: &Style) {
        self.canvas.text(x, y, text, style);
    }

    fn measure_text_width(&self, text: &str) -> u16 {
        text.chars().count().min(u16::MAX as usize) as u16
    }
}

// ---------------------------------------------------------------------------
// Style conversion
// ---------------------------------------------------------------------------

pub fn to_content_style(s: &Style) -> style::ContentStyle {
    let mut cs = style::ContentStyle::default();
    if let Some(fg) = &s.fg {
        cs.foreground_color = Some(to_ct_color(fg));
    }
    if let Some(bg) = &s.bg {
        cs.background_color = Some(to_ct_color(bg));
    }
    if s.bold {
        cs.attributes.set(style::Attribute::Bold);
    }
    if s.dim {
        cs.attributes.set(style::Attribute::Dim);
    }
    cs
}

pub fn to_ct_color(c: &Color) -> style::Color {
    match c {
        Color::Named(n) => match n {
            NamedColor::Black => style::Color::Black,
            NamedColor::Red => style::Color::Red,
            NamedColor::Green => style::Color::Green,
            NamedColor::Yellow => style::Color::Yellow,
            NamedColor::Blue => style::Color::Blue,
            NamedColor::Magenta => style::Color::Magenta,
            NamedColor::Cyan => style::Color::Cyan,
            NamedColor::White => style::Color::White,
        },
        Color::Rgb { r, g, b } => style::Color::Rgb {
            r: *r,
            g: *g,
            b: *b,
        },
    }
}
