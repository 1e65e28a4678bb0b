//! Shared boundary types for the dialogue presenter.
//!
//! This module defines the contract between the playback engine and whatever
//! presents it:
//! - Style primitives (`Color`, `Style`) shared by scripts and the canvas
//! - Geometry (`TerminalContract`, `Rect`) measured in terminal cells
//! - The `Surface` trait the engine draws through

use anyhow::Result;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    Named(NamedColor),
    Rgb { r: u8, g: u8, b: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg: Option<Color>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub dim: bool,
}

impl Style {
    pub const fn foreground(color: NamedColor) -> Self {
        Style { fg: Some(Color::Named(color)), bg: None, bold: false, dim: false }
    }

    pub const fn background(color: NamedColor) -> Self {
        Style { fg: None, bg: Some(Color::Named(color)), bold: false, dim: false }
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Fixed size of the drawable area, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalContract {
    pub width: u16,
    pub height: u16,
}

impl Default for TerminalContract {
    fn default() -> Self {
        TerminalContract { width: 80, height: 24 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

// ---------------------------------------------------------------------------
// Cell grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            ch: ' ',
            style: Style::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellChange {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

// ---------------------------------------------------------------------------
// Presentation surface
// ---------------------------------------------------------------------------

/// Everything the playback engine needs from a presentation backend.
///
/// Drawing calls are infallible; only frame boundaries touch real IO.
/// Input is sampled once per frame in `begin_frame`, so `is_advance_pressed`
/// is edge-triggered: a single key press is seen by exactly one frame.
pub trait Surface {
    fn contract(&self) -> TerminalContract;

    /// Poll input and start a new frame.
    fn begin_frame(&mut self) -> Result<()>;

    /// Present everything drawn since `begin_frame`.
    fn end_frame(&mut self) -> Result<()>;

    fn should_close(&self) -> bool;
    fn is_advance_pressed(&self) -> bool;

    fn clear(&mut self);
    fn draw_rect(&mut self, rect: Rect, style: &Style);
    fn draw_rect_outline(&mut self, rect: Rect, style: &Style);
    fn draw_text(&mut self, text: &str, x: u16, y: u16, style: &Style);
    fn measure_text_width(&self, text: &str) -> u16;
}
