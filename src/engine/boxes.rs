//! Textbox, name box and blinker geometry.
//!
//! All measurements are terminal cells. The textbox is centered horizontally
//! and anchored to the top or bottom of the contract; the name box sits on
//! the textbox edge facing the middle of the screen.

use crate::script::{Character, DialogueLine, NamePosition, TextPosition};
use crate::types::{Color, NamedColor, Rect, Style, Surface, TerminalContract};

use super::layout::{clip_to_width, VISIBLE_LINES};

const TEXTBOX_WIDTH: u16 = 60;
/// Border + visible lines + border.
const TEXTBOX_HEIGHT: u16 = VISIBLE_LINES as u16 + 2;
const TEXTBOX_TOP: u16 = 1;
/// Rows kept free under a bottom-anchored textbox (the hint bar lives there).
const TEXTBOX_BOTTOM_MARGIN: u16 = 1;
/// Columns between the textbox border and the first character.
const TEXT_MARGIN: u16 = 2;

const NAMEBOX_HEIGHT: u16 = 3;
const NAMEBOX_MIN_WIDTH: u16 = 12;
const NAME_PADDING: u16 = 2;

const BOX_STYLE: Style = Style::foreground(NamedColor::White);
const TEXT_STYLE: Style = Style::foreground(NamedColor::White);
const BLINKER_STYLE: Style = Style::background(NamedColor::White);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxLayout {
    pub textbox: Rect,
    pub namebox: Option<Rect>,
    pub blinker: Rect,
}

impl BoxLayout {
    /// Place the boxes for a line whose speaker name measures `name_width` cells.
    pub fn compute(
        contract: TerminalContract,
        text_pos: TextPosition,
        name_pos: NamePosition,
        name_width: u16,
    ) -> Self {
        let width = TEXTBOX_WIDTH.min(contract.width);
        let x = (contract.width - width) / 2;
        let y = match text_pos {
            TextPosition::Top => TEXTBOX_TOP,
            TextPosition::Bottom => contract
                .height
                .saturating_sub(TEXTBOX_HEIGHT + TEXTBOX_BOTTOM_MARGIN),
        };
        let textbox = Rect::new(x, y, width, TEXTBOX_HEIGHT);

        let name_w = name_width
            .saturating_add(2 * NAME_PADDING)
            .max(NAMEBOX_MIN_WIDTH)
            .min(width);
        let name_y = match text_pos {
            TextPosition::Top => textbox.bottom(),
            TextPosition::Bottom => textbox.y.saturating_sub(NAMEBOX_HEIGHT),
        };
        let namebox = match name_pos {
            NamePosition::Left => Some(Rect::new(textbox.x, name_y, name_w, NAMEBOX_HEIGHT)),
            NamePosition::Right => Some(Rect::new(
                textbox.right() - name_w,
                name_y,
                name_w,
                NAMEBOX_HEIGHT,
            )),
            NamePosition::Hidden => None,
        };

        let blinker = Rect::new(
            textbox.right().saturating_sub(3),
            textbox.bottom().saturating_sub(2),
            1,
            1,
        );

        BoxLayout { textbox, namebox, blinker }
    }

    pub fn for_line(surface: &dyn Surface, line: &DialogueLine) -> Self {
        Self::compute(
            surface.contract(),
            line.text_pos,
            line.name_pos,
            surface.measure_text_width(&line.speaker),
        )
    }

    /// Columns available to one line of dialogue. The blinker column stays free.
    pub fn text_columns(&self) -> usize {
        self.textbox.width.saturating_sub(2 * TEXT_MARGIN + 1) as usize
    }
}

/// Draw the textbox and, unless hidden, the speaker's name box.
pub fn draw_boxes(surface: &mut dyn Surface, layout: &BoxLayout, character: &Character) {
    surface.draw_rect(layout.textbox, &Style::default());
    surface.draw_rect_outline(layout.textbox, &BOX_STYLE);

    if let Some(namebox) = layout.namebox {
        let accent = name_style(character);
        surface.draw_rect(namebox, &Style::default());
        surface.draw_rect_outline(namebox, &accent);
        let clipped = clip_to_width(
            &character.name,
            namebox.width.saturating_sub(2 * NAME_PADDING) as usize,
        );
        surface.draw_text(
            clipped,
            namebox.x + NAME_PADDING,
            namebox.y + 1,
            &Style { bold: true, ..accent },
        );
    }
}

/// Draw already-windowed text (see `cut_text`) inside the textbox.
pub fn draw_text_window(surface: &mut dyn Surface, layout: &BoxLayout, text: &str) {
    let columns = layout.text_columns();
    for (row, line) in text.split('\n').take(VISIBLE_LINES).enumerate() {
        surface.draw_text(
            clip_to_width(line, columns),
            layout.textbox.x + TEXT_MARGIN,
            layout.textbox.y + 1 + row as u16,
            &TEXT_STYLE,
        );
    }
}

pub fn draw_blinker(surface: &mut dyn Surface, layout: &BoxLayout) {
    surface.draw_rect(layout.blinker, &BLINKER_STYLE);
}

fn name_style(character: &Character) -> Style {
    Style {
        fg: Some(
            character
                .color
                .clone()
                .unwrap_or(Color::Named(NamedColor::White)),
        ),
        ..Style::default()
    }
}
