#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;

use ascii_dialogue::audio::ToneSink;
use ascii_dialogue::engine::Pacing;
use ascii_dialogue::engine::boxes::BoxLayout;
use ascii_dialogue::renderer::Canvas;
use ascii_dialogue::script::{NamePosition, Script, TextPosition, parse_characters, parse_dialogue};
use ascii_dialogue::types::{Rect, Style, Surface, TerminalContract};

pub const CHARACTERS: &str = r#"[
    {"name": "Mike", "tone": 440.0},
    {"name": "Anna", "tone": 660.0, "color": "magenta"}
]"#;

pub fn script(dialogue: &str) -> Script {
    Script::new(
        parse_characters(CHARACTERS, "characters").unwrap(),
        parse_dialogue(dialogue, "dialogue").unwrap(),
    )
    .unwrap()
}

/// No typing delay, and a blink period long enough that the phase never flips
/// during a test.
pub fn instant() -> Pacing {
    Pacing {
        char_delay: Duration::ZERO,
        blink_period: Duration::from_secs(3600),
    }
}

/// In-memory surface that snapshots every presented frame.
pub struct RecordingSurface {
    canvas: Canvas,
    presses: HashSet<usize>,
    close_after: Option<usize>,
    frame: usize,
    pressed: bool,
    presented: Vec<Canvas>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface {
            canvas: Canvas::new(TerminalContract::default()),
            presses: HashSet::new(),
            close_after: None,
            frame: 0,
            pressed: false,
            presented: Vec::new(),
        }
    }

    /// Press the advance key during the given (0-based) frames.
    pub fn press_on(mut self, frames: &[usize]) -> Self {
        self.presses.extend(frames.iter().copied());
        self
    }

    pub fn close_after(mut self, frames: usize) -> Self {
        self.close_after = Some(frames);
        self
    }

    pub fn presented(&self) -> &[Canvas] {
        &self.presented
    }

    pub fn last(&self) -> &Canvas {
        self.presented.last().expect("no frame presented")
    }
}

impl Surface for RecordingSurface {
    fn contract(&self) -> TerminalContract {
        self.canvas.contract()
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.pressed = self.presses.contains(&self.frame);
        self.frame += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.presented.push(self.canvas.clone());
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_after.is_some_and(|n| self.frame >= n)
    }

    fn is_advance_pressed(&self) -> bool {
        self.pressed
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
        text.chars().count() as u16
    }
}

/// Tone sink that remembers every tone it was asked to play.
#[derive(Clone, Default)]
pub struct RecordingTones {
    pub played: Rc<RefCell<Vec<f32>>>,
}

impl RecordingTones {
    pub fn count(&self) -> usize {
        self.played.borrow().len()
    }
}

impl ToneSink for RecordingTones {
    fn play_tone(&mut self, hz: f32) {
        self.played.borrow_mut().push(hz);
    }
}

/// Text rows inside the textbox of a frame laid out with `text_pos`.
pub fn textbox_lines(canvas: &Canvas, text_pos: TextPosition) -> Vec<String> {
    let layout = BoxLayout::compute(canvas.contract(), text_pos, NamePosition::Hidden, 0);
    let tb = layout.textbox;
    (tb.y + 1..tb.bottom() - 1)
        .map(|y| {
            (tb.x + 2..tb.right() - 1)
                .filter_map(|x| canvas.cell(x, y).map(|c| c.ch))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Visible textbox text, joined the way `cut_text` joins it.
pub fn visible_text(canvas: &Canvas) -> String {
    let mut lines = textbox_lines(canvas, TextPosition::Bottom);
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

pub fn is_blank(canvas: &Canvas) -> bool {
    (0..canvas.contract().height).all(|y| canvas.row_text(y).is_empty())
}
