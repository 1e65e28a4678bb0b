//! Engine — the dialogue playback state machine.
//!
//! Turns a `Script` into frames, one `Playback::frame` call at a time. Each
//! frame decides how much of the current line is visible, whether a blip
//! plays, and whether the script moves on. The engine never deals with
//! terminals or audio devices; it talks to a `Surface` and a `ToneSink`.
//!
//! Pacing is done by sleeping on the caller's thread: after each typed
//! character, and before an autoplay line with a pause advances.

pub mod blink;
pub mod boxes;
pub mod layout;

use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::audio::ToneSink;
use crate::script::Script;
use crate::types::Surface;

use blink::{Blinker, DEFAULT_BLINK_PERIOD};
use boxes::BoxLayout;

pub const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(75);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Sleep after each typed character.
    pub char_delay: Duration,
    pub blink_period: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            char_delay: DEFAULT_CHAR_DELAY,
            blink_period: DEFAULT_BLINK_PERIOD,
        }
    }
}

/// Where playback is inside the script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub line_index: usize,
    /// Index (in chars) of the most recently typed character.
    pub char_index: usize,
    /// Newlines typed so far on this line; drives textbox scrolling.
    pub lines_drawn: usize,
    pub text_revealed: bool,
}

impl PlaybackCursor {
    fn next_line(&mut self) {
        *self = PlaybackCursor {
            line_index: self.line_index + 1,
            ..PlaybackCursor::default()
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Typing the current line out.
    Revealing,
    /// Whole line shown, waiting for input or autoplay.
    Revealed,
    /// Past the last line.
    Finished,
}

/// What a single frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Typed { ch: char, blip: bool },
    Holding,
    Advanced,
    Finished,
}

pub struct Playback {
    script: Script,
    cursor: PlaybackCursor,
    blinker: Blinker,
    pacing: Pacing,
}

impl Playback {
    pub fn new(script: Script, pacing: Pacing) -> Self {
        Playback {
            script,
            cursor: PlaybackCursor::default(),
            blinker: Blinker::spawn(pacing.blink_period),
            pacing,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    pub fn cursor(&self) -> PlaybackCursor {
        self.cursor
    }

    pub fn blinker(&self) -> &Blinker {
        &self.blinker
    }

    pub fn state(&self) -> PlaybackState {
        match self.script.line(self.cursor.line_index) {
            None => PlaybackState::Finished,
            Some(line) if line.is_idle() || self.cursor.text_revealed => PlaybackState::Revealed,
            Some(_) => PlaybackState::Revealing,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state() == PlaybackState::Finished
    }

    /// Draw and present one frame, then apply its pacing and transitions.
    pub fn frame(&mut self, surface: &mut dyn Surface, tones: &mut dyn ToneSink) -> Result<Tick> {
        surface.begin_frame()?;
        surface.clear();

        match self.state() {
            PlaybackState::Revealing => self.reveal(surface, tones),
            PlaybackState::Revealed => self.hold(surface),
            PlaybackState::Finished => {
                surface.end_frame()?;
                Ok(Tick::Finished)
            }
        }
    }

    fn reveal(&mut self, surface: &mut dyn Surface, tones: &mut dyn ToneSink) -> Result<Tick> {
        let Playback { script, cursor, pacing, .. } = self;
        let line = &script.lines()[cursor.line_index];
        let character = script.character(&line.speaker)?;

        let layout = BoxLayout::for_line(surface, line);
        boxes::draw_boxes(surface, &layout, character);
        let revealed = layout::revealed_prefix(&line.text, cursor.char_index);
        boxes::draw_text_window(
            surface,
            &layout,
            &layout::cut_text(revealed, cursor.lines_drawn),
        );
        surface.end_frame()?;

        let Some(ch) = revealed.chars().last() else {
            cursor.text_revealed = true;
            return Ok(Tick::Holding);
        };

        if ch == '\n' {
            cursor.lines_drawn += 1;
        }

        let blip = layout::is_blip_char(ch);
        if blip {
            log::trace!("blip {:?} at {} Hz", ch, character.tone);
            tones.play_tone(character.tone);
        }

        if !pacing.char_delay.is_zero() {
            thread::sleep(pacing.char_delay);
        }

        let last = line.text.chars().count() - 1;
        if cursor.char_index >= last {
            cursor.text_revealed = true;
        } else if surface.is_advance_pressed() && !line.autoplay {
            log::debug!("line {} skipped at char {}", cursor.line_index + 1, cursor.char_index);
            // Jump the scroll window to the end of the full text.
            cursor.lines_drawn = line.text.matches('\n').count();
            cursor.text_revealed = true;
        } else {
            cursor.char_index += 1;
        }

        Ok(Tick::Typed { ch, blip })
    }

    fn hold(&mut self, surface: &mut dyn Surface) -> Result<Tick> {
        let line = &self.script.lines()[self.cursor.line_index];
        let character = self.script.character(&line.speaker)?;

        let layout = BoxLayout::for_line(surface, line);
        boxes::draw_boxes(surface, &layout, character);

        if !line.is_idle() {
            boxes::draw_text_window(
                surface,
                &layout,
                &layout::cut_text(&line.text, self.cursor.lines_drawn),
            );
            if !line.autoplay {
                self.blinker.start();
            }
        }
        if self.blinker.is_visible() {
            boxes::draw_blinker(surface, &layout);
        }
        surface.end_frame()?;

        if line.autoplay && !line.pause.is_zero() {
            thread::sleep(line.pause);
        }

        if surface.is_advance_pressed() || line.autoplay {
            self.blinker.stop();
            self.cursor.next_line();
            log::debug!(
                "advanced to line {} of {}",
                self.cursor.line_index + 1,
                self.script.len()
            );
            return Ok(Tick::Advanced);
        }

        Ok(Tick::Holding)
    }
}
