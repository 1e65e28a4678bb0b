//! Player — the terminal runtime.
//!
//! Owns the terminal for the duration of playback and drives the engine at a
//! fixed frame rate until the quit key is pressed. When the script runs out
//! the screen stays blank; the loop keeps running only to notice the quit.

mod menubar;
mod terminal;

use std::io;
use std::thread;
use std::time::Instant;

use anyhow::{bail, Result};
use crossterm::{cursor, execute, terminal as term};

use crate::audio::{self, ToneSink};
use crate::config::PlayerConfig;
use crate::engine::{Playback, Tick};
use crate::script::Script;
use crate::types::{Surface, TerminalContract};

pub use terminal::{to_content_style, to_ct_color, TerminalSurface};

pub struct Player {
    playback: Playback,
    tones: Box<dyn ToneSink>,
    config: PlayerConfig,
    contract: TerminalContract,
}

impl Player {
    pub fn new(script: Script, config: PlayerConfig) -> Self {
        Self::with_tones(script, config, audio::default_sink())
    }

    pub fn with_tones(script: Script, config: PlayerConfig, tones: Box<dyn ToneSink>) -> Self {
        Player {
            playback: Playback::new(script, config.pacing()),
            tones,
            config,
            contract: TerminalContract::default(),
        }
    }

    /// Play the script in the terminal.
    ///
    /// Sets up the terminal, enters the frame loop, and restores the terminal
    /// on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let (term_w, term_h) = term::size()?;
        if term_w < self.contract.width || term_h < self.contract.height {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                self.contract.width,
                self.contract.height,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        term::enable_raw_mode()?;
        execute!(
            stdout,
            term::EnterAlternateScreen,
            cursor::Hide,
            term::Clear(term::ClearType::All),
        )?;

        let mut surface = TerminalSurface::new(
            stdout,
            self.contract,
            self.config.key_bindings.clone(),
        );
        let result = self.run_loop(&mut surface);

        // Always restore terminal state.
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, term::LeaveAlternateScreen);
        let _ = term::disable_raw_mode();

        result
    }

    /// Run frames until the surface asks to close.
    pub fn run_loop(&mut self, surface: &mut dyn Surface) -> Result<()> {
        let budget = self.config.frame_budget();
        log::info!(
            "playing {} lines at {} fps",
            self.playback.script().len(),
            self.config.target_fps
        );

        let mut announced_end = false;
        while !surface.should_close() {
            let started = Instant::now();
            let tick = self.playback.frame(surface, self.tones.as_mut())?;

            if tick == Tick::Finished && !announced_end {
                log::info!("end of script reached");
                announced_end = true;
            }

            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        Ok(())
    }
}
