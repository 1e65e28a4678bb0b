//! The "press to continue" blinker.
//!
//! A worker thread flips a phase flag on a fixed period for the whole life of
//! the `Blinker`, whether or not it is active. The frame loop switches the
//! blinker on and off and only draws it while `is_visible()` holds.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const DEFAULT_BLINK_PERIOD: Duration = Duration::from_millis(400);

#[derive(Debug, Default)]
struct BlinkState {
    active: AtomicBool,
    visible_phase: AtomicBool,
}

pub struct Blinker {
    state: Arc<BlinkState>,
    shutdown: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl Blinker {
    /// Spawn the phase worker. The blinker starts inactive.
    pub fn spawn(period: Duration) -> Self {
        let state = Arc::new(BlinkState::default());
        let (shutdown, rx) = mpsc::channel::<()>();

        let phase = Arc::clone(&state);
        let worker = thread::spawn(move || {
            loop {
                match rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        phase.visible_phase.fetch_xor(true, Ordering::AcqRel);
                    }
                    // Explicit shutdown or the owner went away.
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
        });

        Blinker {
            state,
            shutdown: Some(shutdown),
            worker: Some(worker),
        }
    }

    pub fn start(&self) {
        self.state.active.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.state.active.store(false, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.state.active.load(Ordering::Acquire)
    }

    /// Current phase of the worker, independent of `is_active`.
    pub fn phase(&self) -> bool {
        self.state.visible_phase.load(Ordering::Acquire)
    }

    /// True when the indicator should be drawn this frame.
    pub fn is_visible(&self) -> bool {
        self.is_active() && self.phase()
    }
}

impl Default for Blinker {
    fn default() -> Self {
        Self::spawn(DEFAULT_BLINK_PERIOD)
    }
}

impl Drop for Blinker {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
