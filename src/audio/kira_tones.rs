use std::collections::HashMap;
use std::io::Cursor;

use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::StaticSoundData,
};

use super::{blip_wav, ToneSink, BLIP_LENGTH, BLIP_SAMPLE_RATE};

/// Blips played through the default audio device.
pub struct KiraTones {
    /// `None` when no audio device is available (headless / CI).
    manager: Option<AudioManager>,
    /// Synthesized blips keyed by the bit pattern of their frequency.
    blips: HashMap<u32, StaticSoundData>,
}

impl KiraTones {
    pub fn new() -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                log::warn!("failed to initialize audio manager: {e}. Blips disabled.");
                None
            }
        };
        Self {
            manager,
            blips: HashMap::new(),
        }
    }

    fn blip(&mut self, hz: f32) -> Option<StaticSoundData> {
        let key = hz.to_bits();
        if let Some(data) = self.blips.get(&key) {
            return Some(data.clone());
        }
        let wav = blip_wav(hz, BLIP_LENGTH, BLIP_SAMPLE_RATE);
        match StaticSoundData::from_cursor(Cursor::new(wav)) {
            Ok(data) => {
                self.blips.insert(key, data.clone());
                Some(data)
            }
            Err(e) => {
                log::warn!("failed to decode {hz} Hz blip: {e}");
                None
            }
        }
    }
}

impl Default for KiraTones {
    fn default() -> Self {
        Self::new()
    }
}

impl ToneSink for KiraTones {
    fn play_tone(&mut self, hz: f32) {
        if self.manager.is_none() {
            return;
        }
        let Some(data) = self.blip(hz) else { return };
        if let Some(manager) = self.manager.as_mut() {
            if let Err(e) = manager.play(data) {
                log::warn!("failed to play blip: {e}");
            }
        }
    }
}
