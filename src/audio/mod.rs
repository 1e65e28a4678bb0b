//! Audio — per-character blips.
//!
//! The engine only knows `ToneSink::play_tone`. Without the `audio` feature
//! blips are logged and dropped; with it they are synthesized once per tone
//! and played through kira.

#[cfg(feature = "audio")]
mod kira_tones;

use std::time::Duration;

#[cfg(feature = "audio")]
pub use kira_tones::KiraTones;

/// Length of one blip.
pub const BLIP_LENGTH: Duration = Duration::from_millis(40);
pub const BLIP_SAMPLE_RATE: u32 = 22_050;

/// Fire-and-forget tone output. Implementations must not block.
pub trait ToneSink {
    fn play_tone(&mut self, hz: f32);
}

/// Sink used when no audio device is compiled in or available.
#[derive(Debug, Default)]
pub struct SilentTones;

impl ToneSink for SilentTones {
    fn play_tone(&mut self, hz: f32) {
        log::trace!("blip at {hz} Hz (silent)");
    }
}

/// The best sink this build can offer.
pub fn default_sink() -> Box<dyn ToneSink> {
    #[cfg(feature = "audio")]
    {
        Box::new(KiraTones::new())
    }
    #[cfg(not(feature = "audio"))]
    {
        Box::new(SilentTones)
    }
}

/// Render a short square-wave blip at `hz` as a mono 16-bit PCM WAV file.
///
/// The amplitude decays linearly to zero so consecutive blips do not click.
pub fn blip_wav(hz: f32, length: Duration, sample_rate: u32) -> Vec<u8> {
    let samples = (length.as_secs_f64() * sample_rate as f64).round() as u32;
    let data_len = samples * 2;

    let mut wav = Vec::with_capacity(44 + data_len as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let peak = i16::MAX as f32 * 0.25;
    for n in 0..samples {
        let t = n as f32 / sample_rate as f32;
        let envelope = 1.0 - n as f32 / samples as f32;
        let square = if (t * hz).fract() < 0.5 { 1.0 } else { -1.0 };
        let sample = (square * envelope * peak) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_matches_payload() {
        let wav = blip_wav(440.0, Duration::from_millis(10), 8_000);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // 80 samples * 2 bytes
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 160);
        assert_eq!(wav.len(), 44 + 160);
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 36 + 160);
    }

    #[test]
    fn blip_fades_out() {
        let wav = blip_wav(440.0, Duration::from_millis(10), 8_000);
        let first = i16::from_le_bytes([wav[44], wav[45]]).abs();
        let last = i16::from_le_bytes([wav[wav.len() - 2], wav[wav.len() - 1]]).abs();
        assert!(first > last);
    }

    #[test]
    fn silent_sink_accepts_tones() {
        let mut sink = SilentTones;
        sink.play_tone(440.0);
    }
}
