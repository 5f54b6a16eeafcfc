use anyhow::{Result, anyhow};
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound, set_sound_volume, stop_sound};

use snake_arcade::game::{AudioSink, Cue};

const SAMPLE_RATE: u32 = 44_100;
/// Tail of each tone faded out to avoid a click
const FADE_SECONDS: f32 = 0.02;

/// Notes of the menu loop as (frequency, seconds)
const MENU_MELODY: &[(f32, f32)] = &[
    (261.63, 0.3),
    (329.63, 0.3),
    (392.0, 0.3),
    (329.63, 0.3),
    (293.66, 0.3),
    (349.23, 0.3),
    (440.0, 0.3),
    (349.23, 0.3),
];
/// Menu loop level relative to the effect volume
const MUSIC_LEVEL: f32 = 0.3;

/// 16-bit mono PCM WAV of consecutive sine notes, each faded out at its end
fn melody_wav(notes: &[(f32, f32)]) -> Vec<u8> {
    let note_samples: Vec<u32> = notes
        .iter()
        .map(|(_, seconds)| (seconds * SAMPLE_RATE as f32) as u32)
        .collect();
    let data_size: u32 = note_samples.iter().sum::<u32>() * 2;
    let mut wav = Vec::with_capacity(44 + data_size as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVEfmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());

    let fade_samples = (FADE_SECONDS * SAMPLE_RATE as f32).max(1.0);
    for (&(frequency_hz, _), &samples) in notes.iter().zip(&note_samples) {
        for n in 0..samples {
            let t = n as f32 / SAMPLE_RATE as f32;
            let envelope = ((samples - n) as f32 / fade_samples).min(1.0);
            let value = (std::f32::consts::TAU * frequency_hz * t).sin() * envelope * 0.7;
            wav.extend_from_slice(&((value * i16::MAX as f32) as i16).to_le_bytes());
        }
    }
    wav
}

fn sine_tone_wav(frequency_hz: f32, duration_seconds: f32) -> Vec<u8> {
    melody_wav(&[(frequency_hz, duration_seconds)])
}

async fn load_tone(name: &str, frequency_hz: f32, duration_seconds: f32) -> Result<Sound> {
    load_sound_from_bytes(&sine_tone_wav(frequency_hz, duration_seconds))
        .await
        .map_err(|err| anyhow!("Failed to load {name} tone: {err:?}"))
}

/// The three game cues and the menu loop as generated tones, played at the
/// settings volume
pub struct Tones {
    eat: Sound,
    fail: Sound,
    countdown: Sound,
    music: Sound,
    music_playing: bool,
    volume: f32,
}

impl Tones {
    pub async fn load(volume: f32) -> Result<Self> {
        Ok(Self {
            eat: load_tone("eat", 880.0, 0.08).await?,
            fail: load_tone("fail", 110.0, 0.35).await?,
            countdown: load_tone("countdown", 440.0, 0.15).await?,
            music: load_sound_from_bytes(&melody_wav(MENU_MELODY))
                .await
                .map_err(|err| anyhow!("Failed to load menu music: {err:?}"))?,
            music_playing: false,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if self.music_playing {
            set_sound_volume(&self.music, MUSIC_LEVEL * self.volume);
        }
    }

    /// Loop the menu music; no-op while it is already playing
    pub fn start_music(&mut self) {
        if self.music_playing {
            return;
        }
        play_sound(
            &self.music,
            PlaySoundParams {
                looped: true,
                volume: MUSIC_LEVEL * self.volume,
            },
        );
        self.music_playing = true;
    }

    pub fn stop_music(&mut self) {
        if self.music_playing {
            stop_sound(&self.music);
            self.music_playing = false;
        }
    }
}

impl AudioSink for Tones {
    fn play(&mut self, cue: Cue) {
        let sound = match cue {
            Cue::Eat => &self.eat,
            Cue::Fail => &self.fail,
            Cue::Countdown => &self.countdown,
        };
        play_sound(
            sound,
            PlaySoundParams {
                looped: false,
                volume: self.volume,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header_and_length() {
        let wav = sine_tone_wav(440.0, 0.1);
        let samples = (0.1 * SAMPLE_RATE as f32) as usize;

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..16], b"WAVEfmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(wav.len(), 44 + samples * 2);
    }

    #[test]
    fn test_menu_melody_is_seamless() {
        let wav = melody_wav(MENU_MELODY);
        let samples = MENU_MELODY.len() * (0.3 * SAMPLE_RATE as f32) as usize;
        assert_eq!(wav.len(), 44 + samples * 2);

        // Loop point: silent first sample, faded last sample.
        let first = i16::from_le_bytes([wav[44], wav[45]]);
        let last = i16::from_le_bytes([wav[wav.len() - 2], wav[wav.len() - 1]]);
        assert_eq!(first, 0);
        assert!(last.unsigned_abs() < i16::MAX as u16 / 100);
    }
}
