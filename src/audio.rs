//! Procedural sound cues
//!
//! Every cue is a single square-wave beep with an exponential fade. This
//! module only decides *what* to play; a frontend turns [`Tone`]s into
//! samples.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameEvent, SoundCue};

/// Gain at the start of every beep
pub const START_GAIN: f32 = 0.1;
/// Gain the fade ends on
pub const END_GAIN: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Square,
}

/// One oscillator beep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_s: f32,
    pub waveform: Waveform,
}

impl Tone {
    const fn square(frequency_hz: f32, duration_s: f32) -> Self {
        Self {
            frequency_hz,
            duration_s,
            waveform: Waveform::Square,
        }
    }

    /// Gain `t` seconds into the beep, fading exponentially from
    /// [`START_GAIN`] to [`END_GAIN`]; silent once finished
    pub fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration_s {
            return 0.0;
        }
        START_GAIN * (END_GAIN / START_GAIN).powf(t / self.duration_s)
    }
}

/// The beep for a cue
pub fn tone_for(cue: SoundCue) -> Tone {
    match cue {
        SoundCue::Shoot => Tone::square(200.0, 0.1),
        SoundCue::Explosion => Tone::square(100.0, 0.2),
        SoundCue::EnemyHit => Tone::square(300.0, 0.1),
        SoundCue::TowerPlace => Tone::square(400.0, 0.1),
        SoundCue::GameOver => Tone::square(150.0, 0.3),
        SoundCue::Upgrade => Tone::square(500.0, 0.1),
        SoundCue::Error => Tone::square(100.0, 0.2),
        SoundCue::WaveStart => Tone::square(600.0, 0.2),
        SoundCue::Nuke => Tone::square(80.0, 0.5),
    }
}

/// A tone ready for playback at a given volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playback {
    pub cue: SoundCue,
    pub tone: Tone,
    pub volume: f32,
}

/// Filters and scales cues according to the player's audio settings
#[derive(Debug, Clone)]
pub struct AudioMixer {
    master_volume: f32,
    muted: bool,
}

impl Default for AudioMixer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioMixer {
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut mixer = Self::new();
        mixer.apply_settings(settings);
        mixer
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_muted(!settings.sound_enabled);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Resolve a cue, or `None` when it would be inaudible
    pub fn play(&self, cue: SoundCue) -> Option<Playback> {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return None;
        }
        Some(Playback {
            cue,
            tone: tone_for(cue),
            volume,
        })
    }

    /// Everything audible in a batch of drained events, in order
    pub fn collect(&self, events: &[GameEvent]) -> Vec<Playback> {
        events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Sound(cue) => self.play(*cue),
                _ => None,
            })
            .collect()
    }
}
