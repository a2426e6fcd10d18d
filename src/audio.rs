//! Sound cue routing
//!
//! The simulation reports `SoundCue`s; the `AudioManager` applies volume
//! settings and the stop/loop rules, then forwards to an `AudioBackend`.

use crate::sim::{GameEvent, SoundCue};

impl SoundCue {
    /// Every cue, in the order sound assets are listed in settings
    pub const ALL: [SoundCue; 9] = [
        SoundCue::Ambient,
        SoundCue::GameOver,
        SoundCue::PlayerFire,
        SoundCue::HazardFire,
        SoundCue::Hit,
        SoundCue::Explode,
        SoundCue::Achievement,
        SoundCue::Alert,
        SoundCue::Shield,
    ];

    /// Position of this cue's asset in the settings sound list
    pub fn asset_index(self) -> usize {
        match self {
            SoundCue::Ambient => 0,
            SoundCue::GameOver => 1,
            SoundCue::PlayerFire => 2,
            SoundCue::HazardFire => 3,
            SoundCue::Hit => 4,
            SoundCue::Explode => 5,
            SoundCue::Achievement => 6,
            SoundCue::Alert => 7,
            SoundCue::Shield => 8,
        }
    }
}

/// Asset path for a cue, if the settings list one
pub fn asset_for(cue: SoundCue, sounds: &[String]) -> Option<&str> {
    sounds.get(cue.asset_index()).map(String::as_str)
}

/// Something that can actually make noise
pub trait AudioBackend {
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool);
    fn stop(&mut self, cue: SoundCue);
    fn stop_all(&mut self);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogAudio {
    sounds: Vec<String>,
    /// Cues played so far
    pub played: Vec<SoundCue>,
}

impl LogAudio {
    pub fn new(sounds: Vec<String>) -> Self {
        Self {
            sounds,
            played: Vec::new(),
        }
    }
}

impl AudioBackend for LogAudio {
    fn play(&mut self, cue: SoundCue, volume: f32, looping: bool) {
        log::debug!(
            "play {:?} ({}) at {:.2}{}",
            cue,
            asset_for(cue, &self.sounds).unwrap_or("-"),
            volume,
            if looping { " looping" } else { "" }
        );
        self.played.push(cue);
    }

    fn stop(&mut self, cue: SoundCue) {
        log::trace!("stop {cue:?}");
    }

    fn stop_all(&mut self) {
        log::trace!("stop all");
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            self.backend.stop_all();
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a cue, scaled by `volume` if given
    pub fn play(&mut self, cue: SoundCue, volume: Option<f32>) {
        let vol = self.effective_volume() * volume.unwrap_or(1.0).clamp(0.0, 1.0);
        if vol <= 0.0 {
            return;
        }

        match cue {
            SoundCue::Achievement => {
                self.backend.stop_all();
                self.backend.play(cue, vol, false);
            }
            SoundCue::GameOver => {
                self.backend.stop_all();
                self.backend.play(cue, vol, false);
                self.backend.play(SoundCue::Explode, vol, false);
            }
            SoundCue::Hit => {
                self.backend.stop(SoundCue::PlayerFire);
                self.backend.play(cue, vol, false);
            }
            SoundCue::Alert | SoundCue::Ambient => self.backend.play(cue, vol, true),
            _ => self.backend.play(cue, vol, false),
        }
    }

    /// React to one simulation event; non-audio events are ignored
    pub fn handle(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Sound { cue, volume } => self.play(cue, volume),
            GameEvent::StopAllSounds => self.backend.stop_all(),
            GameEvent::Ambient(true) => self.play(SoundCue::Ambient, None),
            GameEvent::Ambient(false) => self.backend.stop(SoundCue::Ambient),
            GameEvent::StatusChanged
            | GameEvent::Started
            | GameEvent::LevelCleared
            | GameEvent::GameOver => {}
        }
    }
}
