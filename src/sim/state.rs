//! Session phases, frame input and the events the simulation reports
//!
//! The simulation never talks to audio or the status display directly; it
//! records `GameEvent`s that the front end drains after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Entity handle, unique within a session
pub type EntityId = u32;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first fire trigger
    Ready,
    /// Active gameplay
    Playing,
    /// Every hazard destroyed; the field keeps running
    Cleared,
    /// Player destroyed; frames no longer advance
    GameOver,
}

/// Named audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Ambient,
    GameOver,
    PlayerFire,
    HazardFire,
    Hit,
    Explode,
    Achievement,
    Alert,
    Shield,
}

/// Something the front end should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Play a cue, optionally scaled
    Sound { cue: SoundCue, volume: Option<f32> },
    StopAllSounds,
    /// Ambient loop on/off
    Ambient(bool),
    /// Score, health or pause state changed
    StatusChanged,
    Started,
    LevelCleared,
    GameOver,
}

impl GameEvent {
    pub fn sound(cue: SoundCue) -> Self {
        GameEvent::Sound { cue, volume: None }
    }

    pub fn sound_at(cue: SoundCue, volume: f32) -> Self {
        GameEvent::Sound {
            cue,
            volume: Some(volume),
        }
    }
}

/// Input sampled for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Pointer position the ship steers toward
    pub target: Option<Vec2>,
    /// Start the session, or fire once started
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
}

/// The visible play area, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}
