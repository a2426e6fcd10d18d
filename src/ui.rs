//! Status display boundary
//!
//! The front end owns the actual widgets; the game only produces a `Status`
//! snapshot and the banner transitions.

use std::fmt;

use serde::Serialize;

use crate::audio::{AudioBackend, AudioManager};
use crate::sim::{Game, GameEvent, GamePhase};

/// How worried the health readout should look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthMarker {
    Healthy,
    Damaged,
    /// One point of energy left
    Critical,
}

impl HealthMarker {
    pub fn for_health(health: u32, max_health: u32) -> Self {
        if health >= max_health {
            HealthMarker::Healthy
        } else if health <= 1 {
            HealthMarker::Critical
        } else {
            HealthMarker::Damaged
        }
    }
}

/// Snapshot shown by the status bar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Status {
    pub score: u64,
    pub health: u32,
    pub max_health: u32,
    pub marker: HealthMarker,
    pub paused: bool,
    pub level: u32,
    pub hazards_left: u32,
}

impl Status {
    pub fn from_game(game: &Game) -> Self {
        let max_health = game.tuning.player_energy;
        let health = game.player().map(|p| p.energy).unwrap_or(0);
        Self {
            score: game.score(),
            health,
            max_health,
            marker: HealthMarker::for_health(health, max_health),
            // a finished session reads as stopped, not paused
            paused: game.is_paused() && game.phase() != GamePhase::GameOver,
            level: game.tuning.level,
            hazards_left: game.hazard_count(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.marker {
            HealthMarker::Healthy => "+",
            HealthMarker::Damaged => "!",
            HealthMarker::Critical => "!!",
        };
        write!(
            f,
            "L{} score {} health {}/{}{} mines {}",
            self.level, self.score, self.health, self.max_health, marker, self.hazards_left
        )?;
        if self.paused {
            write!(f, " [paused]")?;
        }
        Ok(())
    }
}

/// Where status and banners end up
pub trait StatusDisplay {
    fn refresh(&mut self, status: &Status);
    /// Show or hide the "press fire to start" banner
    fn ready(&mut self, visible: bool);
    fn level_clear(&mut self, status: &Status);
    fn game_over(&mut self, status: &Status);
}

/// Status display that writes to the log
#[derive(Debug, Default)]
pub struct LogStatus {
    /// Most recent snapshot
    pub last: Option<Status>,
    pub refreshes: usize,
}

impl StatusDisplay for LogStatus {
    fn refresh(&mut self, status: &Status) {
        log::debug!("{status}");
        self.refreshes += 1;
        self.last = Some(status.clone());
    }

    fn ready(&mut self, visible: bool) {
        if visible {
            log::info!("Press fire to start");
        }
    }

    fn level_clear(&mut self, status: &Status) {
        log::info!("Level {} clear! Score {}", status.level, status.score);
    }

    fn game_over(&mut self, status: &Status) {
        log::info!("Game over. Final score {}", status.score);
    }
}

/// Route drained events to audio and the status display
pub fn present<B: AudioBackend>(
    events: &[GameEvent],
    game: &Game,
    audio: &mut AudioManager<B>,
    display: &mut dyn StatusDisplay,
) {
    let mut refresh = false;
    for event in events {
        audio.handle(event);
        match event {
            GameEvent::StatusChanged => refresh = true,
            GameEvent::Started => {
                display.ready(false);
                refresh = true;
            }
            GameEvent::LevelCleared => display.level_clear(&Status::from_game(game)),
            GameEvent::GameOver => display.game_over(&Status::from_game(game)),
            GameEvent::Sound { .. } | GameEvent::StopAllSounds | GameEvent::Ambient(_) => {}
        }
    }
    if refresh {
        display.refresh(&Status::from_game(game));
    }
}
