//! Minefield - a real-time arcade minefield
//!
//! Core modules:
//! - `sim`: Entity simulation (entities, collisions, lifecycle, spawner)
//! - `settings`: Level tables loaded from JSON
//! - `audio`: Sound cue routing and volume handling
//! - `ui`: Status display boundary
//! - `renderer`: Drawing boundary and shape builders

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{LevelTuning, Settings, SettingsError};
pub use sim::{Game, GameEvent, GamePhase};

/// Game configuration constants
pub mod consts {
    /// Hazard-hazard hit and explosion loudness range
    pub const MIN_VOLUME: f32 = 0.25;
    pub const MAX_VOLUME: f32 = 0.75;

    /// Player position smoothing per frame (lerp factor toward target)
    pub const PLAYER_MOVE_SPEED: f32 = 0.01;
    /// Player facing smoothing per frame
    pub const PLAYER_TURN_SPEED: f32 = PLAYER_MOVE_SPEED * 5.0;
    /// Alert oscillation step per point of damage
    pub const PLAYER_ALERT_FREQ: f32 = 0.01;

    /// Hazard noise phase advance per frame
    pub const HAZARD_NOISE_STEP: f32 = 0.01;
    /// Hazard diameter growth per point of energy
    pub const HAZARD_SIZE_PER_ENERGY: f32 = 3.0;

    /// Projectiles carry a single point of energy
    pub const PROJECTILE_ENERGY: u32 = 1;
    /// Projectile draw diameter
    pub const PROJECTILE_DIAMETER: f32 = 6.0;

    /// Explosion growth and fade per frame
    pub const EXPLOSION_GROWTH: f32 = 3.0;
    pub const EXPLOSION_FADE: f32 = 6.0;
    pub const EXPLOSION_START_ALPHA: f32 = 255.0;

    /// Parallax margin for the level background
    pub const STAGE_MARGIN: f32 = 100.0;

    /// Frames per second the simulation is tuned for
    pub const FRAME_RATE: f32 = 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Interpolate between two angles along the shortest arc
#[inline]
pub fn angle_lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + normalize_angle(end - start) * amount
}

/// Linearly re-map `value` from one range onto another (unclamped)
#[inline]
pub fn map_range(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    to_min + (value - from_min) / (from_max - from_min) * (to_max - to_min)
}
