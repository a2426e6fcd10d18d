//! Entity simulation module
//!
//! All gameplay logic lives here:
//! - One `Game` per session owns every live entity
//! - Frame-driven, single-threaded, seeded RNG only
//! - No rendering, audio or platform dependencies; presentation reacts to
//!   drained `GameEvent`s

pub mod entity;
pub mod explosion;
pub mod game;
pub mod geometry;
pub mod hazard;
pub mod noise;
pub mod player;
pub mod projectile;
pub mod spawner;
pub mod state;

pub use entity::{Body, Entity, EntityKind, FrameContext, Signal, collides};
pub use game::Game;
pub use geometry::BoundingBox;
pub use spawner::{hazard_volume, spawn_hazards};
pub use state::{Arena, EntityId, FrameInput, GameEvent, GamePhase, SoundCue};
