//! The entity base shared by every simulated object
//!
//! Variants form a closed set; the behaviour for each lives in its own module
//! and is reached through `match` on the body. Entities never mutate the
//! session directly: they push `Signal`s which the game applies right after
//! the call returns.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::explosion::{self, ExplosionState};
use super::geometry::BoundingBox;
use super::hazard::{self, HazardState};
use super::noise::Noise;
use super::player::{self, PlayerState};
use super::projectile::{self, ProjectileState};
use super::state::{Arena, EntityId};

/// Variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Hazard,
    PlayerProjectile,
    HazardProjectile,
    Effect,
}

/// Variant-specific state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Body {
    Player(PlayerState),
    Hazard(HazardState),
    PlayerProjectile(ProjectileState),
    HazardProjectile(ProjectileState),
    Effect(ExplosionState),
}

/// Requests an entity makes of the game while updating or being hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Remove me and run my death transition
    Dead,
    /// Fire a hazard projectile from me toward the player
    FireAtPlayer,
    /// Have a random hazard fire too
    FireFromRandomHazard,
    /// Player dropped to its last point of energy
    Alert,
    /// Player shield just ran out
    ShieldDown,
}

/// Read-only environment for a frame's update pass
pub struct FrameContext<'a> {
    pub arena: Arena,
    /// Where the ship is steering
    pub target: Vec2,
    pub noise: &'a Noise,
}

/// A simulated object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    /// Added to the position each frame
    pub velocity: Vec2,
    /// Sprite or image identifier, if any
    pub asset: Option<String>,
    /// Maximum (initial) energy
    pub value: u32,
    /// Remaining energy, never above `value`
    pub energy: u32,
    /// Frames of hit immunity left
    pub shield: u32,
    pub body: Body,
}

impl Entity {
    /// Allocate an entity at the origin with full energy
    pub fn new(id: EntityId, value: u32, body: Body) -> Self {
        Self {
            id,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            asset: None,
            value,
            energy: value,
            shield: 0,
            body,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self.body {
            Body::Player(_) => EntityKind::Player,
            Body::Hazard(_) => EntityKind::Hazard,
            Body::PlayerProjectile(_) => EntityKind::PlayerProjectile,
            Body::HazardProjectile(_) => EntityKind::HazardProjectile,
            Body::Effect(_) => EntityKind::Effect,
        }
    }

    /// Apply the supplied fields, keep the rest
    pub fn setup(&mut self, asset: Option<String>, position: Option<Vec2>, velocity: Option<Vec2>) {
        if let Some(asset) = asset {
            self.asset = Some(asset);
        }
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(velocity) = velocity {
            self.velocity = velocity;
        }
        if matches!(
            self.kind(),
            EntityKind::PlayerProjectile | EntityKind::HazardProjectile
        ) {
            projectile::arm(self);
        }
    }

    /// Advance one frame
    pub fn update(&mut self, ctx: &FrameContext, out: &mut Vec<Signal>) {
        match self.kind() {
            EntityKind::Player => player::update(self, ctx, out),
            EntityKind::Hazard => hazard::update(self, ctx),
            EntityKind::PlayerProjectile | EntityKind::HazardProjectile => {
                projectile::update(self, out)
            }
            EntityKind::Effect => explosion::update(self, out),
        }
    }

    /// React to being struck
    pub fn hit(&mut self, out: &mut Vec<Signal>) {
        match self.kind() {
            EntityKind::Player => player::hit(self, out),
            EntityKind::Hazard => hazard::hit(self, out),
            EntityKind::PlayerProjectile | EntityKind::HazardProjectile => out.push(Signal::Dead),
            EntityKind::Effect => {}
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match &self.body {
            Body::Player(state) => BoundingBox::centered(self.position, state.half_extent),
            Body::Hazard(state) => BoundingBox::centered(self.position, Vec2::splat(state.size / 2.0)),
            _ => BoundingBox::point(self.position),
        }
    }

    pub fn intercepts(&self, other: &Entity) -> bool {
        self.bounding_box().intercepts(&other.bounding_box())
    }

    /// Energy lost so far
    #[inline]
    pub fn damage(&self) -> u32 {
        self.value.saturating_sub(self.energy)
    }

    #[inline]
    pub fn is_shielded(&self) -> bool {
        self.shield > 0
    }
}

/// Whether two kinds may collide at all
///
/// Effects never collide, and nothing is hurt by its own side's ammunition.
pub fn collides(a: EntityKind, b: EntityKind) -> bool {
    use EntityKind::*;
    !matches!(
        (a, b),
        (Effect, _)
            | (_, Effect)
            | (Player, PlayerProjectile)
            | (PlayerProjectile, Player)
            | (Hazard, HazardProjectile)
            | (HazardProjectile, Hazard)
    )
}
