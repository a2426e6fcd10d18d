//! Projectiles fired by the player and by hazards
//!
//! Both variants share one behaviour; only speed, lifespan and color differ.
//! A projectile expires quietly once it outlives its max age and dies on
//! any impact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Signal};
use super::state::EntityId;
use crate::consts::PROJECTILE_ENERGY;
use crate::settings::LevelTuning;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Minimum travel speed
    pub speed: f32,
    /// Frames before expiring
    pub max_age: u32,
    pub age: u32,
}

impl ProjectileState {
    pub fn new(speed: f32, max_age: u32) -> Self {
        Self {
            speed,
            max_age,
            age: 0,
        }
    }
}

pub fn new_player_projectile(id: EntityId, tuning: &LevelTuning) -> Entity {
    Entity::new(
        id,
        PROJECTILE_ENERGY,
        Body::PlayerProjectile(ProjectileState::new(
            tuning.player_projectile_speed,
            tuning.player_projectile_max_age,
        )),
    )
}

pub fn new_hazard_projectile(id: EntityId, tuning: &LevelTuning) -> Entity {
    Entity::new(
        id,
        PROJECTILE_ENERGY,
        Body::HazardProjectile(ProjectileState::new(
            tuning.hazard_projectile_speed,
            tuning.hazard_projectile_max_age,
        )),
    )
}

/// Bring the velocity up to the configured speed, keeping its direction
pub(crate) fn arm(entity: &mut Entity) {
    let (Body::PlayerProjectile(state) | Body::HazardProjectile(state)) = &entity.body else {
        return;
    };
    if entity.velocity.length() < state.speed {
        entity.velocity = entity.velocity.normalize_or_zero() * state.speed;
    }
    entity.value = PROJECTILE_ENERGY;
    entity.energy = PROJECTILE_ENERGY;
}

pub fn update(entity: &mut Entity, out: &mut Vec<Signal>) {
    let (Body::PlayerProjectile(state) | Body::HazardProjectile(state)) = &mut entity.body else {
        return;
    };
    entity.position += entity.velocity;
    state.age += 1;
    if state.age > state.max_age {
        out.push(Signal::Dead);
    }
}

/// Unit direction of travel
pub fn heading(entity: &Entity) -> Vec2 {
    entity.velocity.normalize_or_zero()
}
