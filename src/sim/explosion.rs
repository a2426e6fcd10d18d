//! Explosion flash left behind by a destroyed entity
//!
//! Purely cosmetic: grows and fades at fixed rates, then removes itself.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, Signal};
use super::state::EntityId;
use crate::consts::{EXPLOSION_FADE, EXPLOSION_GROWTH, EXPLOSION_START_ALPHA};

/// red, coral, tomato, yellow, orange
const PALETTE: [[u8; 3]; 5] = [
    [255, 0, 0],
    [255, 127, 80],
    [255, 99, 71],
    [255, 255, 0],
    [255, 165, 0],
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionState {
    /// Current diameter
    pub size: f32,
    /// Opacity, 255 down to 0
    pub alpha: f32,
    pub color: [u8; 3],
}

impl ExplosionState {
    pub fn new(size: f32, color: [u8; 3]) -> Self {
        Self {
            size,
            alpha: EXPLOSION_START_ALPHA,
            color,
        }
    }
}

/// Allocate and place an explosion of the given starting size
pub fn new_explosion(id: EntityId, position: Vec2, size: f32, rng: &mut impl Rng) -> Entity {
    let color = *PALETTE.choose(rng).unwrap_or(&PALETTE[0]);
    let mut entity = Entity::new(id, 0, Body::Effect(ExplosionState::new(size, color)));
    entity.setup(None, Some(position), None);
    entity
}

pub fn update(entity: &mut Entity, out: &mut Vec<Signal>) {
    let Body::Effect(state) = &mut entity.body else {
        return;
    };
    state.size += EXPLOSION_GROWTH;
    state.alpha -= EXPLOSION_FADE;
    if state.alpha <= 0.0 {
        out.push(Signal::Dead);
    }
}
