//! Hazard (mine) behaviour
//!
//! A mine drifts on a noise-driven random walk, bouncing off the edges of the
//! play area. It grows with its energy and answers every hit that leaves it
//! alive with two projectiles: one of its own and one from a random mine.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, FrameContext, Signal};
use super::state::{Arena, EntityId};
use crate::consts::{HAZARD_NOISE_STEP, HAZARD_SIZE_PER_ENERGY};

/// Upper bound for the random starting noise phase
const NOISE_PHASE_RANGE: f32 = 10_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardState {
    /// Per-axis noise phase
    pub noise_phase: Vec2,
    /// Per-axis drift in [-1, 1]; sign flips at the arena edge
    pub drift: Vec2,
    /// Current diameter
    pub size: f32,
    /// Diameter at zero energy
    pub min_size: f32,
}

impl HazardState {
    pub fn new(min_size: f32, rng: &mut impl Rng) -> Self {
        Self {
            noise_phase: Vec2::new(
                rng.random_range(0.0..NOISE_PHASE_RANGE),
                rng.random_range(0.0..NOISE_PHASE_RANGE),
            ),
            drift: Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0)),
            size: min_size,
            min_size,
        }
    }
}

#[inline]
fn size_for(min_size: f32, energy: u32) -> f32 {
    min_size + energy as f32 * HAZARD_SIZE_PER_ENERGY
}

/// Allocate a hazard worth `value`
pub fn new_hazard(id: EntityId, value: u32, min_size: f32, rng: &mut impl Rng) -> Entity {
    Entity::new(id, value, Body::Hazard(HazardState::new(min_size, rng)))
}

/// Place the hazard somewhere in the arena with its initial drift
pub fn setup(entity: &mut Entity, arena: Arena, rng: &mut impl Rng) {
    let Body::Hazard(state) = &mut entity.body else {
        return;
    };
    state.size = size_for(state.min_size, entity.energy);
    let drift = state.drift;
    let position = Vec2::new(
        rng.random_range(0.0..arena.width.max(f32::EPSILON)),
        rng.random_range(0.0..arena.height.max(f32::EPSILON)),
    );
    entity.setup(None, Some(position), Some(drift));
}

pub fn update(entity: &mut Entity, ctx: &FrameContext) {
    let Body::Hazard(state) = &mut entity.body else {
        return;
    };
    state.size = size_for(state.min_size, entity.energy);

    state.noise_phase += Vec2::splat(HAZARD_NOISE_STEP);
    let nx = ctx.noise.sample(state.noise_phase.x);
    let ny = ctx.noise.sample(state.noise_phase.y);

    if entity.position.x < 0.0 || entity.position.x > ctx.arena.width {
        state.drift.x = -state.drift.x;
    }
    if entity.position.y < 0.0 || entity.position.y > ctx.arena.height {
        state.drift.y = -state.drift.y;
    }

    let speed = (entity.energy + 1) as f32;
    entity.velocity = Vec2::new(speed * state.drift.x * nx, speed * state.drift.y * ny);
    entity.position += entity.velocity;
}

pub fn hit(entity: &mut Entity, out: &mut Vec<Signal>) {
    if entity.energy == 0 {
        out.push(Signal::Dead);
        return;
    }
    entity.energy -= 1;
    if entity.energy > 0 {
        out.push(Signal::FireAtPlayer);
        out.push(Signal::FireFromRandomHazard);
    }
}
