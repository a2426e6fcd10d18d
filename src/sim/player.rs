//! The player's ship
//!
//! Position eases toward the pointer and the facing angle eases toward the
//! direction of travel at a faster rate, so the hull visibly swings round
//! behind the movement.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity, FrameContext, Signal};
use super::state::{Arena, EntityId};
use crate::angle_lerp;
use crate::consts::{PLAYER_ALERT_FREQ, PLAYER_MOVE_SPEED, PLAYER_TURN_SPEED};
use crate::settings::LevelTuning;

/// Movement below this is treated as standing still for steering
const MIN_STEER_SPEED: f32 = 1e-4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Facing angle (radians)
    pub angle: f32,
    /// Damage indicator phase in [0, 1)
    pub alert: f32,
    /// Shield frames at session start
    pub max_shield: u32,
    /// Half the hull width and height
    pub half_extent: Vec2,
    /// Where projectiles leave the hull
    pub muzzle: Vec2,
}

pub fn new_player(id: EntityId, tuning: &LevelTuning) -> Entity {
    let [w, h] = tuning.ship_size;
    Entity::new(
        id,
        tuning.player_energy,
        Body::Player(PlayerState {
            angle: 0.0,
            alert: 0.0,
            max_shield: tuning.player_shield,
            half_extent: Vec2::new(w / 2.0, h / 2.0),
            muzzle: Vec2::ZERO,
        }),
    )
}

/// Centre the ship, fill energy and raise the shield
pub fn setup(entity: &mut Entity, arena: Arena, sprite: Option<String>) {
    entity.setup(sprite, Some(arena.center()), Some(Vec2::ZERO));
    entity.energy = entity.value;
    let Body::Player(state) = &mut entity.body else {
        return;
    };
    entity.shield = state.max_shield;
    state.muzzle = muzzle_point(entity.position, state);
}

fn muzzle_point(position: Vec2, state: &PlayerState) -> Vec2 {
    position + Vec2::from_angle(state.angle).rotate(Vec2::new(state.half_extent.x, 0.0))
}

pub fn update(entity: &mut Entity, ctx: &FrameContext, out: &mut Vec<Signal>) {
    let Body::Player(state) = &mut entity.body else {
        return;
    };

    let next = entity.position.lerp(ctx.target, PLAYER_MOVE_SPEED);
    entity.velocity = next - entity.position;
    entity.position = next;
    if entity.velocity.length() > MIN_STEER_SPEED {
        let heading = entity.velocity.y.atan2(entity.velocity.x);
        state.angle = crate::normalize_angle(angle_lerp(state.angle, heading, PLAYER_TURN_SPEED));
    }
    state.muzzle = muzzle_point(entity.position, state);

    let damage = entity.value.saturating_sub(entity.energy);
    if damage > 0 {
        let mut freq = PLAYER_ALERT_FREQ * damage as f32;
        if entity.energy == 1 {
            freq *= 3.0;
        }
        state.alert += freq;
        if state.alert >= 1.0 {
            state.alert = 0.0;
        }
    } else {
        state.alert = 0.0;
    }

    if entity.shield > 0 {
        entity.shield -= 1;
        if entity.shield == 0 {
            out.push(Signal::ShieldDown);
        }
    }
}

pub fn hit(entity: &mut Entity, out: &mut Vec<Signal>) {
    entity.energy = entity.energy.saturating_sub(1);
    if entity.energy == 1 {
        out.push(Signal::Alert);
    } else if entity.energy == 0 {
        out.push(Signal::Dead);
    }
}

/// Muzzle point and launch velocity for a new projectile
///
/// A ship at rest launches along its facing angle.
pub fn launch(entity: &Entity) -> Option<(Vec2, Vec2)> {
    let Body::Player(state) = &entity.body else {
        return None;
    };
    let velocity = if entity.velocity.length() > MIN_STEER_SPEED {
        entity.velocity
    } else {
        Vec2::from_angle(state.angle) * MIN_STEER_SPEED * 2.0
    };
    Some((state.muzzle, velocity))
}
