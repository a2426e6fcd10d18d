//! Shape generation for entity visuals
//!
//! Turns entity state into renderer-agnostic primitives. Colors are RGBA in
//! [0, 1].

use glam::Vec2;

use crate::consts::{FRAME_RATE, PROJECTILE_DIAMETER};
use crate::map_range;
use crate::sim::{Body, BoundingBox, Entity, EntityKind};

/// Colors for game elements
pub mod colors {
    pub const PLAYER_PROJECTILE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HAZARD_PROJECTILE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HAZARD_OUTLINE: [f32; 4] = [0.0, 0.0, 0.0, 160.0 / 255.0];
    pub const DAMAGE_OUTLINE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ENGINE: [f32; 4] = [1.0, 64.0 / 255.0, 0.0, 1.0];
    pub const ALERT: [f32; 4] = [1.0, 0.0, 0.0, 200.0 / 255.0];
    pub const SHIELD: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const DEBUG_BOX: [f32; 4] = [0.0, 0.0, 1.0, 0.5];
}

/// Outline for a filled shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: [f32; 4],
    pub weight: f32,
}

/// A translucent ring around the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub diameter: f32,
    pub fill: [f32; 4],
    pub stroke: Option<Stroke>,
}

/// Primitive handed to a `Renderer`
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Level background, shifted for parallax
    Backdrop { level: u32, offset: Vec2 },
    Circle {
        center: Vec2,
        diameter: f32,
        fill: [f32; 4],
        stroke: Option<Stroke>,
    },
    Ship {
        center: Vec2,
        angle: f32,
        half_extent: Vec2,
        sprite: Option<String>,
        /// Exhaust plume length
        engine: f32,
        alert: Option<Ring>,
        shield: Option<Ring>,
        /// Whole seconds of shield left
        shield_seconds: Option<u32>,
    },
    /// Outline only (debug overlay)
    Rect { min: Vec2, max: Vec2, color: [f32; 4] },
}

/// Gray by value, shading to red as damage accumulates
pub fn hazard_fill(entity: &Entity) -> [f32; 4] {
    if entity.damage() > 0 && entity.value > 0 {
        let red = map_range(entity.energy as f32, entity.value as f32, 0.0, 0.0, 1.0);
        [red, 0.0, 0.0, 1.0]
    } else {
        let gray = map_range(entity.value as f32, 1.0, 7.0, 1.0, 128.0 / 255.0).clamp(0.0, 1.0);
        [gray, gray, gray, 1.0]
    }
}

pub fn hazard_shape(entity: &Entity, size: f32) -> Shape {
    let outline = if entity.damage() > 0 {
        colors::DAMAGE_OUTLINE
    } else {
        colors::HAZARD_OUTLINE
    };
    Shape::Circle {
        center: entity.position,
        diameter: size,
        fill: hazard_fill(entity),
        stroke: Some(Stroke {
            color: outline,
            weight: entity.energy.saturating_sub(1) as f32,
        }),
    }
}

pub fn projectile_shape(entity: &Entity) -> Shape {
    let fill = match entity.kind() {
        EntityKind::HazardProjectile => colors::HAZARD_PROJECTILE,
        _ => colors::PLAYER_PROJECTILE,
    };
    Shape::Circle {
        center: entity.position,
        diameter: PROJECTILE_DIAMETER,
        fill,
        stroke: None,
    }
}

pub fn explosion_shape(center: Vec2, size: f32, alpha: f32, color: [u8; 3]) -> Shape {
    let [r, g, b] = color.map(|c| c as f32 / 255.0);
    Shape::Circle {
        center,
        diameter: size,
        fill: [r, g, b, (alpha / 255.0).clamp(0.0, 1.0)],
        stroke: None,
    }
}

/// Ship hull with exhaust, damage alert and shield overlays
pub fn ship_shape(entity: &Entity) -> Option<Shape> {
    let Body::Player(state) = &entity.body else {
        return None;
    };
    let hull = state.half_extent.y * 2.0;
    let speed = entity.velocity.length();

    let alert = (entity.damage() > 0 && entity.value > 0).then(|| {
        let strength = 1.0 - entity.energy as f32 / entity.value as f32;
        Ring {
            diameter: 1.3 * hull * state.alert,
            fill: [1.0, 0.0, 0.0, strength * state.alert],
            stroke: Some(Stroke {
                color: colors::ALERT,
                weight: entity.energy.saturating_sub(1) as f32,
            }),
        }
    });

    let shield = (entity.shield > 0).then(|| {
        let alpha = if state.max_shield > 0 {
            map_range(entity.shield as f32, state.max_shield as f32, 0.0, 160.0, 32.0) / 255.0
        } else {
            32.0 / 255.0
        };
        let [r, g, b, _] = colors::SHIELD;
        Ring {
            diameter: 1.3 * hull + state.alert,
            fill: [r, g, b, alpha],
            stroke: None,
        }
    });
    let shield_seconds = (entity.shield > 0).then(|| (entity.shield as f32 / FRAME_RATE) as u32 + 1);

    Some(Shape::Ship {
        center: entity.position,
        angle: state.angle,
        half_extent: state.half_extent,
        sprite: entity.asset.clone(),
        engine: 30.0 + speed * 5.0,
        alert,
        shield,
        shield_seconds,
    })
}

/// Debug outline of a bounding box
pub fn bounding_box(bbox: &BoundingBox) -> Shape {
    Shape::Rect {
        min: bbox.min,
        max: bbox.max,
        color: colors::DEBUG_BOX,
    }
}
