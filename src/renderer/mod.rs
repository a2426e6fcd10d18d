//! Rendering boundary
//!
//! The simulation exposes entity state; this module turns it into `Shape`s
//! and hands them to whatever `Renderer` the front end provides.

pub mod ascii;
pub mod shapes;

use glam::Vec2;

pub use ascii::AsciiRenderer;
pub use shapes::{Ring, Shape, Stroke};

use crate::consts::STAGE_MARGIN;
use crate::map_range;
use crate::sim::{Arena, Body, Entity, Game};

/// Drawing surface
pub trait Renderer {
    /// Start a new frame
    fn clear(&mut self);
    fn draw(&mut self, shape: &Shape);
}

impl Entity {
    /// Draw this entity's visual
    pub fn render(&self, renderer: &mut dyn Renderer) {
        let shape = match &self.body {
            Body::Player(_) => shapes::ship_shape(self),
            Body::Hazard(state) => Some(shapes::hazard_shape(self, state.size)),
            Body::PlayerProjectile(_) | Body::HazardProjectile(_) => {
                Some(shapes::projectile_shape(self))
            }
            Body::Effect(state) => Some(shapes::explosion_shape(
                self.position,
                state.size,
                state.alpha,
                state.color,
            )),
        };
        if let Some(shape) = shape {
            renderer.draw(&shape);
        }
    }
}

/// Background offset that slides against the ship's position
pub fn stage_offset(ship: Vec2, arena: Arena) -> Vec2 {
    Vec2::new(
        map_range(ship.x, 0.0, arena.width, 0.0, -STAGE_MARGIN),
        map_range(ship.y, 0.0, arena.height, 0.0, -STAGE_MARGIN),
    )
}

/// Draw a whole frame in insertion order, with optional bounding boxes
pub fn render_frame(game: &Game, renderer: &mut dyn Renderer, debug: bool) {
    renderer.clear();

    let ship = game
        .player()
        .map(|p| p.position)
        .unwrap_or_else(|| game.arena.center());
    renderer.draw(&Shape::Backdrop {
        level: game.tuning.level,
        offset: stage_offset(ship, game.arena),
    });

    for entity in game.entities() {
        entity.render(renderer);
    }

    if debug {
        for entity in game.entities() {
            renderer.draw(&shapes::bounding_box(&entity.bounding_box()));
        }
    }
}
