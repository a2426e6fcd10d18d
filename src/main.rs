//! Minefield native driver
//!
//! Runs a headless session under a simple autopilot and reports the outcome.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use minefield::audio::{AudioManager, LogAudio};
use minefield::renderer::{AsciiRenderer, render_frame};
use minefield::sim::{Arena, EntityKind, FrameInput, Game};
use minefield::ui::{LogStatus, Status, StatusDisplay, present};
use minefield::{GamePhase, Settings};

#[derive(Parser, Debug)]
#[command(name = "minefield")]
#[command(about = "Headless minefield session driven by an autopilot")]
struct Cli {
    /// Settings file (built-in tables if omitted)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 1)]
    level: u32,
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u64,
    #[arg(long, default_value_t = 1280.0)]
    width: f32,
    #[arg(long, default_value_t = 720.0)]
    height: f32,
    /// Print an ASCII frame every N frames (0 disables)
    #[arg(long, default_value_t = 0)]
    render_every: u64,
    /// Draw bounding boxes when rendering
    #[arg(long, default_value_t = false)]
    debug: bool,
}

/// Steers at the nearest mine and fires on a fixed cadence
struct Autopilot {
    fire_every: u64,
}

impl Autopilot {
    fn input(&self, game: &Game) -> FrameInput {
        if game.phase() == GamePhase::Ready {
            return FrameInput {
                fire: true,
                ..Default::default()
            };
        }

        let ship = game.player().map(|p| p.position).unwrap_or(game.arena.center());
        let target = game
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Hazard)
            .map(|e| e.position)
            .min_by(|a, b| a.distance_squared(ship).total_cmp(&b.distance_squared(ship)))
            .unwrap_or(game.arena.center());

        FrameInput {
            target: Some(target),
            fire: game.frame() % self.fire_every == 0,
            pause: false,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    let debug = cli.debug || settings.debug;
    let arena = Arena::new(cli.width.max(1.0), cli.height.max(1.0));

    let mut game = Game::new(&settings, cli.level, arena, cli.seed);
    let mut audio = AudioManager::new(LogAudio::new(settings.sounds.clone()));
    let mut display = LogStatus::default();
    let mut screen = AsciiRenderer::new(80, 24, arena);
    let pilot = Autopilot { fire_every: 15 };

    log::info!("{} v{} starting", settings.name, env!("CARGO_PKG_VERSION"));
    display.ready(true);

    for step in 0..cli.frames {
        game.tick(&pilot.input(&game));
        let events = game.drain_events();
        present(&events, &game, &mut audio, &mut display);

        if cli.render_every > 0 && step % cli.render_every == 0 {
            render_frame(&game, &mut screen, debug);
            println!("frame {}\n{}", game.frame(), screen);
        }
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    let status = Status::from_game(&game);
    println!("{:?} after {} frames: {}", game.phase(), game.frame(), status);
    println!("sounds played: {}", audio.backend().played.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_autopilot_starts_then_steers() {
        let settings = Settings::default();
        let mut game = Game::new(&settings, 1, Arena::new(800.0, 600.0), 5);
        let pilot = Autopilot { fire_every: 15 };

        let first = pilot.input(&game);
        assert!(first.fire);
        assert!(first.target.is_none());

        game.tick(&first);
        let next = pilot.input(&game);
        let target = next.target.unwrap_or(Vec2::ZERO);
        assert!(
            game.entities()
                .iter()
                .any(|e| e.kind() == EntityKind::Hazard && e.position == target)
        );
    }
}
