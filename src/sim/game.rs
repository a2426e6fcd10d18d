//! Frame pipeline and lifecycle dispatch
//!
//! `Game` owns every live entity and the session counters. Each frame runs a
//! collision scan, then an update pass; both walk a snapshot of entity ids so
//! that removals and spawns during the pass are safe. Anything an entity
//! signals is applied as soon as the call that produced it returns.

use glam::Vec2;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, FrameContext, Signal, collides};
use super::explosion;
use super::noise::Noise;
use super::player;
use super::projectile;
use super::spawner::{hazard_volume, spawn_hazards};
use super::state::{Arena, EntityId, FrameInput, GameEvent, GamePhase, SoundCue};
use crate::settings::{LevelTuning, Settings};

/// A single play session
#[derive(Debug, Clone)]
pub struct Game {
    /// Tables for the session's level
    pub tuning: LevelTuning,
    pub arena: Arena,
    pub seed: u64,
    phase: GamePhase,
    paused: bool,
    score: u64,
    frame: u64,
    /// Live entities in insertion order
    entities: Vec<Entity>,
    /// Live hazards
    hazard_count: u32,
    /// Live player projectiles
    projectile_count: u32,
    player_id: EntityId,
    /// Where the ship is steering
    target: Vec2,
    events: Vec<GameEvent>,
    rng: Pcg32,
    noise: Noise,
    next_id: EntityId,
}

impl Game {
    /// Start a session on `level` (clamped) of validated settings
    pub fn new(settings: &Settings, level: u32, arena: Arena, seed: u64) -> Self {
        let tuning = settings.level(level);
        let mut game = Self::with_tuning(tuning, arena, seed);

        if let Some(sprite) = settings.sprites.choose(&mut game.rng).cloned() {
            if let Some(ship) = game.player_mut() {
                ship.asset = Some(sprite);
            }
        }
        game
    }

    /// Start a session from already-resolved level tables
    pub fn with_tuning(tuning: LevelTuning, arena: Arena, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let noise = Noise::new(&mut rng);

        let mut next_id: EntityId = 1;
        let player_id = next_id;
        next_id += 1;
        let mut ship = player::new_player(player_id, &tuning);
        player::setup(&mut ship, arena, None);

        let hazards = spawn_hazards(&tuning, arena, &mut rng, &mut next_id);
        let hazard_count = hazards.len() as u32;

        let mut entities = Vec::with_capacity(hazards.len() + 1);
        entities.push(ship);
        entities.extend(hazards);

        log::info!(
            "New session: level {}, {} hazards, seed {}",
            tuning.level,
            hazard_count,
            seed
        );

        Self {
            tuning,
            arena,
            seed,
            phase: GamePhase::Ready,
            paused: false,
            score: 0,
            frame: 0,
            entities,
            hazard_count,
            projectile_count: 0,
            player_id,
            target: arena.center(),
            events: Vec::new(),
            rng,
            noise,
            next_id,
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Accessors ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn hazard_count(&self) -> u32 {
        self.hazard_count
    }

    pub fn projectile_count(&self) -> u32 {
        self.projectile_count
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The ship, while it is alive
    pub fn player(&self) -> Option<&Entity> {
        self.entity(self.player_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player_id;
        self.entity_mut(id)
    }

    /// Live entities of one kind
    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind() == kind).count()
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hazard loudness for two values under this session's pool
    pub fn volume(&self, a_value: u32, b_value: u32) -> f32 {
        hazard_volume(a_value, b_value, &self.tuning)
    }

    fn snapshot(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// Started and not yet over, paused or not
    fn is_live(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Cleared)
    }

    fn is_running(&self) -> bool {
        !self.paused && self.is_live()
    }

    // === Input ===

    /// Apply one frame of input, then advance the simulation
    pub fn tick(&mut self, input: &FrameInput) {
        self.handle_input(input);
        self.advance_frame();
    }

    pub fn handle_input(&mut self, input: &FrameInput) {
        if let Some(target) = input.target {
            self.target = target;
        }
        if input.pause {
            self.toggle_pause();
        }
        if input.fire {
            self.fire_or_start();
        }
    }

    /// First trigger starts the session; later ones fire
    pub fn fire_or_start(&mut self) {
        match self.phase {
            GamePhase::Ready => self.start(),
            GamePhase::GameOver => {}
            GamePhase::Playing | GamePhase::Cleared => {
                if !self.paused {
                    self.fire_player_projectile();
                }
            }
        }
    }

    pub fn start(&mut self) {
        if self.phase != GamePhase::Ready {
            return;
        }
        self.phase = GamePhase::Playing;
        self.paused = false;
        self.events.push(GameEvent::Started);
        self.events.push(GameEvent::StatusChanged);
        self.events.push(GameEvent::Ambient(true));
        log::info!("Session started on level {}", self.tuning.level);
    }

    /// Pause gate; no time passes while paused
    pub fn toggle_pause(&mut self) {
        if matches!(self.phase, GamePhase::Ready | GamePhase::GameOver) {
            return;
        }
        self.paused = !self.paused;
        self.events.push(GameEvent::StopAllSounds);
        self.events.push(GameEvent::StatusChanged);
        self.events.push(GameEvent::Ambient(!self.paused));
        log::debug!("Paused: {}", self.paused);
    }

    // === Frame pipeline ===

    /// Advance one frame: collisions first, then every entity's update
    pub fn advance_frame(&mut self) {
        if !self.is_running() {
            return;
        }
        self.frame += 1;
        self.detect_collisions();
        self.update_entities();
    }

    /// Hit every intercepting pair once
    ///
    /// Pairs involving an effect or a side's own ammunition are skipped, as
    /// are pairs where either side is shielded.
    fn detect_collisions(&mut self) {
        let ids = self.snapshot();
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                if self.phase == GamePhase::GameOver {
                    return;
                }
                let (Some(ea), Some(eb)) = (self.entity(a), self.entity(b)) else {
                    continue;
                };
                if !collides(ea.kind(), eb.kind()) {
                    continue;
                }
                if ea.is_shielded() || eb.is_shielded() || !ea.intercepts(eb) {
                    continue;
                }

                let volume = if ea.kind() == EntityKind::Hazard && eb.kind() == EntityKind::Hazard {
                    self.volume(ea.value, eb.value)
                } else {
                    1.0
                };
                self.events.push(GameEvent::sound_at(SoundCue::Hit, volume));
                self.hit(a);
                self.hit(b);
                self.events.push(GameEvent::StatusChanged);
            }
        }
    }

    fn update_entities(&mut self) {
        for id in self.snapshot() {
            if self.phase == GamePhase::GameOver {
                return;
            }
            let mut signals = Vec::new();
            {
                let ctx = FrameContext {
                    arena: self.arena,
                    target: self.target,
                    noise: &self.noise,
                };
                let Some(entity) = self.entities.iter_mut().find(|e| e.id == id) else {
                    continue;
                };
                entity.update(&ctx, &mut signals);
            }
            self.apply_signals(id, signals);
        }
    }

    /// Strike one entity and apply whatever it signals
    pub fn hit(&mut self, id: EntityId) {
        if !self.is_live() {
            return;
        }
        let mut signals = Vec::new();
        let Some(entity) = self.entity_mut(id) else {
            return;
        };
        entity.hit(&mut signals);
        self.apply_signals(id, signals);
    }

    fn apply_signals(&mut self, id: EntityId, signals: Vec<Signal>) {
        for signal in signals {
            match signal {
                Signal::Dead => self.report_death(id),
                Signal::FireAtPlayer => self.fire_hazard_projectile(id),
                Signal::FireFromRandomHazard => self.fire_random_hazard_projectile(),
                Signal::Alert => self.events.push(GameEvent::sound(SoundCue::Alert)),
                Signal::ShieldDown => {
                    self.events.push(GameEvent::sound(SoundCue::Shield));
                    self.events.push(GameEvent::StatusChanged);
                }
            }
        }
    }

    // === Lifecycle ===

    /// Remove a dead entity and run its death transition
    ///
    /// Does nothing if the entity is already gone, or before the session
    /// starts and after it ends.
    pub fn report_death(&mut self, id: EntityId) {
        if !self.is_live() {
            return;
        }
        let Some(index) = self.entities.iter().position(|e| e.id == id) else {
            return;
        };
        let entity = self.entities.remove(index);
        log::debug!("{:?} {} died at {:?}", entity.kind(), id, entity.position);

        match entity.kind() {
            EntityKind::Effect | EntityKind::HazardProjectile => return,
            EntityKind::PlayerProjectile => {
                self.projectile_count = self.projectile_count.saturating_sub(1);
                return;
            }
            EntityKind::Hazard => {
                self.hazard_count = self.hazard_count.saturating_sub(1);
                self.score += u64::from(entity.value);
                self.events.push(GameEvent::StatusChanged);
                if self.hazard_count == 0 {
                    self.level_clear();
                    return;
                }
            }
            EntityKind::Player => {
                self.game_over();
                return;
            }
        }

        self.explode(&entity);
    }

    fn explode(&mut self, entity: &Entity) {
        let volume = if self.projectile_count > 0 {
            1.0
        } else {
            self.volume(entity.value, entity.value)
        };
        self.events.push(GameEvent::sound_at(SoundCue::Explode, volume));
        let id = self.next_entity_id();
        let flash = explosion::new_explosion(id, entity.position, entity.value as f32, &mut self.rng);
        self.entities.push(flash);
    }

    fn level_clear(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::Cleared;
        self.events.push(GameEvent::sound(SoundCue::Achievement));
        self.events.push(GameEvent::LevelCleared);
        log::info!(
            "Level {} cleared at frame {} with score {}",
            self.tuning.level,
            self.frame,
            self.score
        );
    }

    fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.paused = true;
        self.events.push(GameEvent::sound(SoundCue::GameOver));
        self.events.push(GameEvent::GameOver);
        self.events.push(GameEvent::StatusChanged);
        log::info!("Game over at frame {} with score {}", self.frame, self.score);
    }

    // === Firing ===

    /// Fire from a hazard toward the ship
    pub fn fire_hazard_projectile(&mut self, hazard_id: EntityId) {
        let Some(hazard) = self.entity(hazard_id) else {
            return;
        };
        if hazard.kind() != EntityKind::Hazard {
            return;
        }
        let Some(ship) = self.player() else {
            return;
        };
        let origin = hazard.position;
        let direction = -(hazard.position - ship.position).normalize_or_zero();

        self.events.push(GameEvent::sound(SoundCue::HazardFire));
        let id = self.next_entity_id();
        let mut missile = projectile::new_hazard_projectile(id, &self.tuning);
        missile.setup(None, Some(origin), Some(direction));
        self.entities.push(missile);
    }

    /// Pick a uniformly random live entity; fire only if it is a hazard
    pub fn fire_random_hazard_projectile(&mut self) {
        let Some(pick) = self.entities.choose(&mut self.rng) else {
            return;
        };
        if pick.kind() == EntityKind::Hazard {
            let id = pick.id;
            self.fire_hazard_projectile(id);
        }
    }

    /// Fire from the ship's muzzle, unless the level's cap is reached
    pub fn fire_player_projectile(&mut self) {
        if self.projectile_count >= self.tuning.max_player_projectiles {
            return;
        }
        let Some((muzzle, velocity)) = self.player().and_then(player::launch) else {
            return;
        };

        self.events.push(GameEvent::sound(SoundCue::PlayerFire));
        self.projectile_count += 1;
        let id = self.next_entity_id();
        let mut missile = projectile::new_player_projectile(id, &self.tuning);
        missile.setup(None, Some(muzzle), Some(velocity));
        self.entities.push(missile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(&Settings::default(), 1, Arena::new(800.0, 600.0), 12345)
    }

    /// Move every hazard into a corner far from the ship so nothing collides
    fn park_hazards(game: &mut Game) {
        let ids: Vec<EntityId> = game
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Hazard)
            .map(|e| e.id)
            .collect();
        for (i, id) in ids.into_iter().enumerate() {
            let e = game.entity_mut(id).unwrap();
            e.position = Vec2::new(-1000.0 - 200.0 * i as f32, -1000.0);
        }
    }

    #[test]
    fn test_new_session_is_ready() {
        let game = game();
        assert_eq!(game.phase(), GamePhase::Ready);
        assert_eq!(game.hazard_count(), 5);
        assert_eq!(game.count_kind(EntityKind::Hazard), 5);
        assert!(game.player().is_some());
    }

    #[test]
    fn test_frames_wait_for_start() {
        let mut game = game();
        game.advance_frame();
        assert_eq!(game.frame(), 0);

        game.tick(&FrameInput {
            fire: true,
            ..Default::default()
        });
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(game.frame(), 1);
        assert!(game.events().contains(&GameEvent::Started));
        // starting does not fire
        assert_eq!(game.projectile_count(), 0);
    }

    #[test]
    fn test_pause_freezes_state() {
        let mut game = game();
        game.start();
        game.tick(&FrameInput {
            pause: true,
            ..Default::default()
        });
        assert!(game.is_paused());
        let frame = game.frame();
        let positions: Vec<Vec2> = game.entities().iter().map(|e| e.position).collect();

        for _ in 0..10 {
            game.tick(&FrameInput {
                fire: true,
                ..Default::default()
            });
        }
        assert_eq!(game.frame(), frame);
        assert_eq!(game.projectile_count(), 0);
        let after: Vec<Vec2> = game.entities().iter().map(|e| e.position).collect();
        assert_eq!(positions, after);

        game.toggle_pause();
        assert!(!game.is_paused());
        assert!(game.events().contains(&GameEvent::Ambient(true)));
    }

    #[test]
    fn test_fire_rate_cap() {
        let mut game = game();
        game.start();
        for _ in 0..10 {
            game.fire_player_projectile();
        }
        assert_eq!(game.projectile_count(), 3);
        assert_eq!(game.count_kind(EntityKind::PlayerProjectile), 3);
    }

    #[test]
    fn test_player_projectile_expiry_frees_slot() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        game.fire_player_projectile();
        assert_eq!(game.projectile_count(), 1);

        let max_age = game.tuning.player_projectile_max_age;
        for _ in 0..=max_age {
            game.advance_frame();
        }
        assert_eq!(game.projectile_count(), 0);
        assert_eq!(game.count_kind(EntityKind::PlayerProjectile), 0);
        // expiry never explodes
        assert_eq!(game.count_kind(EntityKind::Effect), 0);
    }

    #[test]
    fn test_report_death_is_idempotent() {
        let mut game = game();
        game.start();
        let hazard = game
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Hazard)
            .map(|e| (e.id, e.value))
            .unwrap();

        game.report_death(hazard.0);
        game.report_death(hazard.0);
        assert_eq!(game.hazard_count(), 4);
        assert_eq!(game.score(), u64::from(hazard.1));
        assert_eq!(game.count_kind(EntityKind::Effect), 1);
    }

    #[test]
    fn test_hazard_fires_toward_player() {
        let mut game = game();
        game.start();
        let ship = game.player().unwrap().position;
        let hazard = game
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Hazard)
            .unwrap()
            .id;
        game.entity_mut(hazard).unwrap().position = ship + Vec2::new(200.0, 0.0);

        game.fire_hazard_projectile(hazard);
        let missile = game
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::HazardProjectile)
            .unwrap();
        assert!(missile.velocity.x < 0.0);
        assert!(missile.velocity.y.abs() < 1e-4);
        assert!((missile.velocity.length() - game.tuning.hazard_projectile_speed).abs() < 1e-3);
    }

    #[test]
    fn test_effects_never_collide() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        let ship = game.player().unwrap().position;
        let id = game.next_entity_id();
        let flash = explosion::new_explosion(id, ship, 3.0, &mut game.rng);
        game.entities.push(flash);
        game.player_mut().unwrap().shield = 0;

        game.advance_frame();
        assert_eq!(game.player().unwrap().energy, 5);
    }

    #[test]
    fn test_hazard_collision_with_player_hits_both() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        let ship = game.player().unwrap().position;
        let hazard = game
            .entities()
            .iter()
            .find(|e| e.kind() == EntityKind::Hazard)
            .unwrap()
            .id;
        {
            let h = game.entity_mut(hazard).unwrap();
            h.position = ship;
            h.value = 3;
            h.energy = 3;
        }
        game.player_mut().unwrap().shield = 0;
        game.drain_events();

        game.advance_frame();
        assert_eq!(game.player().unwrap().energy, 4);
        assert_eq!(game.entity(hazard).unwrap().energy, 2);
        assert!(
            game.events()
                .contains(&GameEvent::sound_at(SoundCue::Hit, 1.0))
        );
    }

    #[test]
    fn test_player_death_ends_session() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        let id = game.player().unwrap().id;
        for _ in 0..5 {
            game.hit(id);
        }
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.player().is_none());
        assert_eq!(
            game.events().iter().filter(|e| **e == GameEvent::GameOver).count(),
            1
        );
        // no explosion for the ship
        assert_eq!(game.count_kind(EntityKind::Effect), 0);

        let frame = game.frame();
        game.advance_frame();
        game.toggle_pause();
        assert_eq!(game.frame(), frame);
        assert!(game.is_paused());
    }

    fn hazard_ids(game: &Game) -> Vec<EntityId> {
        game.entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Hazard)
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_random_fire_can_miss() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        for _ in 0..30 {
            let id = game.next_entity_id();
            let flash = explosion::new_explosion(id, Vec2::ZERO, 3.0, &mut game.rng);
            game.entities.push(flash);
        }

        for _ in 0..200 {
            game.fire_random_hazard_projectile();
        }
        let fired = game.count_kind(EntityKind::HazardProjectile);
        // most picks land on the ship, effects or earlier projectiles
        assert!(fired > 0);
        assert!(fired < 100);
    }

    #[test]
    fn test_random_fire_without_hazards_is_silent() {
        let mut game = game();
        game.start();
        game.entities.retain(|e| e.kind() != EntityKind::Hazard);
        for _ in 0..20 {
            game.fire_random_hazard_projectile();
        }
        assert_eq!(game.count_kind(EntityKind::HazardProjectile), 0);
    }

    #[test]
    fn test_hazard_pair_hit_uses_pool_volume() {
        let mut game = game();
        game.start();
        park_hazards(&mut game);
        let ids = hazard_ids(&game);
        for (id, value) in [(ids[0], 1), (ids[1], 7)] {
            let h = game.entity_mut(id).unwrap();
            h.position = Vec2::new(-3000.0, -3000.0);
            h.value = value;
            h.energy = value;
        }
        game.drain_events();

        game.advance_frame();
        assert!(
            game.events()
                .contains(&GameEvent::sound_at(SoundCue::Hit, 0.5))
        );
        assert_eq!(game.entity(ids[0]).unwrap().energy, 0);
        assert_eq!(game.entity(ids[1]).unwrap().energy, 6);
    }

    #[test]
    fn test_explosion_uses_pool_volume_without_projectiles() {
        let mut game = game();
        game.start();
        let id = hazard_ids(&game)[0];
        let value = game.entity(id).unwrap().value;
        assert_eq!(game.projectile_count(), 0);
        game.drain_events();

        game.report_death(id);
        let volume = hazard_volume(value, value, &game.tuning);
        assert!(
            game.events()
                .contains(&GameEvent::sound_at(SoundCue::Explode, volume))
        );
    }

    #[test]
    fn test_deaths_ignored_before_start() {
        let mut game = game();
        for id in hazard_ids(&game) {
            game.hit(id);
            game.report_death(id);
        }
        assert_eq!(game.hazard_count(), 5);
        assert_eq!(game.count_kind(EntityKind::Hazard), 5);
        assert_eq!(game.score(), 0);
        assert!(game.events().is_empty());

        // the level can still be cleared once play begins
        game.start();
        for id in hazard_ids(&game) {
            game.report_death(id);
        }
        assert_eq!(game.hazard_count(), 0);
        assert_eq!(game.phase(), GamePhase::Cleared);
    }

    #[test]
    fn test_unvalidated_settings_do_not_panic() {
        let mut settings = Settings::default();
        settings.level_hazards.clear();
        settings.player_shields.clear();
        let game = Game::new(&settings, 3, Arena::new(800.0, 600.0), 1);
        assert_eq!(game.tuning.level, 1);
        assert_eq!(game.hazard_count(), 5);
        assert_eq!(game.player().unwrap().shield, 300);
    }
}
