//! Level population and hazard loudness
//!
//! Creates the level's mines up front and maps pairs of hazard values onto
//! the audio loudness range.

use rand::Rng;
use rand::seq::IndexedRandom;

use super::entity::Entity;
use super::hazard;
use super::state::{Arena, EntityId};
use crate::consts::{MAX_VOLUME, MIN_VOLUME};
use crate::map_range;
use crate::settings::LevelTuning;

/// Create and place exactly `tuning.hazard_count` hazards
///
/// `next_id` is advanced once per hazard.
pub fn spawn_hazards(
    tuning: &LevelTuning,
    arena: Arena,
    rng: &mut impl Rng,
    next_id: &mut EntityId,
) -> Vec<Entity> {
    let mut hazards = Vec::with_capacity(tuning.hazard_count as usize);
    for _ in 0..tuning.hazard_count {
        let value = tuning.hazard_values.choose(rng).copied().unwrap_or(1);
        let id = *next_id;
        *next_id += 1;
        let mut mine = hazard::new_hazard(id, value, tuning.hazard_min_size, rng);
        hazard::setup(&mut mine, arena, rng);
        hazards.push(mine);
    }
    log::info!(
        "Level {}: spawned {} hazards",
        tuning.level,
        hazards.len()
    );
    hazards
}

/// Loudness for two colliding (or one exploding) hazards
///
/// Linear over twice the pool's value range, not clamped.
pub fn hazard_volume(a_value: u32, b_value: u32, tuning: &LevelTuning) -> f32 {
    let min = 2.0 * tuning.min_hazard_value as f32;
    let max = 2.0 * tuning.max_hazard_value as f32;
    if max <= min {
        return (MIN_VOLUME + MAX_VOLUME) / 2.0;
    }
    map_range((a_value + b_value) as f32, min, max, MIN_VOLUME, MAX_VOLUME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::entity::EntityKind;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawns_configured_count() {
        let tuning = Settings::default().level(3);
        let arena = Arena::new(1000.0, 800.0);
        let mut rng = Pcg32::seed_from_u64(11);
        let mut next_id = 10;
        let hazards = spawn_hazards(&tuning, arena, &mut rng, &mut next_id);

        assert_eq!(hazards.len(), 12);
        assert_eq!(next_id, 22);
        for h in &hazards {
            assert_eq!(h.kind(), EntityKind::Hazard);
            assert!(tuning.hazard_values.contains(&h.value));
            assert_eq!(h.energy, h.value);
            assert!(arena.contains(h.position));
            assert!(h.velocity.x.abs() <= 1.0 && h.velocity.y.abs() <= 1.0);
        }
    }

    #[test]
    fn test_volume_endpoints() {
        let tuning = Settings::default().level(1);
        assert!((hazard_volume(1, 1, &tuning) - MIN_VOLUME).abs() < 1e-5);
        assert!((hazard_volume(7, 7, &tuning) - MAX_VOLUME).abs() < 1e-5);
        assert!((hazard_volume(1, 7, &tuning) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_volume_extrapolates() {
        let tuning = Settings::default().level(1);
        assert!(hazard_volume(10, 10, &tuning) > MAX_VOLUME);
    }

    #[test]
    fn test_volume_degenerate_pool() {
        let mut tuning = Settings::default().level(1);
        tuning.min_hazard_value = 3;
        tuning.max_hazard_value = 3;
        assert!((hazard_volume(3, 3, &tuning) - 0.5).abs() < 1e-5);
    }
}
