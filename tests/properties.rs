use std::collections::HashMap;

use glam::Vec2;
use proptest::prelude::*;

use minefield::settings::Settings;
use minefield::sim::{Arena, BoundingBox, EntityKind, FrameInput, Game, hazard_volume};

proptest! {
    #[test]
    fn touching_boxes_never_intercept(
        x in -500.0f32..500.0,
        y in -500.0f32..500.0,
        w in 0.0f32..100.0,
        h in 0.0f32..100.0,
        w2 in 0.0f32..100.0,
    ) {
        let a = BoundingBox::new(Vec2::new(x, y), Vec2::new(x + w, y + h));
        // shares the right edge of `a`
        let b = BoundingBox::new(Vec2::new(x + w, y), Vec2::new(x + w + w2, y + h));
        prop_assert!(!a.intercepts(&b));
        prop_assert!(!b.intercepts(&a));
    }

    #[test]
    fn intercept_is_symmetric(
        ax in -100.0f32..100.0, ay in -100.0f32..100.0,
        bx in -100.0f32..100.0, by in -100.0f32..100.0,
        half in 1.0f32..50.0,
    ) {
        let a = BoundingBox::centered(Vec2::new(ax, ay), Vec2::splat(half));
        let b = BoundingBox::centered(Vec2::new(bx, by), Vec2::splat(half));
        prop_assert_eq!(a.intercepts(&b), b.intercepts(&a));
    }

    #[test]
    fn volume_grows_with_combined_value(a in 1u32..8, b in 1u32..8, extra in 1u32..5) {
        let tuning = Settings::default().level(1);
        prop_assert!(hazard_volume(a + extra, b, &tuning) > hazard_volume(a, b, &tuning));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn session_bookkeeping_holds(seed in any::<u64>(), level in 1u32..=5) {
        let settings = Settings::default();
        let mut game = Game::new(&settings, level, Arena::new(640.0, 480.0), seed);
        let values: HashMap<u32, u32> = game
            .entities()
            .iter()
            .filter(|e| e.kind() == EntityKind::Hazard)
            .map(|e| (e.id, e.value))
            .collect();

        for frame in 0..600u32 {
            let target = Vec2::new(
                320.0 + 200.0 * (frame as f32 * 0.02).cos(),
                240.0 + 150.0 * (frame as f32 * 0.02).sin(),
            );
            game.tick(&FrameInput {
                target: Some(target),
                fire: frame % 10 == 0,
                pause: false,
            });

            prop_assert_eq!(game.hazard_count() as usize, game.count_kind(EntityKind::Hazard));
            prop_assert_eq!(
                game.projectile_count() as usize,
                game.count_kind(EntityKind::PlayerProjectile)
            );
            prop_assert!(game.projectile_count() <= game.tuning.max_player_projectiles);
            for e in game.entities() {
                prop_assert!(e.energy <= e.value);
            }
        }

        let destroyed: u64 = values
            .iter()
            .filter(|(id, _)| game.entity(**id).is_none())
            .map(|(_, v)| u64::from(*v))
            .sum();
        prop_assert_eq!(game.score(), destroyed);
    }
}
