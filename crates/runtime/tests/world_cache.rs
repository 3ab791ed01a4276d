//! World cache behavior: lazy creation, the farm ratchet, special maps.

use realms_core::{
    Coordinate, Difficulty, GameConfig, GenContext, GridDimensions, IdAllocator, SeededRng,
    plan_highway,
};
use realms_runtime::WorldCache;

fn context(root_seed: u32) -> GenContext {
    let highway = plan_highway(
        GameConfig::START_COORDINATE,
        &[
            GameConfig::EASTER_EGG_COORDINATE,
            GameConfig::FINAL_BOSS_COORDINATE,
        ],
        root_seed,
    );
    GenContext::new(root_seed, highway, GridDimensions::new(50, 50))
}

#[test]
fn records_are_created_once_and_reused() {
    let config = GameConfig::new();
    let ctx = context(9);
    let mut rng = SeededRng::new(3);
    let mut ids = IdAllocator::new();
    let mut cache = WorldCache::new();
    let coordinate = Coordinate::new(1, 2);

    let enemies_before = {
        let record = cache.get_or_create(
            coordinate,
            &config,
            &ctx,
            Difficulty::Medium,
            &mut rng,
            &mut ids,
        );
        assert_eq!(record.clear_count, 0);
        assert_eq!(record.items.len(), config.initial_item_count);
        record.enemies.clone()
    };

    // Second access with live enemies must not regenerate anything.
    let record = cache.get_or_create(
        coordinate,
        &config,
        &ctx,
        Difficulty::Medium,
        &mut rng,
        &mut ids,
    );
    assert_eq!(record.enemies, enemies_before);
    assert_eq!(record.clear_count, 0);
}

#[test]
fn cleared_maps_refill_on_a_visit_and_ratchet_the_clear_count() {
    let config = GameConfig::new();
    let ctx = context(21);
    let mut rng = SeededRng::new(5);
    let mut ids = IdAllocator::new();
    let mut cache = WorldCache::new();
    let coordinate = Coordinate::new(3, 0);

    cache.visit(
        coordinate,
        &config,
        &ctx,
        Difficulty::Medium,
        &mut rng,
        &mut ids,
    );
    cache.record_mut(coordinate).enemies.clear();

    let record = cache.visit(
        coordinate,
        &config,
        &ctx,
        Difficulty::Medium,
        &mut rng,
        &mut ids,
    );
    assert!(!record.enemies.is_empty(), "garrison was not refilled");
    assert_eq!(record.clear_count, 1);

    // Clear again: the next refill draws from the bumped clear count.
    cache.record_mut(coordinate).enemies.clear();
    let record = cache.visit(
        coordinate,
        &config,
        &ctx,
        Difficulty::Medium,
        &mut rng,
        &mut ids,
    );
    assert!(!record.enemies.is_empty());
    assert_eq!(record.clear_count, 2);
}

#[test]
fn plain_access_leaves_a_cleared_room_empty() {
    let config = GameConfig::new();
    let ctx = context(17);
    let mut rng = SeededRng::new(2);
    let mut ids = IdAllocator::new();
    let mut cache = WorldCache::new();
    let coordinate = Coordinate::new(2, 2);

    cache.visit(
        coordinate,
        &config,
        &ctx,
        Difficulty::Medium,
        &mut rng,
        &mut ids,
    );
    cache.record_mut(coordinate).enemies.clear();

    // get_or_create is the per-frame path; it must never run the ratchet.
    for _ in 0..5 {
        let record = cache.get_or_create(
            coordinate,
            &config,
            &ctx,
            Difficulty::Medium,
            &mut rng,
            &mut ids,
        );
        assert!(record.enemies.is_empty(), "room refilled without a revisit");
        assert_eq!(record.clear_count, 0);
    }
}

#[test]
fn special_maps_stay_cleared() {
    let config = GameConfig::new();
    let ctx = context(13);
    let mut rng = SeededRng::new(8);
    let mut ids = IdAllocator::new();
    let mut cache = WorldCache::new();

    for coordinate in [
        GameConfig::START_COORDINATE,
        GameConfig::FINAL_BOSS_COORDINATE,
    ] {
        cache.visit(
            coordinate,
            &config,
            &ctx,
            Difficulty::Medium,
            &mut rng,
            &mut ids,
        );
        cache.record_mut(coordinate).enemies.clear();

        let record = cache.visit(
            coordinate,
            &config,
            &ctx,
            Difficulty::Medium,
            &mut rng,
            &mut ids,
        );
        assert!(record.enemies.is_empty(), "{coordinate} must not refill");
        assert_eq!(record.clear_count, 0);
    }
}

#[test]
#[should_panic(expected = "accessed before creation")]
fn reading_a_missing_record_is_a_programming_error() {
    let cache = WorldCache::new();
    let _ = cache.record(Coordinate::new(99, 99));
}
