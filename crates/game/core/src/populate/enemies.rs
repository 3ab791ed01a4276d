//! Enemy population.
//!
//! Regular enemies scale with Manhattan distance from the start coordinate,
//! with the room's clear count (the farming ratchet), and with the session
//! difficulty. The final-boss coordinate is special-cased: it holds exactly
//! one Rift Lord and nothing else.
//!
//! Population is seeded from the coordinate key and clear count, so a given
//! room rolls the same garrison for the same visit.

use super::difficulty::Difficulty;
use crate::config::GameConfig;
use crate::map::{Tile, TileGrid};
use crate::rng::{SeededRng, local_seed};
use crate::state::{Appearance, BodyShape, Coordinate, Enemy, EnemyRank, IdAllocator, Stats, Vec2};

/// Cosmetic body color table shared by regular enemies.
const BODY_COLORS: [&str; 7] = [
    "#ef4444", "#f97316", "#84cc16", "#22c55e", "#06b6d4", "#8b5cf6", "#ec4899",
];

/// Seed for a coordinate's enemy stream at a given clear count.
pub fn enemy_stream_seed(coordinate: Coordinate, clear_count: u32, root_seed: u32) -> u32 {
    local_seed(
        &format!("{}:enemies:{clear_count}", coordinate.key()),
        root_seed,
    )
}

/// Populates a map's enemy list.
pub fn populate_enemies(
    coordinate: Coordinate,
    grid: &TileGrid,
    difficulty: Difficulty,
    clear_count: u32,
    root_seed: u32,
    ids: &mut IdAllocator,
) -> Vec<Enemy> {
    let mut rng = SeededRng::new(enemy_stream_seed(coordinate, clear_count, root_seed));
    let mut enemies = Vec::new();

    if coordinate == GameConfig::FINAL_BOSS_COORDINATE {
        let position = find_spawn_position(grid, &mut rng);
        enemies.push(rift_lord(position, ids));
        return enemies;
    }

    let distance = coordinate.manhattan(GameConfig::START_COORDINATE);
    let multipliers = difficulty.multipliers();
    let clear_factor = 1.3f64.powi(clear_count as i32);
    let count_factor = 1.12f64.powi(distance as i32);

    let mut enemy_count = (((6.0 + rng.next_f64() * 4.0) * count_factor * clear_factor)
        * multipliers.enemy_count)
        .floor()
        .min(GameConfig::MAX_ENEMIES as f64) as i64;

    // A secondary boss is worth roughly four regular enemies.
    let boss_chance = 0.15 + (distance as f64 * 0.02).min(0.35);
    if distance > 3 && rng.chance(boss_chance) {
        let position = find_spawn_position(grid, &mut rng);
        enemies.push(secondary_boss(position, &mut rng, ids));
        enemy_count -= 4;
    }

    for _ in 0..enemy_count.max(0) {
        let position = find_spawn_position(grid, &mut rng);
        enemies.push(regular_enemy(
            position,
            distance,
            clear_factor,
            multipliers,
            &mut rng,
            ids,
        ));
    }

    enemies
}

/// Rejection-samples a random Floor tile, falling back to the grid center
/// when the attempt budget runs out.
pub fn find_spawn_position(grid: &TileGrid, rng: &mut SeededRng) -> Vec2 {
    for _ in 0..GameConfig::SPAWN_SAMPLE_ATTEMPTS {
        let tile_x = rng.next_below(grid.width());
        let tile_y = rng.next_below(grid.height());
        if grid.get(tile_x, tile_y) == Some(Tile::Floor) {
            return Vec2::new(
                tile_x as f32 * GameConfig::TILE_SIZE
                    + (rng.next_f64() as f32) * GameConfig::TILE_SIZE / 2.0,
                tile_y as f32 * GameConfig::TILE_SIZE
                    + (rng.next_f64() as f32) * GameConfig::TILE_SIZE / 2.0,
            );
        }
    }
    grid.world_center()
}

fn regular_enemy(
    position: Vec2,
    distance: u32,
    clear_factor: f64,
    multipliers: super::DifficultyMultipliers,
    rng: &mut SeededRng,
    ids: &mut IdAllocator,
) -> Enemy {
    let distance_factor = 1.18f64.powi(distance as i32);
    let mobility_factor = 1.10f64.powi(distance as i32);
    let combat_scaling = distance_factor * clear_factor * rng.range_f64(0.9, 1.1);
    let mobility_scaling = mobility_factor * rng.range_f64(0.9, 1.1);

    let base_max_health = 40.0 + rng.next_below(15) as f64;
    let base_attack = 10.0 + rng.next_below(4) as f64;
    let base_defense = 2.0 + rng.next_below(3) as f64;
    let base_speed = 80.0 + rng.next_f64() * 20.0;

    let stats = Stats {
        max_health: (base_max_health * combat_scaling * multipliers.health).round() as u32,
        attack: (base_attack * combat_scaling * multipliers.attack).round() as u32,
        defense: (base_defense * combat_scaling * multipliers.defense).round() as u32,
        speed: (base_speed * mobility_scaling * multipliers.speed).round() as f32,
    };
    let stats = Stats {
        max_health: stats.max_health.max(20),
        attack: stats.attack.max(5),
        defense: stats.defense.max(1),
        speed: stats.speed,
    };

    Enemy {
        id: ids.entity(),
        appearance: random_appearance(rng),
        current_health: stats.max_health,
        stats,
        position,
        size: GameConfig::TILE_SIZE,
        detection_range: (400.0 * mobility_factor as f32).min(1200.0),
        rank: EnemyRank::Regular,
    }
}

fn secondary_boss(position: Vec2, rng: &mut SeededRng, ids: &mut IdAllocator) -> Enemy {
    let stats = Stats {
        max_health: 300 + rng.next_below(100) as u32,
        attack: 40 + rng.next_below(20) as u32,
        defense: 16 + rng.next_below(10) as u32,
        speed: (60.0 + rng.next_f64() * 30.0) as f32,
    };
    let mut appearance = random_appearance(rng);
    appearance.body_color = "#a855f7".to_owned();

    Enemy {
        id: ids.entity(),
        appearance,
        current_health: stats.max_health,
        stats,
        position,
        size: GameConfig::TILE_SIZE * 1.8,
        detection_range: 600.0,
        rank: EnemyRank::Boss,
    }
}

fn rift_lord(position: Vec2, ids: &mut IdAllocator) -> Enemy {
    let stats = Stats {
        max_health: 3000,
        attack: 80,
        defense: 40,
        speed: 90.0,
    };
    Enemy {
        id: ids.entity(),
        appearance: Appearance {
            body_color: "#be123c".to_owned(),
            eye_color: "#fefce8".to_owned(),
            body_shape: BodyShape::Square,
            eye_shape: BodyShape::Square,
        },
        current_health: stats.max_health,
        stats,
        position,
        size: GameConfig::TILE_SIZE * 2.5,
        detection_range: 1200.0,
        rank: EnemyRank::RiftLord,
    }
}

/// Random cosmetic sprite data from the shared color and shape tables. Also
/// used for the player at session start.
pub fn random_appearance(rng: &mut SeededRng) -> Appearance {
    let shapes = [BodyShape::Circle, BodyShape::Square];
    Appearance {
        body_color: (*rng.pick(&BODY_COLORS)).to_owned(),
        eye_color: "#FFFFFF".to_owned(),
        body_shape: *rng.pick(&shapes),
        eye_shape: *rng.pick(&shapes),
    }
}
