//! Item generation and initial scatter.
//!
//! Unlike tiles and enemies, the initial scatter is fed an externally seeded
//! stream (the session seeds it from entropy), so item layout is not
//! reproducible across re-generation of the same coordinate. That asymmetry
//! is inherited behavior and deliberately left uncorrected.

use crate::config::GameConfig;
use crate::map::TileGrid;
use crate::rng::SeededRng;
use crate::state::{
    Coordinate, IdAllocator, Item, ItemKind, PlacedItem, StatBoost, Vec2, WeaponData, WeaponEffect,
};

const WEAPON_PREFIXES: [&str; 6] = ["Ancient", "Glowing", "Cursed", "Mighty", "Swift", "Jagged"];
const WEAPON_BASES: [&str; 5] = ["Sword", "Axe", "Dagger", "Mace", "Spear"];
const WEAPON_SUFFIXES: [&str; 4] = ["of Fire", "of the Deep", "of Swiftness", "of Doom"];
const UPGRADE_PREFIXES: [&str; 4] = ["Shard", "Talisman", "Idol", "Relic"];
const UPGRADE_SUFFIXES: [&str; 4] = ["of Power", "of Fortitude", "of Agility", "of Vigor"];

/// Stat-boost magnitude and weapon damage scale up by this much on boss
/// drops.
const BOSS_DROP_SCALE: f64 = 1.5;

/// Scatters the initial items for a freshly generated map.
///
/// Floor tiles are shuffled (Fisher-Yates) and the first `count` become
/// distinct spawn tiles, so items never stack on one tile. At the
/// easter-egg coordinate one extra reserved tile hosts the glitched
/// container.
pub fn initial_items(
    coordinate: Coordinate,
    count: usize,
    grid: &TileGrid,
    rng: &mut SeededRng,
    ids: &mut IdAllocator,
) -> Vec<PlacedItem> {
    let mut tiles = grid.floor_tiles();
    shuffle(&mut tiles, rng);

    let mut placed: Vec<PlacedItem> = tiles
        .iter()
        .take(count)
        .map(|&(tile_x, tile_y)| PlacedItem {
            item: loot_item(false, rng, ids),
            position: tile_position(tile_x, tile_y, rng),
        })
        .collect();

    if coordinate == GameConfig::EASTER_EGG_COORDINATE {
        if let Some(&(tile_x, tile_y)) = tiles.get(count) {
            placed.push(PlacedItem {
                item: glitched_container(ids),
                position: tile_position(tile_x, tile_y, rng),
            });
        }
    }

    placed
}

/// Generates a random weapon or upgrade, 50/50.
pub fn loot_item(boss_drop: bool, rng: &mut SeededRng, ids: &mut IdAllocator) -> Item {
    if rng.chance(0.5) {
        weapon(boss_drop, rng, ids)
    } else {
        upgrade(boss_drop, rng, ids)
    }
}

/// The flagged item substituted when the glitched container is opened.
pub fn easter_egg_item(ids: &mut IdAllocator) -> Item {
    Item {
        id: ids.item(),
        name: "Pixel of Origin".to_owned(),
        description: "A tiny, shimmering dot. Feels important. Take it to 0,0.".to_owned(),
        kind: ItemKind::EasterEgg,
    }
}

fn weapon(boss_drop: bool, rng: &mut SeededRng, ids: &mut IdAllocator) -> Item {
    let name = format!(
        "{} {} {}",
        rng.pick(&WEAPON_PREFIXES),
        rng.pick(&WEAPON_BASES),
        rng.pick(&WEAPON_SUFFIXES)
    );
    let mut damage = 5 + rng.next_below(20) as u32;
    if boss_drop {
        damage = (damage as f64 * BOSS_DROP_SCALE).round() as u32;
    }
    let effects = [WeaponEffect::None, WeaponEffect::Fire, WeaponEffect::Ice];
    Item {
        id: ids.item(),
        description: format!("A powerful weapon dealing {damage} damage."),
        name,
        kind: ItemKind::Weapon(WeaponData {
            damage,
            effect: *rng.pick(&effects),
        }),
    }
}

fn upgrade(boss_drop: bool, rng: &mut SeededRng, ids: &mut IdAllocator) -> Item {
    let name = format!(
        "{} {}",
        rng.pick(&UPGRADE_PREFIXES),
        rng.pick(&UPGRADE_SUFFIXES)
    );
    let scale = if boss_drop { BOSS_DROP_SCALE } else { 1.0 };

    let mut boost = StatBoost::default();
    let (stat_name, amount) = match rng.next_below(4) {
        0 => {
            boost.attack = scaled(2 + rng.next_below(4) as u32, scale);
            ("attack", boost.attack)
        }
        1 => {
            boost.defense = scaled(2 + rng.next_below(4) as u32, scale);
            ("defense", boost.defense)
        }
        2 => {
            boost.speed = (30.0 * scale) as f32;
            ("speed", boost.speed as u32)
        }
        _ => {
            boost.max_health = scaled(10 + rng.next_below(11) as u32, scale);
            ("max health", boost.max_health)
        }
    };

    Item {
        id: ids.item(),
        description: format!("Grants a permanent +{amount} to {stat_name}."),
        name,
        kind: ItemKind::Upgrade(boost),
    }
}

fn glitched_container(ids: &mut IdAllocator) -> Item {
    Item {
        id: ids.item(),
        name: "?????".to_owned(),
        description: "It flickers in and out of existence.".to_owned(),
        kind: ItemKind::GlitchedContainer,
    }
}

fn scaled(value: u32, scale: f64) -> u32 {
    (value as f64 * scale).round() as u32
}

fn tile_position(tile_x: usize, tile_y: usize, rng: &mut SeededRng) -> Vec2 {
    Vec2::new(
        tile_x as f32 * GameConfig::TILE_SIZE
            + (rng.next_f64() as f32) * GameConfig::TILE_SIZE / 2.0,
        tile_y as f32 * GameConfig::TILE_SIZE
            + (rng.next_f64() as f32) * GameConfig::TILE_SIZE / 2.0,
    )
}

fn shuffle<T>(items: &mut [T], rng: &mut SeededRng) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{GridDimensions, Tile};

    fn open_grid() -> TileGrid {
        let mut grid = TileGrid::filled(GridDimensions::new(20, 20), Tile::Floor);
        for x in 0..20 {
            grid.set(x, 0, Tile::Wall);
            grid.set(x, 19, Tile::Wall);
        }
        for y in 0..20 {
            grid.set(0, y, Tile::Wall);
            grid.set(19, y, Tile::Wall);
        }
        grid
    }

    #[test]
    fn scatter_uses_distinct_tiles() {
        let grid = open_grid();
        let mut rng = SeededRng::new(8);
        let mut ids = IdAllocator::new();
        let placed = initial_items(Coordinate::new(0, 0), 15, &grid, &mut rng, &mut ids);
        assert_eq!(placed.len(), 15);

        let mut tiles: Vec<(u32, u32)> = placed
            .iter()
            .map(|placed| {
                (
                    (placed.position.x / GameConfig::TILE_SIZE) as u32,
                    (placed.position.y / GameConfig::TILE_SIZE) as u32,
                )
            })
            .collect();
        tiles.sort_unstable();
        tiles.dedup();
        assert_eq!(tiles.len(), 15, "items overlapped on a tile");
    }

    #[test]
    fn item_ids_are_unique() {
        let grid = open_grid();
        let mut rng = SeededRng::new(21);
        let mut ids = IdAllocator::new();
        let placed = initial_items(Coordinate::new(1, 1), 10, &grid, &mut rng, &mut ids);
        let mut seen: Vec<_> = placed.iter().map(|placed| placed.item.id).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn easter_egg_coordinate_gets_the_container() {
        let grid = open_grid();
        let mut rng = SeededRng::new(4);
        let mut ids = IdAllocator::new();
        let placed = initial_items(
            GameConfig::EASTER_EGG_COORDINATE,
            5,
            &grid,
            &mut rng,
            &mut ids,
        );
        assert_eq!(placed.len(), 6);
        assert_eq!(
            placed
                .iter()
                .filter(|placed| placed.item.kind == ItemKind::GlitchedContainer)
                .count(),
            1
        );
    }

    #[test]
    fn elsewhere_no_container_spawns() {
        let grid = open_grid();
        let mut rng = SeededRng::new(4);
        let mut ids = IdAllocator::new();
        let placed = initial_items(Coordinate::new(5, 6), 5, &grid, &mut rng, &mut ids);
        assert!(
            placed
                .iter()
                .all(|placed| placed.item.kind != ItemKind::GlitchedContainer)
        );
    }

    #[test]
    fn boss_drops_are_stronger() {
        // Compare the same stream with and without the boss flag.
        let mut ids = IdAllocator::new();
        for seed in 0..20 {
            let mut rng_a = SeededRng::new(seed);
            let mut rng_b = SeededRng::new(seed);
            let normal = loot_item(false, &mut rng_a, &mut ids);
            let boosted = loot_item(true, &mut rng_b, &mut ids);
            match (&normal.kind, &boosted.kind) {
                (ItemKind::Weapon(a), ItemKind::Weapon(b)) => {
                    assert_eq!(b.damage, (a.damage as f64 * 1.5).round() as u32);
                }
                (ItemKind::Upgrade(a), ItemKind::Upgrade(b)) => {
                    assert!(
                        b.max_health >= a.max_health
                            && b.attack >= a.attack
                            && b.defense >= a.defense
                            && b.speed >= a.speed
                    );
                }
                _ => unreachable!("flag must not change the item variant"),
            }
        }
    }
}
