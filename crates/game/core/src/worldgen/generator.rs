//! Per-coordinate map generation.
//!
//! `generate` is pure and idempotent: identical inputs always yield an
//! identical grid and palette, so maps never need to be persisted: any
//! record can be rebuilt from its coordinate and the session's generation
//! context.

use super::highway::{HighwaySet, edge_key};
use super::layout;
use crate::config::GameConfig;
use crate::map::{GridDimensions, Palette, Tile, TileGrid};
use crate::rng::{SeededRng, local_seed};
use crate::state::{Coordinate, Direction};

/// Probability that a non-highway edge is open anyway.
const SIDE_PATH_CHANCE: f64 = 0.15;

/// Half-width of an exit opening; openings span `2 * EXIT_HALF_WIDTH + 1`
/// tiles centered on the edge midpoint.
const EXIT_HALF_WIDTH: i64 = 1;

/// Fixed palette table; the stream picks one entry per map.
const PALETTES: [(&str, &str); 7] = [
    ("#4a5568", "#2d3748"), // default gray
    ("#44403c", "#292524"), // stone
    ("#57534e", "#292524"), // dark stone
    ("#0c4a6e", "#1e3a8a"), // deep blue
    ("#3f6212", "#1a2e05"), // forest green
    ("#7c2d12", "#451a03"), // cavern brown
    ("#581c87", "#3b0764"), // amethyst
];

/// Everything map generation depends on besides the coordinate itself.
///
/// Threaded explicitly into every generator call; there is no process-wide
/// seed or highway singleton.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenContext {
    pub root_seed: u32,
    pub highway: HighwaySet,
    pub dimensions: GridDimensions,
}

impl GenContext {
    pub fn new(root_seed: u32, highway: HighwaySet, dimensions: GridDimensions) -> Self {
        Self {
            root_seed,
            highway,
            dimensions,
        }
    }
}

/// Generates the tile grid and palette for one coordinate.
pub fn generate(coordinate: Coordinate, ctx: &GenContext) -> (TileGrid, Palette) {
    let mut rng = SeededRng::new(local_seed(&coordinate.key(), ctx.root_seed));

    let (floor, wall) = *rng.pick(&PALETTES);
    let palette = Palette {
        floor: floor.to_owned(),
        wall: wall.to_owned(),
    };

    let mut grid = TileGrid::filled(ctx.dimensions, Tile::Floor);
    stamp_border(&mut grid);

    // One of four interior layout strategies, chosen by the stream.
    let layout_roll = rng.next_f64();
    if layout_roll < 0.25 {
        layout::sparse_obstacles(&mut grid, &mut rng);
    } else if layout_roll < 0.5 {
        layout::pillar_grid(&mut grid, &mut rng);
    } else if layout_roll < 0.75 {
        layout::dense_maze(&mut grid, &mut rng);
    } else {
        layout::inner_room(&mut grid, &mut rng);
    }

    layout::carve_guaranteed_paths(&mut grid, &mut rng);

    if coordinate == GameConfig::START_COORDINATE {
        clear_spawn_area(&mut grid);
    }

    carve_exits(coordinate, &mut grid, ctx);

    (grid, palette)
}

/// Open/closed decision for one edge of a coordinate.
///
/// Highway edges are always open. Everything else draws from a stream
/// seeded only by the shared edge key, so both neighbors independently
/// compute the same answer.
pub fn edge_open(coordinate: Coordinate, direction: Direction, ctx: &GenContext) -> bool {
    let neighbor = coordinate.neighbor(direction);
    let edge = edge_key(&coordinate.key(), &neighbor.key());
    if ctx.highway.contains(&edge) {
        return true;
    }

    // A horizontal edge belongs to the coordinate on its west side, a
    // vertical edge to the coordinate on its north side.
    let seed_key = match direction {
        Direction::East => format!("{},{}:h", coordinate.x, coordinate.y),
        Direction::West => format!("{},{}:h", coordinate.x - 1, coordinate.y),
        Direction::South => format!("{},{}:v", coordinate.x, coordinate.y),
        Direction::North => format!("{},{}:v", coordinate.x, coordinate.y - 1),
    };
    SeededRng::new(local_seed(&seed_key, ctx.root_seed)).chance(SIDE_PATH_CHANCE)
}

fn stamp_border(grid: &mut TileGrid) {
    let (width, height) = (grid.width(), grid.height());
    for x in 0..width {
        grid.set(x, 0, Tile::Wall);
        grid.set(x, height - 1, Tile::Wall);
    }
    for y in 0..height {
        grid.set(0, y, Tile::Wall);
        grid.set(width - 1, y, Tile::Wall);
    }
}

/// Forces a 5x5 Floor area around the grid center (spawn safety at the
/// start coordinate).
fn clear_spawn_area(grid: &mut TileGrid) {
    let mid_x = (grid.width() / 2) as i64;
    let mid_y = (grid.height() / 2) as i64;
    for y in mid_y - 2..=mid_y + 2 {
        for x in mid_x - 2..=mid_x + 2 {
            if x > 0 && (x as usize) < grid.width() - 1 && y > 0 && (y as usize) < grid.height() - 1
            {
                grid.set(x as usize, y as usize, Tile::Floor);
            }
        }
    }
}

/// Carves or seals the four boundary exits per the gating decision.
fn carve_exits(coordinate: Coordinate, grid: &mut TileGrid, ctx: &GenContext) {
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let mid_x = width / 2;
    let mid_y = height / 2;

    for direction in Direction::ALL {
        let tile = if edge_open(coordinate, direction, ctx) {
            Tile::Floor
        } else {
            Tile::Wall
        };
        for offset in -EXIT_HALF_WIDTH..=EXIT_HALF_WIDTH {
            let (x, y) = match direction {
                Direction::North => (mid_x + offset, 0),
                Direction::South => (mid_x + offset, height - 1),
                Direction::West => (0, mid_y + offset),
                Direction::East => (width - 1, mid_y + offset),
            };
            grid.set(x as usize, y as usize, tile);
        }
    }
}
