//! Interior layout strategies.
//!
//! Each strategy fills the interior of a bordered, all-Floor grid with a
//! different obstacle pattern. None of them is responsible for keeping the
//! map traversable; the generator's guaranteed-connectivity carve runs after
//! the strategy and neutralizes any disconnection it caused.

use crate::map::{Tile, TileGrid};
use crate::rng::SeededRng;

/// Sparse random obstacles, about one interior tile in ten.
pub fn sparse_obstacles(grid: &mut TileGrid, rng: &mut SeededRng) {
    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            if rng.chance(0.1) {
                grid.set(x, y, Tile::Wall);
            }
        }
    }
}

/// Regular pillar grid with random gaps.
pub fn pillar_grid(grid: &mut TileGrid, rng: &mut SeededRng) {
    let spacing = 4 + rng.next_below(3);
    let mut y = spacing;
    while y < grid.height().saturating_sub(spacing) {
        let mut x = spacing;
        while x < grid.width().saturating_sub(spacing) {
            if rng.next_f64() > 0.3 {
                grid.set(x, y, Tile::Wall);
            }
            x += spacing;
        }
        y += spacing;
    }
}

/// Dense random maze, about one interior tile in three.
pub fn dense_maze(grid: &mut TileGrid, rng: &mut SeededRng) {
    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            if rng.chance(0.35) {
                grid.set(x, y, Tile::Wall);
            }
        }
    }
}

/// Single rectangular room in an otherwise solid interior.
pub fn inner_room(grid: &mut TileGrid, rng: &mut SeededRng) {
    let room_width = 8 + rng.next_below(10);
    let room_height = 8 + rng.next_below(10);
    let x_span = grid.width().saturating_sub(room_width + 10).max(1);
    let y_span = grid.height().saturating_sub(room_height + 10).max(1);
    let room_x = 5 + rng.next_below(x_span);
    let room_y = 5 + rng.next_below(y_span);

    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            grid.set(x, y, Tile::Wall);
        }
    }
    for y in room_y..room_y + room_height {
        for x in room_x..room_x + room_width {
            grid.set(x, y, Tile::Floor);
        }
    }
}

/// Carves Floor from the grid center toward each of the four edge midpoints
/// with a jittered brush, guaranteeing the center can reach every exit
/// regardless of the layout strategy's obstacles.
pub fn carve_guaranteed_paths(grid: &mut TileGrid, rng: &mut SeededRng) {
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    let mid_x = width / 2;
    let mid_y = height / 2;

    let targets = [
        (mid_x, 1),          // north
        (mid_x, height - 2), // south
        (1, mid_y),          // west
        (width - 2, mid_y),  // east
    ];

    for (target_x, target_y) in targets {
        let mut x = mid_x;
        let mut y = mid_y;
        let mut brush = 1 + rng.next_below(5);

        // Loop guard: any center-to-edge walk fits well within this.
        for _ in 0..(width + height) * 2 {
            if x == target_x && y == target_y {
                break;
            }
            if rng.chance(0.1) {
                brush = 1 + rng.next_below(5);
            }
            carve_brush(grid, x, y, brush);

            let dx = (target_x - x).signum();
            let dy = (target_y - y).signum();
            let roll = rng.next_f64();
            if dx != 0 && dy != 0 {
                if roll < 0.5 {
                    x += dx;
                } else {
                    y += dy;
                }
            } else if dx != 0 {
                if roll < 0.8 {
                    x += dx;
                } else {
                    y += if rng.chance(0.5) { 1 } else { -1 };
                }
            } else if dy != 0 {
                if roll < 0.8 {
                    y += dy;
                } else {
                    x += if rng.chance(0.5) { 1 } else { -1 };
                }
            }

            x = x.clamp(1, width - 2);
            y = y.clamp(1, height - 2);
        }
        carve_brush(grid, target_x, target_y, brush);
    }
}

/// Paints a square brush of Floor centered on `(x, y)`, clipped to the
/// interior so the border walls survive.
fn carve_brush(grid: &mut TileGrid, x: i64, y: i64, brush: usize) {
    let offset = (brush / 2) as i64;
    let width = grid.width() as i64;
    let height = grid.height() as i64;
    for j in -offset..=offset {
        for i in -offset..=offset {
            let carve_x = x + i;
            let carve_y = y + j;
            if carve_x > 0 && carve_x < width - 1 && carve_y > 0 && carve_y < height - 1 {
                grid.set(carve_x as usize, carve_y as usize, Tile::Floor);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::GridDimensions;

    fn bordered_floor(width: usize, height: usize) -> TileGrid {
        let mut grid = TileGrid::filled(GridDimensions::new(width, height), Tile::Floor);
        for x in 0..width {
            grid.set(x, 0, Tile::Wall);
            grid.set(x, height - 1, Tile::Wall);
        }
        for y in 0..height {
            grid.set(0, y, Tile::Wall);
            grid.set(width - 1, y, Tile::Wall);
        }
        grid
    }

    #[test]
    fn strategies_leave_border_intact() {
        for strategy in [
            sparse_obstacles,
            pillar_grid,
            dense_maze,
            inner_room,
            carve_guaranteed_paths,
        ] {
            let mut grid = bordered_floor(50, 50);
            let mut rng = SeededRng::new(7);
            strategy(&mut grid, &mut rng);
            for x in 0..50 {
                assert_eq!(grid.get(x, 0), Some(Tile::Wall));
                assert_eq!(grid.get(x, 49), Some(Tile::Wall));
            }
            for y in 0..50 {
                assert_eq!(grid.get(0, y), Some(Tile::Wall));
                assert_eq!(grid.get(49, y), Some(Tile::Wall));
            }
        }
    }

    #[test]
    fn inner_room_keeps_a_floor_pocket() {
        let mut grid = bordered_floor(50, 50);
        let mut rng = SeededRng::new(11);
        inner_room(&mut grid, &mut rng);
        let floors = grid.floor_tiles().len();
        // The room is at least 8x8.
        assert!(floors >= 64);
    }

    #[test]
    fn carve_connects_center_to_edge_midpoints() {
        // Worst case: start from a fully walled interior.
        let mut grid = bordered_floor(50, 50);
        let mut rng = SeededRng::new(3);
        inner_room(&mut grid, &mut rng);
        carve_guaranteed_paths(&mut grid, &mut rng);

        // Flood fill from the center and check the tiles adjacent to each
        // edge midpoint are reached.
        let mut seen = vec![false; 50 * 50];
        let mut stack = vec![(25usize, 25usize)];
        seen[25 * 50 + 25] = true;
        while let Some((x, y)) = stack.pop() {
            for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if grid.get(nx, ny) == Some(Tile::Floor) && !seen[ny * 50 + nx] {
                    seen[ny * 50 + nx] = true;
                    stack.push((nx, ny));
                }
            }
        }
        for (x, y) in [(25, 1), (25, 48), (1, 25), (48, 25)] {
            assert!(seen[y * 50 + x], "edge midpoint ({x},{y}) unreachable");
        }
    }
}
