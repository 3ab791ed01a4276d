//! Tile grid, palette, and collision probing.
//!
//! The grid stores one [`Tile`] per cell in row-major order and is always
//! bordered by Wall tiles (exit openings excepted). Collision works on four
//! inset corner probes of an entity's box, which is what lets movement slide
//! along walls when only one axis is blocked.

use crate::config::GameConfig;
use crate::state::Vec2;

/// Canonical tile classes for generated maps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tile {
    Floor,
    Wall,
    Treasure,
    Exit,
}

impl Tile {
    pub fn is_passable(self) -> bool {
        !matches!(self, Tile::Wall)
    }
}

/// Map dimensions in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: usize,
    pub height: usize,
}

impl GridDimensions {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Floor and wall colors, chosen once per map from a fixed table.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    pub floor: String,
    pub wall: String,
}

/// Fixed-size 2D tile array, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Creates a grid filled with the given tile.
    pub fn filled(dimensions: GridDimensions, tile: Tile) -> Self {
        Self {
            width: dimensions.width,
            height: dimensions.height,
            tiles: vec![tile; dimensions.width * dimensions.height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Tile> {
        if x < self.width && y < self.height {
            Some(self.tiles[y * self.width + x])
        } else {
            None
        }
    }

    /// Sets a tile; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile;
        }
    }

    /// Tile under a world-space point, if the point is on the map.
    pub fn tile_at_world(&self, point: Vec2) -> Option<Tile> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let tile_x = (point.x / GameConfig::TILE_SIZE) as usize;
        let tile_y = (point.y / GameConfig::TILE_SIZE) as usize;
        self.get(tile_x, tile_y)
    }

    /// Whether an entity box at `position` (top-left corner) overlaps a Wall.
    ///
    /// Probes the four corners inset by two units. Points off the map do not
    /// count as collisions; leaving the grid is the transition logic's
    /// business, not the collider's.
    pub fn collides(&self, position: Vec2, size: f32) -> bool {
        let inset = 2.0;
        let probes = [
            Vec2::new(position.x + inset, position.y + inset),
            Vec2::new(position.x + size - inset, position.y + inset),
            Vec2::new(position.x + inset, position.y + size - inset),
            Vec2::new(position.x + size - inset, position.y + size - inset),
        ];
        probes
            .iter()
            .any(|probe| matches!(self.tile_at_world(*probe), Some(Tile::Wall)))
    }

    /// All Floor tile coordinates, scan order.
    pub fn floor_tiles(&self) -> Vec<(usize, usize)> {
        let mut floors = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) == Some(Tile::Floor) {
                    floors.push((x, y));
                }
            }
        }
        floors
    }

    /// Nearest non-Wall tile found by a bounded spiral search outward from
    /// `(tile_x, tile_y)`. Returns `None` when the search radius is
    /// exhausted; callers fall back to the grid center.
    pub fn nearest_open_tile(
        &self,
        tile_x: i64,
        tile_y: i64,
        max_radius: i64,
    ) -> Option<(usize, usize)> {
        for radius in 0..=max_radius {
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    // Ring only; the interior was covered at smaller radii.
                    if dx.abs() != radius && dy.abs() != radius {
                        continue;
                    }
                    let (x, y) = (tile_x + dx, tile_y + dy);
                    if x < 0 || y < 0 {
                        continue;
                    }
                    if let Some(tile) = self.get(x as usize, y as usize) {
                        if tile.is_passable() {
                            return Some((x as usize, y as usize));
                        }
                    }
                }
            }
        }
        None
    }

    /// World-space center of the grid.
    pub fn world_center(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * GameConfig::TILE_SIZE / 2.0,
            self.height as f32 * GameConfig::TILE_SIZE / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walled_grid() -> TileGrid {
        let mut grid = TileGrid::filled(GridDimensions::new(10, 10), Tile::Floor);
        for x in 0..10 {
            grid.set(x, 0, Tile::Wall);
            grid.set(x, 9, Tile::Wall);
        }
        for y in 0..10 {
            grid.set(0, y, Tile::Wall);
            grid.set(9, y, Tile::Wall);
        }
        grid
    }

    #[test]
    fn collision_probes_detect_walls() {
        let grid = walled_grid();
        // Box fully inside the floor area.
        assert!(!grid.collides(Vec2::new(80.0, 80.0), 40.0));
        // Box overlapping the west border wall.
        assert!(grid.collides(Vec2::new(10.0, 80.0), 40.0));
    }

    #[test]
    fn off_map_probes_do_not_collide() {
        let grid = walled_grid();
        assert!(!grid.collides(Vec2::new(-500.0, -500.0), 40.0));
    }

    #[test]
    fn spiral_search_finds_closest_floor() {
        let grid = walled_grid();
        // Start on the border wall; the nearest open tile is one step in.
        let found = grid.nearest_open_tile(0, 5, 8).unwrap();
        assert_eq!(grid.get(found.0, found.1), Some(Tile::Floor));
        assert_eq!(found, (1, 4));
    }

    #[test]
    fn spiral_search_respects_radius_bound() {
        let grid = TileGrid::filled(GridDimensions::new(10, 10), Tile::Wall);
        assert_eq!(grid.nearest_open_tile(5, 5, 8), None);
    }
}
