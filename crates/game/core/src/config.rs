use crate::state::Coordinate;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Map width/height in tiles. Every generated map shares one size.
    pub map_width_tiles: usize,
    pub map_height_tiles: usize,
    /// Number of items scattered across a freshly generated map.
    pub initial_item_count: usize,
}

impl GameConfig {
    // ===== fixed world geometry =====
    /// Side length of one tile in world units.
    pub const TILE_SIZE: f32 = 40.0;
    /// Player collision box side length in world units.
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Spawn offset from the entered edge after a map transition (two tiles).
    pub const SPAWN_MARGIN: f32 = Self::TILE_SIZE * 2.0;

    // ===== fixed world coordinates =====
    /// Coordinate the session starts at; its grid center is the spawn point.
    pub const START_COORDINATE: Coordinate = Coordinate::new(0, 0);
    /// Coordinate hosting the glitched container.
    pub const EASTER_EGG_COORDINATE: Coordinate = Coordinate::new(5, 5);
    /// Coordinate hosting the Rift Lord; defeating him wins the session.
    pub const FINAL_BOSS_COORDINATE: Coordinate = Coordinate::new(10, 10);

    // ===== simulation bounds =====
    /// Delta-time cap absorbing lag spikes (seconds).
    pub const MAX_DELTA_TIME: f32 = 1.0 / 30.0;
    /// Hard cap on enemies per map regardless of scaling.
    pub const MAX_ENEMIES: usize = 30;
    /// Per-entity-pair combat cooldown (seconds).
    pub const COMBAT_COOLDOWN: f64 = 1.0;
    /// Radius within which the player collects an item.
    pub const PICKUP_RADIUS: f32 = Self::PLAYER_SIZE * 0.75;
    /// Attempts budget for random Floor-tile sampling before falling back
    /// to the grid center.
    pub const SPAWN_SAMPLE_ATTEMPTS: usize = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_WIDTH_TILES: usize = 50;
    pub const DEFAULT_MAP_HEIGHT_TILES: usize = 50;
    pub const DEFAULT_INITIAL_ITEM_COUNT: usize = 20;

    pub fn new() -> Self {
        Self {
            map_width_tiles: Self::DEFAULT_MAP_WIDTH_TILES,
            map_height_tiles: Self::DEFAULT_MAP_HEIGHT_TILES,
            initial_item_count: Self::DEFAULT_INITIAL_ITEM_COUNT,
        }
    }

    /// Map width in world units.
    pub fn world_width(&self) -> f32 {
        self.map_width_tiles as f32 * Self::TILE_SIZE
    }

    /// Map height in world units.
    pub fn world_height(&self) -> f32 {
        self.map_height_tiles as f32 * Self::TILE_SIZE
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
