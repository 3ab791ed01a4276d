//! Per-session cache of generated maps.
//!
//! Maps are built lazily on first visit and live for the whole session; there
//! is no eviction and no persistence. The cache also owns the
//! farm-difficulty ratchet: revisiting a cleared, non-special coordinate
//! refills its garrison at the current clear count and then bumps the count,
//! so repeated farming keeps getting harder.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use realms_core::{
    Coordinate, Difficulty, Enemy, GameConfig, GenContext, IdAllocator, Palette, PlacedItem,
    SeededRng, TileGrid, initial_items, populate_enemies, worldgen,
};

/// Everything the session knows about one generated map.
#[derive(Clone, Debug)]
pub struct WorldMapRecord {
    pub grid: TileGrid,
    pub palette: Palette,
    pub items: Vec<PlacedItem>,
    pub enemies: Vec<Enemy>,
    /// Times this map has been cleared and refilled.
    pub clear_count: u32,
}

/// Map records keyed by coordinate, exclusively owned by the session.
#[derive(Debug, Default)]
pub struct WorldCache {
    records: HashMap<Coordinate, WorldMapRecord>,
}

impl WorldCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.records.contains_key(&coordinate)
    }

    /// Returns the record for `coordinate`, building it on first access.
    ///
    /// Never repopulates: a cleared room stays cleared under plain access.
    /// The farm ratchet runs only through [`WorldCache::visit`].
    pub fn get_or_create(
        &mut self,
        coordinate: Coordinate,
        config: &GameConfig,
        ctx: &GenContext,
        difficulty: Difficulty,
        scatter_rng: &mut SeededRng,
        ids: &mut IdAllocator,
    ) -> &mut WorldMapRecord {
        match self.records.entry(coordinate) {
            Entry::Vacant(slot) => {
                let (grid, palette) = worldgen::generate(coordinate, ctx);
                let items = initial_items(
                    coordinate,
                    config.initial_item_count,
                    &grid,
                    scatter_rng,
                    ids,
                );
                let enemies =
                    populate_enemies(coordinate, &grid, difficulty, 0, ctx.root_seed, ids);
                tracing::debug!(
                    %coordinate,
                    enemies = enemies.len(),
                    items = items.len(),
                    "generated map"
                );
                slot.insert(WorldMapRecord {
                    grid,
                    palette,
                    items,
                    enemies,
                    clear_count: 0,
                })
            }
            Entry::Occupied(slot) => slot.into_mut(),
        }
    }

    /// Marks an arrival at `coordinate`, building the record when missing.
    ///
    /// Returning to a cleared non-special coordinate (neither the start nor
    /// the final-boss map) repopulates the enemy list at the current clear
    /// count, which is then incremented. Called once per map change, not per
    /// frame, so standing in a freshly cleared room never refills it.
    pub fn visit(
        &mut self,
        coordinate: Coordinate,
        config: &GameConfig,
        ctx: &GenContext,
        difficulty: Difficulty,
        scatter_rng: &mut SeededRng,
        ids: &mut IdAllocator,
    ) -> &mut WorldMapRecord {
        let record = self.get_or_create(coordinate, config, ctx, difficulty, scatter_rng, ids);
        let special = coordinate == GameConfig::START_COORDINATE
            || coordinate == GameConfig::FINAL_BOSS_COORDINATE;
        if record.enemies.is_empty() && !special {
            record.enemies = populate_enemies(
                coordinate,
                &record.grid,
                difficulty,
                record.clear_count,
                ctx.root_seed,
                ids,
            );
            record.clear_count += 1;
            tracing::debug!(
                %coordinate,
                clear_count = record.clear_count,
                enemies = record.enemies.len(),
                "repopulated cleared map"
            );
        }
        record
    }

    /// Read access to an existing record.
    ///
    /// # Panics
    ///
    /// Panics if the record has not been created yet; callers must go through
    /// [`WorldCache::get_or_create`] first. Hitting this is a programming
    /// error, not a recoverable condition.
    pub fn record(&self, coordinate: Coordinate) -> &WorldMapRecord {
        self.records
            .get(&coordinate)
            .unwrap_or_else(|| panic!("map record for {coordinate} accessed before creation"))
    }

    /// Mutable access to an existing record. Panics like [`WorldCache::record`].
    pub fn record_mut(&mut self, coordinate: Coordinate) -> &mut WorldMapRecord {
        self.records
            .get_mut(&coordinate)
            .unwrap_or_else(|| panic!("map record for {coordinate} accessed before creation"))
    }
}
