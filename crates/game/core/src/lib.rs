//! Deterministic world generation and game logic shared across clients.
//!
//! `realms-core` defines the canonical rules of the infinite maze world: the
//! seeded PRNG and string hashing that make every map reproducible, the
//! highway planner that guarantees reachability to the objective coordinates,
//! the per-coordinate map generator, the enemy and item populators, and the
//! combat math. Everything here is a pure function of its inputs; session
//! state, clocks, and the frame loop live in the runtime crate.
pub mod combat;
pub mod config;
pub mod map;
pub mod populate;
pub mod rng;
pub mod state;
pub mod worldgen;

pub use combat::{apply_damage, damage};
pub use config::GameConfig;
pub use map::{GridDimensions, Palette, Tile, TileGrid};
pub use populate::{
    Difficulty, DifficultyMultipliers, initial_items, loot_item, populate_enemies,
};
pub use rng::{SeededRng, hash_key, local_seed};
pub use state::{
    Appearance, BodyShape, Coordinate, Direction, Enemy, EnemyRank, EntityId, EquippedWeapon,
    IdAllocator, Item, ItemId, ItemKind, PlacedItem, Player, StatBoost, Stats, Vec2, WeaponData,
    WeaponEffect,
};
pub use worldgen::{GenContext, HighwaySet, edge_open, generate, plan_highway};
