//! Entity and item population for freshly generated (or re-cleared) maps.
mod difficulty;
mod enemies;
mod items;

pub use difficulty::{Difficulty, DifficultyMultipliers};
pub use enemies::{enemy_stream_seed, find_spawn_position, populate_enemies, random_appearance};
pub use items::{easter_egg_item, initial_items, loot_item};
