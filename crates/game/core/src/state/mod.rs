//! Canonical data model: identifiers, geometry, entities, and items.
//!
//! These types describe everything the simulation tracks per session. The
//! runtime layer owns and mutates instances of them; generation code in this
//! crate only produces them.
mod actor;
mod common;
mod item;

pub use actor::{Appearance, BodyShape, Enemy, EnemyRank, EquippedWeapon, Player, Stats};
pub use common::{Coordinate, Direction, EntityId, IdAllocator, ItemId, Vec2};
pub use item::{Item, ItemKind, PlacedItem, StatBoost, WeaponData, WeaponEffect};
