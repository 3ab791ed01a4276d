use super::common::{ItemId, Vec2};

/// An item instance. Immutable after creation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub kind: ItemKind,
}

/// Item variants, matched exhaustively at pickup and loot-generation sites.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    /// Equippable weapon; replaces the current one only if strictly stronger.
    Weapon(WeaponData),
    /// Permanent stat boost, applied immediately on pickup.
    Upgrade(StatBoost),
    /// The flagged item that triggers the alternate ending when carried to
    /// the start coordinate.
    EasterEgg,
    /// Scripted container that substitutes a different item at pickup time
    /// instead of granting itself.
    GlitchedContainer,
}

/// Weapon-specific data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponData {
    pub damage: u32,
    pub effect: WeaponEffect,
}

/// Elemental flavor on a weapon. Cosmetic for now; collaborators may render
/// or voice it differently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponEffect {
    #[default]
    None,
    Fire,
    Ice,
}

/// Additive stat deltas granted by an upgrade item.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBoost {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    pub speed: f32,
}

/// An item lying on the ground at a world position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub item: Item,
    pub position: Vec2,
}
