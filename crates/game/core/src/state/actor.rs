use super::common::{EntityId, Vec2};
use super::item::{Item, WeaponData, WeaponEffect};

/// Combat and mobility stats shared by the player and enemies.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub max_health: u32,
    pub attack: u32,
    pub defense: u32,
    /// Movement speed in world units per second.
    pub speed: f32,
}

/// Cosmetic sprite data consumed by the rendering collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Appearance {
    pub body_color: String,
    pub eye_color: String,
    pub body_shape: BodyShape,
    pub eye_shape: BodyShape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyShape {
    Circle,
    Square,
}

/// The controllable character.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: EntityId,
    pub appearance: Appearance,
    pub stats: Stats,
    pub current_health: u32,
    /// Top-left corner of the collision box, world units.
    pub position: Vec2,
    pub inventory: Vec<Item>,
    pub equipped_weapon: Option<EquippedWeapon>,
}

impl Player {
    /// Effective attack including the equipped weapon's damage bonus.
    pub fn effective_attack(&self) -> u32 {
        self.stats.attack
            + self
                .equipped_weapon
                .as_ref()
                .map_or(0, |weapon| weapon.damage)
    }
}

/// Weapon currently wielded by the player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippedWeapon {
    pub name: String,
    pub damage: u32,
    pub effect: WeaponEffect,
}

impl EquippedWeapon {
    pub fn from_weapon(name: &str, data: WeaponData) -> Self {
        Self {
            name: name.to_owned(),
            damage: data.damage,
            effect: data.effect,
        }
    }
}

/// A hostile entity on the current map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    pub id: EntityId,
    pub appearance: Appearance,
    pub stats: Stats,
    pub current_health: u32,
    /// Top-left corner of the collision box, world units.
    pub position: Vec2,
    /// Collision box side length in world units.
    pub size: f32,
    /// Distance at which the enemy starts steering toward the player.
    pub detection_range: f32,
    pub rank: EnemyRank,
}

impl Enemy {
    pub fn is_boss(&self) -> bool {
        !matches!(self.rank, EnemyRank::Regular)
    }
}

/// Enemy tier; bosses always drop loot and the Rift Lord ends the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyRank {
    Regular,
    Boss,
    RiftLord,
}
