//! Difficulty tiers and their stat/count multiplier table.

/// Session difficulty, chosen once at the menu and fixed for the session.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    /// A relaxing adventure.
    Easy,
    /// A balanced challenge.
    #[default]
    Medium,
    /// For seasoned adventurers.
    Hard,
    /// You will not survive.
    Impossible,
    /// Unleash your power.
    GodMode,
}

/// Per-stat and enemy-count multipliers applied on top of distance and
/// clear-count scaling.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyMultipliers {
    pub health: f64,
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub enemy_count: f64,
}

impl Difficulty {
    /// Multiplier table. Attack spans 0.05x (god mode) to 1.0x
    /// (impossible); medium is the 1.0x baseline for enemy count.
    pub fn multipliers(self) -> DifficultyMultipliers {
        match self {
            Difficulty::GodMode => DifficultyMultipliers {
                health: 0.3,
                attack: 0.05,
                defense: 0.2,
                speed: 0.7,
                enemy_count: 0.5,
            },
            Difficulty::Easy => DifficultyMultipliers {
                health: 0.6,
                attack: 0.25,
                defense: 0.5,
                speed: 0.85,
                enemy_count: 0.75,
            },
            Difficulty::Medium => DifficultyMultipliers {
                health: 0.85,
                attack: 0.6,
                defense: 0.8,
                speed: 1.0,
                enemy_count: 1.0,
            },
            Difficulty::Hard => DifficultyMultipliers {
                health: 1.0,
                attack: 0.8,
                defense: 1.0,
                speed: 1.05,
                enemy_count: 1.2,
            },
            Difficulty::Impossible => DifficultyMultipliers {
                health: 1.25,
                attack: 1.0,
                defense: 1.2,
                speed: 1.1,
                enemy_count: 1.5,
            },
        }
    }
}
