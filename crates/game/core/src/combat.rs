//! Damage calculation and application.
//!
//! No hit rolls, no resistances: contact combat resolves to a flat
//! attack-minus-defense exchange with a floor of 1, so even a hopelessly
//! outclassed attacker chips away.

/// Damage dealt for an attack.
///
/// `max(1, attack - defense)`.
pub fn damage(attack: u32, defense: u32) -> u32 {
    attack.saturating_sub(defense).max(1)
}

/// Applies damage to a health value, floored at zero.
pub fn apply_damage(current_health: u32, amount: u32) -> u32 {
    current_health.saturating_sub(amount)
}
