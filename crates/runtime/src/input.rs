//! Input resolution.
//!
//! Two channels feed the player's intended direction: a continuously updated
//! direction vector from discrete controls, and an absolute world-space move
//! target from pointer drag. Discrete input always wins and cancels the
//! target; the target clears itself on arrival.

use realms_core::Vec2;

/// Input state updated by the host between frames.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    direction: Vec2,
    move_target: Option<Vec2>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the discrete direction vector (zero when no key is held).
    pub fn set_direction(&mut self, direction: Vec2) {
        self.direction = direction;
    }

    /// Sets the absolute world-space steering target.
    pub fn set_move_target(&mut self, target: Vec2) {
        self.move_target = Some(target);
    }

    pub fn clear_move_target(&mut self) {
        self.move_target = None;
    }

    pub fn move_target(&self) -> Option<Vec2> {
        self.move_target
    }

    /// Resolves the intended unit direction for this frame.
    ///
    /// `travel` is the distance the player covers this frame; a move target
    /// within that distance counts as reached and is cleared.
    pub fn resolve(&mut self, position: Vec2, travel: f32) -> Vec2 {
        if !self.direction.is_zero() {
            self.move_target = None;
            return self.direction.normalized();
        }

        if let Some(target) = self.move_target {
            if position.distance(target) < travel {
                self.move_target = None;
                return Vec2::ZERO;
            }
            return (target - position).normalized();
        }

        Vec2::ZERO
    }
}
