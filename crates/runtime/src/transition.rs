//! Map transition state machine.
//!
//! Idle → Active(progress 0→1) → Idle. The simulation is fully paused while a
//! transition is active; only progress advances. The coordinate switch itself
//! happens exactly once, at the midpoint, latched by `midpoint_reached` so a
//! frame landing past 0.5 twice cannot commit twice.

use serde::{Deserialize, Serialize};

use realms_core::{Coordinate, Vec2};

use crate::error::TransitionError;

/// Visual style of a transition; the zoom runs longer than the cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    Fade,
    Iris,
    Zoom,
}

impl TransitionKind {
    pub const ALL: [TransitionKind; 3] = [
        TransitionKind::Fade,
        TransitionKind::Iris,
        TransitionKind::Zoom,
    ];

    /// Total duration in seconds.
    pub fn duration(self) -> f32 {
        match self {
            TransitionKind::Fade | TransitionKind::Iris => 0.6,
            TransitionKind::Zoom => 1.1,
        }
    }
}

/// Where the player ends up once the midpoint commits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingArrival {
    pub coordinate: Coordinate,
    pub spawn: Vec2,
}

/// Read-only view of the running transition for the render snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionView {
    pub kind: TransitionKind,
    /// 0.0 at request time, 1.0 at completion.
    pub progress: f32,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    kind: TransitionKind,
    arrival: PendingArrival,
    elapsed: f32,
    midpoint_reached: bool,
}

/// What one tick of the controller produced.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransitionTick {
    /// Set exactly once per transition, when progress first reaches 0.5.
    pub midpoint: Option<PendingArrival>,
    pub finished: bool,
}

/// Owns the Idle/Active state and the midpoint latch.
#[derive(Debug, Default, Clone)]
pub struct TransitionController {
    active: Option<ActiveTransition>,
}

impl TransitionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Starts a transition toward `arrival`. Rejected while one is running,
    /// which is what stops a player hovering on a boundary from stacking
    /// crossings.
    pub fn request(
        &mut self,
        kind: TransitionKind,
        arrival: PendingArrival,
    ) -> Result<(), TransitionError> {
        if self.active.is_some() {
            return Err(TransitionError::AlreadyActive);
        }
        self.active = Some(ActiveTransition {
            kind,
            arrival,
            elapsed: 0.0,
            midpoint_reached: false,
        });
        Ok(())
    }

    /// Advances progress by real elapsed time (not the clamped simulation
    /// delta) and reports the midpoint commit and completion.
    pub fn advance(&mut self, dt: f32) -> TransitionTick {
        let Some(active) = self.active.as_mut() else {
            return TransitionTick::default();
        };

        active.elapsed += dt;
        let progress = active.elapsed / active.kind.duration();

        let mut tick = TransitionTick::default();
        if progress >= 0.5 && !active.midpoint_reached {
            active.midpoint_reached = true;
            tick.midpoint = Some(active.arrival);
        }
        if progress >= 1.0 {
            tick.finished = true;
            self.active = None;
        }
        tick
    }

    pub fn view(&self) -> Option<TransitionView> {
        self.active.as_ref().map(|active| TransitionView {
            kind: active.kind,
            progress: (active.elapsed / active.kind.duration()).min(1.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrival() -> PendingArrival {
        PendingArrival {
            coordinate: Coordinate::new(1, 0),
            spawn: Vec2::new(80.0, 500.0),
        }
    }

    #[test]
    fn request_while_active_is_rejected() {
        let mut controller = TransitionController::new();
        controller.request(TransitionKind::Fade, arrival()).unwrap();
        assert_eq!(
            controller.request(TransitionKind::Iris, arrival()),
            Err(TransitionError::AlreadyActive)
        );
    }

    #[test]
    fn midpoint_fires_exactly_once() {
        let mut controller = TransitionController::new();
        controller.request(TransitionKind::Fade, arrival()).unwrap();

        // 0.2 of 0.6s: progress 1/3, before the midpoint.
        assert_eq!(controller.advance(0.2).midpoint, None);
        // 0.45s elapsed: progress 0.75, midpoint fires.
        let tick = controller.advance(0.25);
        assert_eq!(tick.midpoint, Some(arrival()));
        assert!(!tick.finished);
        // Still past 0.5 next tick, but latched.
        let tick = controller.advance(0.1);
        assert_eq!(tick.midpoint, None);
    }

    #[test]
    fn completes_and_returns_to_idle() {
        let mut controller = TransitionController::new();
        controller.request(TransitionKind::Zoom, arrival()).unwrap();
        let tick = controller.advance(1.2);
        assert!(tick.finished);
        assert_eq!(tick.midpoint, Some(arrival()));
        assert!(!controller.is_active());
        assert_eq!(controller.view(), None);
    }

    #[test]
    fn zoom_runs_longer_than_fade() {
        assert!(TransitionKind::Zoom.duration() > TransitionKind::Fade.duration());
        assert_eq!(
            TransitionKind::Fade.duration(),
            TransitionKind::Iris.duration()
        );
    }

    #[test]
    fn view_reports_clamped_progress() {
        let mut controller = TransitionController::new();
        controller.request(TransitionKind::Fade, arrival()).unwrap();
        controller.advance(0.3);
        let view = controller.view().unwrap();
        assert_eq!(view.kind, TransitionKind::Fade);
        assert!((view.progress - 0.5).abs() < 1e-6);
    }
}
