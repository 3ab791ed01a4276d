//! Error types surfaced at the runtime crate's seams.
//!
//! Normal play produces no errors at all: delta-time is clamped, health is
//! floored, and bounded searches fall back to fixed defaults. What remains is
//! the transition controller rejecting overlapping requests.

/// Failure modes of the map transition controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A transition was requested while another is still running.
    #[error("a map transition is already active")]
    AlreadyActive,
}
