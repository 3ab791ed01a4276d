//! Session orchestration for the infinite maze world.
//!
//! This crate owns everything that is not a pure function of its inputs: the
//! lazily built world cache, the per-frame simulation state machine, the map
//! transition controller, and the event queues consumed by rendering and
//! audio collaborators. The host drives a [`Session`] by calling
//! [`Session::advance`] once per display frame with the elapsed time; nothing
//! here blocks or spawns threads.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the session state machine and frame loop
//! - [`world`] caches generated maps and applies the farm-difficulty ratchet
//! - [`transition`] runs the map-transition progress machine
//! - [`input`] resolves discrete input against a pointer move target
//! - [`events`] defines the audio/music queues and gameplay message log
//! - [`snapshot`] is the read-only per-frame view handed to renderers
pub mod error;
pub mod events;
pub mod input;
pub mod simulation;
pub mod snapshot;
pub mod transition;
pub mod world;

pub use error::TransitionError;
pub use events::{AudioCue, DamageNumber, DamageTint, FrameEvents, MessageLog, MusicRequest};
pub use input::InputState;
pub use simulation::{Outcome, Session};
pub use snapshot::FrameSnapshot;
pub use transition::{PendingArrival, TransitionController, TransitionKind, TransitionView};
pub use world::{WorldCache, WorldMapRecord};
