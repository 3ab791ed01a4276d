//! Procedural world generation.
//!
//! The world is an infinite grid of maps keyed by [`Coordinate`]. A session
//! plans a highway of guaranteed-open edges from the start to each objective
//! once, then generates each map on demand as a pure function of
//! (coordinate, root seed, highway). Neighboring maps agree on their shared
//! exits without coordination because the gating seed depends only on the
//! edge key.
//!
//! [`Coordinate`]: crate::state::Coordinate
mod generator;
mod highway;
mod layout;

pub use generator::{GenContext, edge_open, generate};
pub use highway::{HighwaySet, edge_key, plan_highway};
