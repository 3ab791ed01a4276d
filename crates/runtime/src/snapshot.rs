//! The read-only per-frame view handed to the rendering collaborator.

use std::collections::HashMap;

use serde::Serialize;

use realms_core::{Coordinate, Enemy, EntityId, Palette, PlacedItem, Player, TileGrid, Vec2};

use crate::events::{DamageNumber, MessageLog};
use crate::simulation::Outcome;
use crate::transition::TransitionView;

/// Everything a renderer needs to draw one frame.
///
/// Borrowed straight out of the session, so the snapshot is free to build
/// and cannot outlive the frame. Serializable for hosts that ship frames
/// across a wire instead of drawing in-process.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub player: &'a Player,
    pub coordinate: Coordinate,
    pub grid: &'a TileGrid,
    pub palette: &'a Palette,
    pub items: &'a [PlacedItem],
    pub enemies: &'a [Enemy],
    /// Shake pulse magnitude, decaying by one per frame.
    pub screen_shake: f32,
    /// Session clock of the last hit, per entity still flashing.
    pub hit_flashes: &'a HashMap<EntityId, f64>,
    pub damage_numbers: &'a [DamageNumber],
    pub move_target: Option<Vec2>,
    /// Present only while a map transition is running.
    pub transition: Option<TransitionView>,
    pub messages: &'a MessageLog,
    pub outcome: Outcome,
}
