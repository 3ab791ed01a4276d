//! Outbound event surfaces for the rendering and audio collaborators.
//!
//! Everything here is fire-and-forget: the session queues cues and requests
//! during a frame, the host drains them after `advance` returns, and no
//! completion or ordering guarantee flows back.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use realms_core::{Coordinate, Vec2};

/// Number of gameplay messages retained in the rolling log.
const MESSAGE_LOG_CAP: usize = 11;

/// One-shot sound effect identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    PlayerHit,
    EnemyHit,
    Pickup,
    Defeat,
}

/// Coordinate-keyed music routing.
///
/// The audio collaborator picks the track from the coordinate (the final-boss
/// map gets its own theme); fades are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MusicRequest {
    Start {
        coordinate: Coordinate,
        fade_in: Option<f32>,
    },
    Stop {
        fade_out: Option<f32>,
    },
}

/// Tint of a floating damage number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTint {
    /// Damage taken by the player.
    Incoming,
    /// Damage dealt to an enemy.
    Outgoing,
}

/// A floating combat number, retained for one second after `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageNumber {
    pub text: String,
    /// World-space anchor (top-center of the hit entity).
    pub position: Vec2,
    /// Session clock at emission, seconds.
    pub timestamp: f64,
    pub tint: DamageTint,
}

/// Per-frame queues of audio cues and music requests.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct FrameEvents {
    pub audio: Vec<AudioCue>,
    pub music: Vec<MusicRequest>,
}

impl FrameEvents {
    pub fn push_audio(&mut self, cue: AudioCue) {
        self.audio.push(cue);
    }

    pub fn push_music(&mut self, request: MusicRequest) {
        self.music.push(request);
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.music.is_empty()
    }

    /// Takes all queued events, leaving the queues empty.
    pub fn drain(&mut self) -> FrameEvents {
        std::mem::take(self)
    }
}

/// Rolling log of the most recent gameplay messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(MESSAGE_LOG_CAP),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        while self.entries.len() >= MESSAGE_LOG_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    /// Messages oldest-first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}
