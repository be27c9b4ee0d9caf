//! Outbound simulation events
//!
//! Everything a renderer or UI layer needs to react to, buffered on the
//! state during a tick and drained by the driver afterwards. Spawn events
//! carry position/velocity so effect layers can fire without walking the
//! entity lists; per-frame animation still reads entity state directly.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::CoverageTier;
use crate::payload::PowerupKind;

/// Statistics for a finished level, summed over its consumed resources
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LevelStats {
    pub resource_count: usize,
    /// Total bytes over the wire
    pub total_bytes: f64,
    /// Bytes loaded but never exercised, summed over resources with known
    /// coverage
    pub wasted_bytes: f64,
    /// Total script bootup attributed to the level, in ms
    pub bootup_ms: f64,
    /// The metric value this level represents, in ms
    pub load_time_ms: f64,
}

/// One notification out of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted {
        number: u32,
        name: String,
    },
    HostileSpawned {
        id: u32,
        label: String,
        size: f32,
        tier: CoverageTier,
        pos: Vec2,
        vel: Vec2,
    },
    PickupSpawned {
        id: u32,
        kind: PowerupKind,
        pos: Vec2,
        vel: Vec2,
    },
    ProjectileFired {
        id: u32,
        pos: Vec2,
        vel: Vec2,
        heavy: bool,
    },
    /// A projectile connected without destroying its target
    HostileHit {
        id: u32,
        remaining_health: f32,
    },
    HostileDestroyed {
        id: u32,
        score_awarded: u32,
    },
    ShipHit {
        lives_left: u8,
    },
    ShipRespawned,
    PickupCollected {
        kind: PowerupKind,
        name: String,
    },
    LabelSpawned {
        id: u32,
        text: String,
        pos: Vec2,
    },
    /// The loading-progress thumbnail selection moved forward
    ScreenshotAdvanced {
        index: usize,
        timing: f64,
    },
    LevelFinished {
        number: u32,
        name: String,
        stats: LevelStats,
    },
    GameWon {
        score: u32,
    },
    GameLost {
        score: u32,
    },
}
