//! Inbound gamestate payload
//!
//! The audit pipeline runs Lighthouse against a URL, segments the network
//! timeline into levels at the performance-metric boundaries, and ships the
//! result as JSON. This module is the typed view of that document. The
//! simulation treats it as a pre-validated timeline and never re-derives
//! audit metrics; missing optional fields map to gameplay defaults rather
//! than errors.

use serde::{Deserialize, Serialize};

/// One audited network resource on the load timeline.
///
/// Times are milliseconds relative to navigation start. Entries within a
/// level are not guaranteed to be sorted by activation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceSpec {
    /// When the resource request started
    #[serde(alias = "startTime", default)]
    pub activation_time: f64,
    /// When the resource finished loading
    #[serde(alias = "endTime", default)]
    pub expiry_time: f64,
    /// Bytes over the wire
    #[serde(default)]
    pub transfer_size: f64,
    /// Percentage of bytes exercised during load; absent or negative means
    /// the audit could not tell
    #[serde(default)]
    pub coverage: Option<f64>,
    /// Short human-readable name (usually the URL filename)
    #[serde(default)]
    pub label: String,
    /// Main-thread script time attributed to this resource, in ms
    #[serde(default)]
    pub bootup_time: f64,
}

/// Power-up kinds, closed set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PowerupKind {
    ExtraLife,
    Shield,
    Bomb,
    #[serde(alias = "shoot-rate")]
    FasterFire,
    StrongerShots,
}

impl PowerupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PowerupKind::ExtraLife => "extra-life",
            PowerupKind::Shield => "shield",
            PowerupKind::Bomb => "bomb",
            PowerupKind::FasterFire => "faster-fire",
            PowerupKind::StrongerShots => "stronger-shots",
        }
    }
}

/// A reward event on the timeline, converted to exactly one pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardSpec {
    /// Activation time in ms
    #[serde(alias = "activationTime", default)]
    pub time: f64,
    #[serde(alias = "type")]
    pub kind: PowerupKind,
    /// Name shown on the pickup label
    #[serde(alias = "displayName", default)]
    pub name: String,
}

/// One loading-progress thumbnail keyed by audit time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    pub timing: f64,
    /// Opaque base64 image data, never decoded here
    #[serde(default)]
    pub data: String,
}

/// One level: the resource timeline between two metric milestones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level_number: u32,
    /// The metric value for this milestone (e.g. first contentful paint),
    /// reported as "load time" in the level statistics
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

/// Root gamestate document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePayload {
    /// Lighthouse performance score (0-1), passed through to the end screen
    #[serde(alias = "lhr_perf_score", default)]
    pub perf_score: Option<f64>,
    /// Lighthouse PWA score (0-1), passed through to the end screen
    #[serde(alias = "lhr_pwa_score", default)]
    pub pwa_score: Option<f64>,
    #[serde(alias = "lhr_screenshots", default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub levels: Vec<LevelSpec>,
    /// Reward timeline; global, not segmented into levels
    #[serde(alias = "goodies", default)]
    pub powerups: Vec<RewardSpec>,
}

impl GamePayload {
    /// Parse a gamestate JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
