//! Gameplay tuning
//!
//! Two profiles ship by default: desktop (big field, many hostiles) and
//! mobile (fewer, slower hostiles on a cramped screen). The host picks one
//! at startup; everything else about a run comes from the audit payload.

use serde::{Deserialize, Serialize};

/// Tuning profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Profile {
    #[default]
    Desktop,
    Mobile,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Desktop => "Desktop",
            Profile::Mobile => "Mobile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "desktop" => Some(Profile::Desktop),
            "mobile" => Some(Profile::Mobile),
            _ => None,
        }
    }
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Hostiles ===
    /// Smallest rendered hostile diameter in pixels
    pub min_hostile_size: f32,
    /// Largest rendered hostile diameter in pixels
    pub max_hostile_size: f32,
    /// Hostile drift speed range in pixels/sec
    pub min_hostile_speed: f32,
    pub max_hostile_speed: f32,
    /// Ceiling on simultaneously live hostiles; due resources beyond it
    /// stay queued until a slot frees up
    pub max_hostiles_at_once: usize,
    /// Resources below this size in kb are treated as noise (analytics
    /// pings etc.) and not spawned once past the first level
    pub hostile_size_threshold: f32,

    // === Ship ===
    /// Starting lives
    pub starting_lives: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self::desktop()
    }
}

impl Settings {
    /// Desktop tuning: room for a crowded field
    pub fn desktop() -> Self {
        Self {
            min_hostile_size: 35.0,
            max_hostile_size: 300.0,
            min_hostile_speed: 40.0,
            max_hostile_speed: 120.0,
            max_hostiles_at_once: 30,
            hostile_size_threshold: 1.0,
            starting_lives: 3,
        }
    }

    /// Mobile tuning: fewer, slower, smaller hostiles
    pub fn mobile() -> Self {
        Self {
            min_hostile_size: 25.0,
            max_hostile_size: 200.0,
            min_hostile_speed: 30.0,
            max_hostile_speed: 70.0,
            max_hostiles_at_once: 5,
            hostile_size_threshold: 2.0,
            starting_lives: 3,
        }
    }

    /// Create settings for a profile
    pub fn from_profile(profile: Profile) -> Self {
        match profile {
            Profile::Desktop => Self::desktop(),
            Profile::Mobile => Self::mobile(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_str() {
        assert_eq!(Profile::from_str("desktop"), Some(Profile::Desktop));
        assert_eq!(Profile::from_str("Mobile"), Some(Profile::Mobile));
        assert_eq!(Profile::from_str("tablet"), None);
    }

    #[test]
    fn test_profiles_differ() {
        let desktop = Settings::desktop();
        let mobile = Settings::mobile();
        assert!(desktop.max_hostiles_at_once > mobile.max_hostiles_at_once);
        assert!(desktop.max_hostile_speed > mobile.max_hostile_speed);
        assert_eq!(desktop.starting_lives, mobile.starting_lives);
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings::from_profile(Profile::Mobile);
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, back);
    }
}
