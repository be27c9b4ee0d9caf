//! Simulation state and core gameplay types
//!
//! One `SimulationState` owns everything a run needs: the ship, live
//! entities, the timeline queues, the seeded RNG and the outbound event
//! buffer. Components receive it by mutable reference; nothing lives in
//! module globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::GameEvent;
use super::queue::{ResourceQueue, RewardQueue};
use crate::consts::*;
use crate::payload::{GamePayload, LevelSpec, PowerupKind, Screenshot};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Every level's timeline was cleared with lives to spare
    Won,
    /// Ran out of lives
    Lost,
}

/// Visual tier of a hostile, derived from byte coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverageTier {
    /// More than 85% of the bytes were exercised
    HighUse,
    /// More than 50%
    MediumUse,
    /// More than 0%
    LowUse,
    /// Coverage absent or not attributable
    Unknown,
}

impl CoverageTier {
    /// Map an audit coverage value to a tier. Absent and non-positive
    /// values both mean the audit could not tell.
    pub fn from_coverage(coverage: Option<f64>) -> Self {
        match coverage {
            Some(c) if c > 85.0 => CoverageTier::HighUse,
            Some(c) if c > 50.0 => CoverageTier::MediumUse,
            Some(c) if c > 0.0 => CoverageTier::LowUse,
            _ => CoverageTier::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageTier::HighUse => "high-use",
            CoverageTier::MediumUse => "medium-use",
            CoverageTier::LowUse => "low-use",
            CoverageTier::Unknown => "unknown",
        }
    }
}

/// The player ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    pub accel: Vec2,
    /// Facing angle in radians
    pub rotation: f32,
    pub lives: u8,
    /// Hidden while waiting to respawn
    pub visible: bool,
    /// Invincible while game time is before this timestamp
    pub invincible_until: Option<f64>,
    /// Scheduled reappearance at field center
    pub respawn_at: Option<f64>,
    /// Shield pickup active (invincible AND visible)
    pub shielded: bool,
    pub fire_delay_ms: f64,
    /// Damage per shot in kilobytes of download
    pub shot_damage: f32,
    /// Heavy projectile visuals from the stronger-shots pickup
    pub heavy_shots: bool,
    /// Game time the next shot is allowed
    pub next_shot_at: f64,
}

impl Ship {
    pub fn new(lives: u8, pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            rotation: 0.0,
            lives,
            visible: true,
            invincible_until: None,
            respawn_at: None,
            shielded: false,
            fire_delay_ms: DEFAULT_FIRE_DELAY_MS,
            shot_damage: DEFAULT_SHOT_DAMAGE,
            heavy_shots: false,
            next_shot_at: 0.0,
        }
    }

    pub fn is_invincible(&self, now: f64) -> bool {
        self.invincible_until.is_some_and(|until| now < until)
    }

    pub fn radius(&self) -> f32 {
        SHIP_RADIUS
    }
}

/// A hostile entity, one audited resource drifting across the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub label: String,
    /// Rendered diameter in pixels, clamped from the transfer size
    pub size: f32,
    /// Starts equal to `size`; the hostile dies at zero
    pub health: f32,
    pub tier: CoverageTier,
    /// Load-finish time of the source resource, feeds the current-time
    /// computation only
    pub expiry_time: f64,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cleared on destruction; dead hostiles are pruned at end of tick
    pub alive: bool,
}

impl Hostile {
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// A pickup entity awaiting collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PowerupKind,
    /// Name shown on the collection label
    pub name: String,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Pickup {
    pub fn radius(&self) -> f32 {
        PICKUP_RADIUS
    }
}

/// A ship-fired projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Game time the projectile burns out
    pub expires_at: f64,
    pub heavy: bool,
}

/// A floating feedback label that rises and fades
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingLabel {
    pub id: u32,
    pub text: String,
    pub pos: Vec2,
    pub alpha: f32,
    /// Hostile the label was attached to, for refresh suppression only.
    /// May outlive the hostile; the label then just fades on its own.
    pub source: Option<u32>,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    /// Play field dimensions in pixels
    pub field: Vec2,
    /// Accumulated game time in ms; excludes paused spans because the
    /// driver stops ticking while paused
    pub time_ms: f64,
    pub phase: GamePhase,
    pub score: u32,
    pub ship: Ship,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
    pub projectiles: Vec<Projectile>,
    pub labels: Vec<FloatingLabel>,
    /// Pending resources of the current level
    pub resources: ResourceQueue,
    /// Pending rewards for the whole run
    pub rewards: RewardQueue,
    /// All levels of the run; `level_index` points at the current one
    pub levels: Vec<LevelSpec>,
    pub level_index: usize,
    pub screenshots: Vec<Screenshot>,
    /// Latest loading-progress thumbnail that is due, if any
    pub screenshot_index: Option<usize>,
    /// Audit scores passed through for the end screen
    pub perf_score: Option<f64>,
    pub pwa_score: Option<f64>,
    /// Outbound notifications, drained by the driver each tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl SimulationState {
    /// Create a run from an audit payload. Enters the first level with
    /// resources immediately; a payload with none is an instant win.
    pub fn new(payload: GamePayload, settings: Settings, seed: u64) -> Self {
        let field = Vec2::new(FIELD_WIDTH, FIELD_HEIGHT);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Ship::new(settings.starting_lives, field / 2.0),
            settings,
            field,
            time_ms: 0.0,
            phase: GamePhase::Playing,
            score: 0,
            hostiles: Vec::new(),
            pickups: Vec::new(),
            projectiles: Vec::new(),
            labels: Vec::new(),
            resources: ResourceQueue::default(),
            rewards: RewardQueue::new(payload.powerups),
            levels: payload.levels,
            level_index: 0,
            screenshots: payload.screenshots,
            screenshot_index: None,
            perf_score: payload.perf_score,
            pwa_score: payload.pwa_score,
            events: Vec::new(),
            next_id: 1,
        };
        super::level::enter_level(&mut state, 0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain the event buffer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of live hostiles on the field
    pub fn live_hostiles(&self) -> usize {
        self.hostiles.iter().filter(|h| h.alive).count()
    }

    pub fn field_center(&self) -> Vec2 {
        self.field / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::ResourceSpec;

    fn resource(start: f64, end: f64, bytes: f64) -> ResourceSpec {
        ResourceSpec {
            activation_time: start,
            expiry_time: end,
            transfer_size: bytes,
            coverage: None,
            label: String::new(),
            bootup_time: 0.0,
        }
    }

    fn level(number: u32, resources: Vec<ResourceSpec>) -> LevelSpec {
        LevelSpec {
            name: format!("Level {number}"),
            level_number: number,
            time: 1000.0,
            resources,
        }
    }

    #[test]
    fn test_coverage_tiers() {
        assert_eq!(
            CoverageTier::from_coverage(Some(100.0)),
            CoverageTier::HighUse
        );
        assert_eq!(
            CoverageTier::from_coverage(Some(85.0)),
            CoverageTier::MediumUse
        );
        assert_eq!(
            CoverageTier::from_coverage(Some(50.0)),
            CoverageTier::LowUse
        );
        assert_eq!(
            CoverageTier::from_coverage(Some(0.0)),
            CoverageTier::Unknown
        );
        assert_eq!(
            CoverageTier::from_coverage(Some(-1.0)),
            CoverageTier::Unknown
        );
        assert_eq!(CoverageTier::from_coverage(None), CoverageTier::Unknown);
    }

    #[test]
    fn test_ship_invincibility_window() {
        let mut ship = Ship::new(3, Vec2::ZERO);
        assert!(!ship.is_invincible(0.0));
        ship.invincible_until = Some(5000.0);
        assert!(ship.is_invincible(4999.0));
        assert!(!ship.is_invincible(5000.0));
    }

    #[test]
    fn test_new_enters_first_level_with_resources() {
        let payload = GamePayload {
            levels: vec![
                level(1, vec![]),
                level(2, vec![resource(0.0, 100.0, 5000.0)]),
            ],
            ..Default::default()
        };
        let state = SimulationState::new(payload, Settings::desktop(), 7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.resources.pending_len(), 1);
    }

    #[test]
    fn test_new_with_no_resources_is_instant_win() {
        let payload = GamePayload {
            levels: vec![level(1, vec![]), level(2, vec![])],
            ..Default::default()
        };
        let state = SimulationState::new(payload, Settings::desktop(), 7);
        assert_eq!(state.phase, GamePhase::Won);
    }

    #[test]
    fn test_entity_ids_unique() {
        let state = &mut SimulationState::new(
            GamePayload::default(),
            Settings::desktop(),
            1,
        );
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }
}
