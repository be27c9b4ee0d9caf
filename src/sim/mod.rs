//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Caller-supplied timestamps (no wall-clock reads)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod events;
pub mod level;
pub mod queue;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::TimelineClock;
pub use collision::circles_overlap;
pub use events::{GameEvent, LevelStats};
pub use queue::{ResourceQueue, RewardQueue};
pub use state::{
    CoverageTier, FloatingLabel, GamePhase, Hostile, Pickup, Projectile, Ship, SimulationState,
};
pub use tick::{TickInput, tick};
