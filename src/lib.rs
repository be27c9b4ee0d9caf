//! Load Raider - an asteroids-style replay of a web-performance audit
//!
//! Core modules:
//! - `sim`: Deterministic simulation (timeline clock, queues, spawning,
//!   collisions, level progression)
//! - `payload`: Inbound gamestate JSON produced by the audit pipeline
//! - `settings`: Data-driven gameplay tuning (desktop/mobile profiles)

pub mod payload;
pub mod settings;
pub mod sim;

pub use payload::{GamePayload, PowerupKind};
pub use settings::{Profile, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching audit playback rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// One simulation tick in game milliseconds
    pub const TICK_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 1280.0;
    pub const FIELD_HEIGHT: f32 = 720.0;
    /// Entities spawn this far outside the field edge, and off-field
    /// entities wrap once they drift past it
    pub const SPAWN_MARGIN: f32 = 80.0;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 15.0;
    pub const SHIP_THRUST: f32 = 200.0;
    pub const SHIP_MAX_SPEED: f32 = 200.0;
    /// Turn rate in radians/sec (300 deg/s)
    pub const SHIP_TURN_RATE: f32 = 300.0 * std::f32::consts::PI / 180.0;
    /// Ship wraps exactly at the field edge, with no overshoot
    pub const SHIP_WRAP_MARGIN: f32 = 0.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 400.0;
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    pub const PROJECTILE_LIFESPAN_MS: f64 = 2000.0;
    /// Live projectile pool cap; firing is a no-op at the cap
    pub const MAX_PROJECTILES: usize = 40;
    pub const DEFAULT_FIRE_DELAY_MS: f64 = 300.0;
    pub const FAST_FIRE_DELAY_MS: f64 = 100.0;
    /// Shot damage in kilobytes of download per hit
    pub const DEFAULT_SHOT_DAMAGE: f32 = 10.0;
    pub const STRONG_SHOT_DAMAGE: f32 = 30.0;

    /// Recovery windows after a ship hit, in game milliseconds.
    /// Respawn is strictly shorter so the ship is never visible while
    /// vulnerable.
    pub const HIT_INVINCIBILITY_MS: f64 = 5000.0;
    pub const RESPAWN_DELAY_MS: f64 = 3000.0;
    pub const SHIELD_INVINCIBILITY_MS: f64 = 10000.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 15.0;
    pub const PICKUP_MIN_SPEED: f32 = 40.0;
    pub const PICKUP_MAX_SPEED: f32 = 100.0;

    /// Floating label fade behavior (per tick)
    pub const LABEL_FADE_PER_TICK: f32 = 0.003;
    pub const LABEL_RISE_PER_TICK: f32 = 2.0;
    /// A hostile gets a fresh label only when its current one has faded
    /// below this alpha
    pub const LABEL_REFRESH_ALPHA: f32 = 0.5;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit heading vector for a rotation angle
#[inline]
pub fn heading_to_vec(rotation: f32) -> Vec2 {
    Vec2::new(rotation.cos(), rotation.sin())
}

/// Wrap a position across the field edges once it drifts `margin` past them
#[inline]
pub fn wrap_position(pos: Vec2, field: Vec2, margin: f32) -> Vec2 {
    let mut wrapped = pos;
    if wrapped.x < -margin {
        wrapped.x = field.x;
    } else if wrapped.x > field.x + margin {
        wrapped.x = 0.0;
    }
    if wrapped.y < -margin {
        wrapped.y = field.y;
    } else if wrapped.y > field.y + margin {
        wrapped.y = 0.0;
    }
    wrapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(3.0 * PI) - (-PI)).abs() < 0.001);
        assert!((normalize_angle(-3.0 * PI) - (-PI)).abs() < 0.001);
        assert!((normalize_angle(0.5) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_wrap_position() {
        let field = Vec2::new(800.0, 600.0);

        // Inside the margin band: untouched
        let pos = wrap_position(Vec2::new(-50.0, 300.0), field, 80.0);
        assert_eq!(pos, Vec2::new(-50.0, 300.0));

        // Past the left margin: snaps to the right edge
        let pos = wrap_position(Vec2::new(-81.0, 300.0), field, 80.0);
        assert_eq!(pos, Vec2::new(800.0, 300.0));

        // Past the bottom margin: snaps to the top edge
        let pos = wrap_position(Vec2::new(400.0, 681.0), field, 80.0);
        assert_eq!(pos, Vec2::new(400.0, 0.0));

        // Zero margin wraps exactly at the edge
        let pos = wrap_position(Vec2::new(801.0, 300.0), field, 0.0);
        assert_eq!(pos, Vec2::new(0.0, 300.0));
    }
}
