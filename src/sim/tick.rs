//! Fixed timestep simulation tick
//!
//! One call advances the whole run by `dt` seconds: ship control and
//! motion, timeline drains and spawning, screen wrap, collision
//! resolution, level transition, label fade. Everything is driven by
//! `SimulationState`, so two runs with the same seed and inputs replay
//! identically.

use glam::Vec2;

use super::events::GameEvent;
use super::state::{GamePhase, Projectile, SimulationState};
use super::{collision, level, spawn};
use crate::consts::*;
use crate::{heading_to_vec, normalize_angle, wrap_position};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub thrust: bool,
    pub fire: bool,
}

/// Advance the simulation by one fixed timestep
pub fn tick(state: &mut SimulationState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ms += f64::from(dt) * 1000.0;
    let now = state.time_ms;

    update_ship_timers(state, now);
    update_ship_motion(state, input, dt);
    try_fire(state, input, now);

    // One timeline read per tick feeds the screenshot pick and both
    // queue drains
    let timeline = spawn::current_time(state);
    advance_screenshot(state, timeline);
    let due_before = timeline.unwrap_or(f64::MAX);

    let rewards = state.rewards.drain_due(due_before);
    spawn::spawn_pickups(state, rewards);

    let capacity = state
        .settings
        .max_hostiles_at_once
        .saturating_sub(state.live_hostiles());
    let noise_threshold = (state.levels[state.level_index].level_number > 1)
        .then_some(f64::from(state.settings.hostile_size_threshold));
    let released = state.resources.drain_due(due_before, capacity, noise_threshold);
    spawn::spawn_hostiles(state, released);

    update_entity_motion(state, dt);
    expire_projectiles(state, now);
    collision::resolve_collisions(state);
    state.hostiles.retain(|h| h.alive);
    level::check_level_transition(state);
    update_labels(state);
}

/// Fire scheduled ship transitions whose timestamp has passed
fn update_ship_timers(state: &mut SimulationState, now: f64) {
    if state.ship.respawn_at.is_some_and(|at| now >= at) {
        state.ship.respawn_at = None;
        state.ship.pos = state.field_center();
        state.ship.vel = Vec2::ZERO;
        state.ship.accel = Vec2::ZERO;
        state.ship.visible = true;
        state.push_event(GameEvent::ShipRespawned);
    }
    if state.ship.invincible_until.is_some_and(|until| now >= until) {
        state.ship.invincible_until = None;
        state.ship.shielded = false;
    }
}

fn update_ship_motion(state: &mut SimulationState, input: &TickInput, dt: f32) {
    let ship = &mut state.ship;
    let turn = match (input.turn_left, input.turn_right) {
        (true, false) => -SHIP_TURN_RATE,
        (false, true) => SHIP_TURN_RATE,
        _ => 0.0,
    };
    ship.rotation = normalize_angle(ship.rotation + turn * dt);
    ship.accel = if input.thrust {
        heading_to_vec(ship.rotation) * SHIP_THRUST
    } else {
        Vec2::ZERO
    };
    ship.vel = (ship.vel + ship.accel * dt).clamp_length_max(SHIP_MAX_SPEED);
    ship.pos = wrap_position(ship.pos + ship.vel * dt, state.field, SHIP_WRAP_MARGIN);
}

/// Fire when asked, rate limited, against a fixed projectile pool
fn try_fire(state: &mut SimulationState, input: &TickInput, now: f64) {
    if !input.fire || now <= state.ship.next_shot_at {
        return;
    }
    if state.projectiles.len() >= MAX_PROJECTILES {
        return;
    }
    let dir = heading_to_vec(state.ship.rotation);
    let pos = state.ship.pos + dir * SHIP_RADIUS;
    let vel = dir * PROJECTILE_SPEED;
    let heavy = state.ship.heavy_shots;
    let id = state.next_entity_id();
    state.push_event(GameEvent::ProjectileFired { id, pos, vel, heavy });
    state.projectiles.push(Projectile {
        id,
        pos,
        vel,
        expires_at: now + PROJECTILE_LIFESPAN_MS,
        heavy,
    });
    state.ship.next_shot_at = now + state.ship.fire_delay_ms;
}

/// Latest loading screenshot that is due at the timeline position.
/// Only ever announced when the pick changes; with no pick the previous
/// thumbnail stays up.
fn advance_screenshot(state: &mut SimulationState, timeline: Option<f64>) {
    let cutoff = timeline.unwrap_or(f64::MAX);
    let mut latest = None;
    for (idx, shot) in state.screenshots.iter().enumerate() {
        if shot.timing < cutoff {
            latest = Some(idx);
        }
    }
    if let Some(idx) = latest
        && state.screenshot_index != Some(idx)
    {
        state.screenshot_index = Some(idx);
        state.push_event(GameEvent::ScreenshotAdvanced {
            index: idx,
            timing: state.screenshots[idx].timing,
        });
    }
}

fn update_entity_motion(state: &mut SimulationState, dt: f32) {
    let field = state.field;
    for hostile in &mut state.hostiles {
        hostile.pos = wrap_position(hostile.pos + hostile.vel * dt, field, SPAWN_MARGIN);
    }
    for pickup in &mut state.pickups {
        pickup.pos = wrap_position(pickup.pos + pickup.vel * dt, field, SPAWN_MARGIN);
    }
    for projectile in &mut state.projectiles {
        projectile.pos =
            wrap_position(projectile.pos + projectile.vel * dt, field, SPAWN_MARGIN);
    }
}

fn expire_projectiles(state: &mut SimulationState, now: f64) {
    state.projectiles.retain(|p| p.expires_at > now);
}

fn update_labels(state: &mut SimulationState) {
    for label in &mut state.labels {
        label.alpha -= LABEL_FADE_PER_TICK;
        label.pos.y -= LABEL_RISE_PER_TICK;
    }
    state.labels.retain(|l| l.alpha > 0.0);
}
