//! Collision resolution
//!
//! Three overlap passes per tick, in frame order: ship against pickups,
//! projectiles against hostiles, ship against hostiles. Destroyed
//! hostiles are flagged dead and pruned at end of tick, so a hostile can
//! die at most once no matter how many overlaps it appears in.

use glam::Vec2;

use super::events::GameEvent;
use super::spawn::spawn_label;
use super::state::{GamePhase, SimulationState};
use crate::consts::*;
use crate::payload::PowerupKind;

/// Circle overlap test on center distance
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_pos.distance_squared(b_pos) <= reach * reach
}

/// Run all overlap passes for this tick
pub fn resolve_collisions(state: &mut SimulationState) {
    resolve_ship_pickups(state);
    resolve_projectiles_hostiles(state);
    resolve_ship_hostiles(state);
}

/// Collect every pickup overlapping the ship. Collection is not gated
/// on visibility or invincibility; a hidden drifting ship still scoops
/// up rewards.
fn resolve_ship_pickups(state: &mut SimulationState) {
    let ship_pos = state.ship.pos;
    let mut collected = Vec::new();
    state.pickups.retain(|pickup| {
        if circles_overlap(ship_pos, SHIP_RADIUS, pickup.pos, pickup.radius()) {
            collected.push(pickup.clone());
            false
        } else {
            true
        }
    });
    for pickup in collected {
        apply_pickup(state, &pickup);
        state.push_event(GameEvent::PickupCollected {
            kind: pickup.kind,
            name: pickup.name.clone(),
        });
        spawn_label(state, &pickup.name, pickup.pos, None);
    }
}

fn apply_pickup(state: &mut SimulationState, pickup: &super::state::Pickup) {
    match pickup.kind {
        PowerupKind::ExtraLife => {
            state.ship.lives = state.ship.lives.saturating_add(1);
        }
        PowerupKind::Shield => {
            // Unlike a hit window, the shield keeps the ship shown
            state.ship.invincible_until = Some(state.time_ms + SHIELD_INVINCIBILITY_MS);
            state.ship.shielded = true;
            state.ship.visible = true;
        }
        PowerupKind::Bomb => {
            for idx in 0..state.hostiles.len() {
                if state.hostiles[idx].alive {
                    destroy_hostile_scored(state, idx);
                }
            }
        }
        PowerupKind::FasterFire => {
            state.ship.fire_delay_ms = FAST_FIRE_DELAY_MS;
        }
        PowerupKind::StrongerShots => {
            state.ship.shot_damage = STRONG_SHOT_DAMAGE;
            state.ship.heavy_shots = true;
        }
    }
}

/// Each projectile damages at most one hostile, then burns up
fn resolve_projectiles_hostiles(state: &mut SimulationState) {
    let damage = state.ship.shot_damage;
    let mut p = 0;
    while p < state.projectiles.len() {
        let pos = state.projectiles[p].pos;
        let hit = (0..state.hostiles.len()).find(|&h| {
            let hostile = &state.hostiles[h];
            hostile.alive
                && circles_overlap(pos, PROJECTILE_RADIUS, hostile.pos, hostile.radius())
        });
        match hit {
            Some(h) => {
                state.projectiles.remove(p);
                damage_hostile(state, h, damage);
            }
            None => p += 1,
        }
    }
}

fn damage_hostile(state: &mut SimulationState, idx: usize, damage: f32) {
    state.hostiles[idx].health -= damage;
    if state.hostiles[idx].health <= 0.0 {
        destroy_hostile_scored(state, idx);
    } else {
        let id = state.hostiles[idx].id;
        let remaining = state.hostiles[idx].health;
        state.push_event(GameEvent::HostileHit {
            id,
            remaining_health: remaining,
        });
        refresh_hostile_label(state, idx);
    }
}

/// Attach the hostile's identifying label unless one from this hostile
/// is still clearly readable
fn refresh_hostile_label(state: &mut SimulationState, idx: usize) {
    let id = state.hostiles[idx].id;
    let readable = state
        .labels
        .iter()
        .any(|l| l.source == Some(id) && l.alpha >= LABEL_REFRESH_ALPHA);
    if !readable {
        let text = state.hostiles[idx].label.clone();
        let pos = state.hostiles[idx].pos;
        spawn_label(state, &text, pos, Some(id));
    }
}

/// Kill a hostile and bank its size as score. Shared by projectile
/// kills and the bomb pickup.
fn destroy_hostile_scored(state: &mut SimulationState, idx: usize) {
    let hostile = &mut state.hostiles[idx];
    hostile.alive = false;
    let id = hostile.id;
    let awarded = hostile.size.round() as u32;
    state.score += awarded;
    state.push_event(GameEvent::HostileDestroyed {
        id,
        score_awarded: awarded,
    });
}

/// Ship against hostiles. Skipped entirely while invincible; the first
/// hit grants a fresh invincibility window, so at most one life is lost
/// per tick.
fn resolve_ship_hostiles(state: &mut SimulationState) {
    for h in 0..state.hostiles.len() {
        if state.ship.is_invincible(state.time_ms) {
            break;
        }
        if !state.hostiles[h].alive {
            continue;
        }
        let (pos, radius) = (state.hostiles[h].pos, state.hostiles[h].radius());
        if !circles_overlap(state.ship.pos, SHIP_RADIUS, pos, radius) {
            continue;
        }

        // Body kills pay no score
        let hostile = &mut state.hostiles[h];
        hostile.alive = false;
        let id = hostile.id;
        state.push_event(GameEvent::HostileDestroyed {
            id,
            score_awarded: 0,
        });

        state.ship.lives = state.ship.lives.saturating_sub(1);
        state.push_event(GameEvent::ShipHit {
            lives_left: state.ship.lives,
        });
        if state.ship.lives == 0 {
            state.phase = GamePhase::Lost;
            state.push_event(GameEvent::GameLost { score: state.score });
            break;
        } else {
            state.ship.visible = false;
            state.ship.shielded = false;
            state.ship.invincible_until = Some(state.time_ms + HIT_INVINCIBILITY_MS);
            state.ship.respawn_at = Some(state.time_ms + RESPAWN_DELAY_MS);
        }
    }
}
