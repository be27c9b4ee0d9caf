//! Entity spawning and timeline position
//!
//! The timeline position (current time) gates both queues. Spawned
//! entities enter from just outside the field edge and drift toward a
//! random interior point, so everything on screen converges on the play
//! area.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::events::GameEvent;
use super::state::{CoverageTier, FloatingLabel, Hostile, Pickup, SimulationState};
use crate::consts::*;
use crate::payload::{ResourceSpec, RewardSpec};

/// Resolve the timeline position for this tick.
///
/// The position is the earliest load-finish time still on the table:
/// the head of the resource queue if the level has pending resources,
/// then the minimum over every live hostile. The timeline only advances
/// once the slowest outstanding resource is gone. `None` means
/// unbounded, either nothing is outstanding or the audit carried no
/// usable timing, and everything still queued is due.
pub fn current_time(state: &SimulationState) -> Option<f64> {
    let mut current = state.resources.next_expiry();
    for hostile in state.hostiles.iter().filter(|h| h.alive) {
        current = Some(match current {
            Some(t) => t.min(hostile.expiry_time),
            None => hostile.expiry_time,
        });
    }
    match current {
        Some(t) if t > 0.0 => Some(t),
        _ => None,
    }
}

/// Spawn one hostile per released resource
pub fn spawn_hostiles(state: &mut SimulationState, specs: Vec<ResourceSpec>) {
    for spec in specs {
        spawn_hostile(state, spec);
    }
}

fn spawn_hostile(state: &mut SimulationState, spec: ResourceSpec) {
    let kilobytes = (spec.transfer_size / 1000.0) as f32;
    let size = kilobytes.clamp(
        state.settings.min_hostile_size,
        state.settings.max_hostile_size,
    );
    let tier = CoverageTier::from_coverage(spec.coverage);
    let pos = random_point_outside(&mut state.rng, state.field);
    let speed = state
        .rng
        .random_range(state.settings.min_hostile_speed..state.settings.max_hostile_speed)
        .floor();
    let vel = velocity_toward_field(&mut state.rng, pos, state.field, speed);
    let id = state.next_entity_id();
    state.push_event(GameEvent::HostileSpawned {
        id,
        label: spec.label.clone(),
        size,
        tier,
        pos,
        vel,
    });
    state.hostiles.push(Hostile {
        id,
        label: spec.label,
        size,
        health: size,
        tier,
        expiry_time: spec.expiry_time,
        pos,
        vel,
        alive: true,
    });
}

/// Spawn one pickup per released reward
pub fn spawn_pickups(state: &mut SimulationState, rewards: Vec<RewardSpec>) {
    for reward in rewards {
        spawn_pickup(state, reward);
    }
}

fn spawn_pickup(state: &mut SimulationState, reward: RewardSpec) {
    let pos = random_point_outside(&mut state.rng, state.field);
    let speed = state
        .rng
        .random_range(PICKUP_MIN_SPEED..PICKUP_MAX_SPEED)
        .floor();
    let vel = velocity_toward_field(&mut state.rng, pos, state.field, speed);
    let id = state.next_entity_id();
    state.push_event(GameEvent::PickupSpawned {
        id,
        kind: reward.kind,
        pos,
        vel,
    });
    state.pickups.push(Pickup {
        id,
        kind: reward.kind,
        name: reward.name,
        pos,
        vel,
    });
}

/// Spawn a floating feedback label at full opacity
pub fn spawn_label(state: &mut SimulationState, text: &str, pos: Vec2, source: Option<u32>) {
    let id = state.next_entity_id();
    state.push_event(GameEvent::LabelSpawned {
        id,
        text: text.to_owned(),
        pos,
    });
    state.labels.push(FloatingLabel {
        id,
        text: text.to_owned(),
        pos,
        alpha: 1.0,
        source,
    });
}

/// Pick an entry point just past a uniformly chosen field edge
fn random_point_outside(rng: &mut Pcg32, field: Vec2) -> Vec2 {
    let side: f32 = rng.random();
    if side < 0.25 {
        Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..field.y))
    } else if side < 0.5 {
        Vec2::new(field.x + SPAWN_MARGIN, rng.random_range(0.0..field.y))
    } else if side < 0.75 {
        Vec2::new(rng.random_range(0.0..field.x), -SPAWN_MARGIN)
    } else {
        Vec2::new(rng.random_range(0.0..field.x), field.y + SPAWN_MARGIN)
    }
}

/// Velocity of `speed` magnitude aimed at a random interior point
fn velocity_toward_field(rng: &mut Pcg32, from: Vec2, field: Vec2, speed: f32) -> Vec2 {
    let target = Vec2::new(
        rng.random_range(0.0..field.x),
        rng.random_range(0.0..field.y),
    );
    (target - from).normalize_or_zero() * speed
}
