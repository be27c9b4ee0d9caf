//! Headless timeline replay entry point
//!
//! Loads a gameplay payload, seeds the simulation and drives it with a
//! fixed-rate frame loop and a small autopilot until the run finishes.
//! Useful for checking payloads and watching the event stream without a
//! renderer attached.

use std::error::Error;
use std::path::PathBuf;

use load_raider::consts::*;
use load_raider::normalize_angle;
use load_raider::sim::{GameEvent, GamePhase, SimulationState, TickInput, TimelineClock, tick};
use load_raider::{GamePayload, Profile, Settings};

const DEMO_PAYLOAD: &str = include_str!("../demos/sample-audit.json");

/// Frame the scripted pause starts on, and the frame it lifts
const PAUSE_SPAN: (u64, u64) = (600, 780);

struct Args {
    payload: Option<PathBuf>,
    seed: u64,
    profile: Profile,
    max_frames: u64,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        log::error!("fatal: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let json = match &args.payload {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEMO_PAYLOAD.to_owned(),
    };
    let payload = GamePayload::from_json(&json)?;
    let settings = Settings::from_profile(args.profile);
    log::info!(
        "replaying {} levels, {} rewards ({} profile, seed {})",
        payload.levels.len(),
        payload.powerups.len(),
        args.profile.as_str(),
        args.seed
    );

    let mut state = SimulationState::new(payload, settings, args.seed);
    for event in state.take_events() {
        report(&event);
    }

    // Synthetic frame clock; one scripted pause stretch exercises the
    // paused-time exclusion
    let mut now = 0.0;
    let mut clock = TimelineClock::new(now);
    let mut last_elapsed = 0.0;
    let mut accumulator = 0.0f32;
    let mut frame: u64 = 0;
    while frame < args.max_frames && state.phase == GamePhase::Playing {
        frame += 1;
        now += TICK_MS;
        if frame == PAUSE_SPAN.0 {
            clock.pause(now);
            log::debug!("paused at frame {frame}");
        } else if frame == PAUSE_SPAN.1 {
            clock.resume(now);
            log::debug!("resumed at frame {frame}");
        }

        let elapsed = clock.elapsed(now);
        let dt = (((elapsed - last_elapsed) / 1000.0) as f32).min(0.1);
        last_elapsed = elapsed;
        accumulator += dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
        for event in state.take_events() {
            report(&event);
        }
    }

    let outcome = match state.phase {
        GamePhase::Won => "won",
        GamePhase::Lost => "lost",
        GamePhase::Playing => "unfinished",
    };
    println!(
        "{outcome}: score {} after {:.1}s of game time, {} lives left",
        state.score,
        state.time_ms / 1000.0,
        state.ship.lives
    );
    Ok(())
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut args = Args {
        payload: None,
        seed: time_seed(),
        profile: Profile::Desktop,
        max_frames: 36_000,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = value.parse()?;
            }
            "--profile" => {
                let value = iter.next().ok_or("--profile needs a value")?;
                args.profile = Profile::from_str(&value)
                    .ok_or_else(|| format!("unknown profile: {value}"))?;
            }
            "--frames" => {
                let value = iter.next().ok_or("--frames needs a value")?;
                args.max_frames = value.parse()?;
            }
            "--help" | "-h" => {
                println!(
                    "usage: load-raider [payload.json] [--seed N] [--profile desktop|mobile] [--frames N]"
                );
                std::process::exit(0);
            }
            _ if arg.starts_with("--") => {
                return Err(format!("unknown flag: {arg}").into());
            }
            _ => args.payload = Some(PathBuf::from(arg)),
        }
    }
    Ok(args)
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Point at the nearest hostile, close distance, shoot once lined up
fn autopilot(state: &SimulationState) -> TickInput {
    let ship = &state.ship;
    let nearest = state.hostiles.iter().filter(|h| h.alive).min_by(|a, b| {
        a.pos
            .distance_squared(ship.pos)
            .total_cmp(&b.pos.distance_squared(ship.pos))
    });
    let Some(target) = nearest else {
        return TickInput::default();
    };
    let offset = target.pos - ship.pos;
    let aim_error = normalize_angle(offset.y.atan2(offset.x) - ship.rotation);
    TickInput {
        turn_left: aim_error < -0.05,
        turn_right: aim_error > 0.05,
        thrust: offset.length() > 260.0,
        fire: aim_error.abs() < 0.25,
    }
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::LevelStarted { number, name } => {
            log::info!("level {number} start: {}", name.replace('\n', " "));
        }
        GameEvent::LevelFinished { number, stats, .. } => {
            log::info!(
                "level {number} done: {} resources, {:.1} KB total, {:.1} KB wasted, {:.0}ms bootup, {:.0}ms load",
                stats.resource_count,
                stats.total_bytes / 1000.0,
                stats.wasted_bytes / 1000.0,
                stats.bootup_ms,
                stats.load_time_ms,
            );
        }
        GameEvent::HostileSpawned { label, size, tier, .. } => {
            log::debug!("hostile up: {label} ({size:.0}px, {})", tier.as_str());
        }
        GameEvent::HostileDestroyed { score_awarded, .. } if *score_awarded > 0 => {
            log::debug!("hostile down, +{score_awarded}");
        }
        GameEvent::PickupCollected { name, .. } => log::info!("picked up {name}"),
        GameEvent::ShipHit { lives_left } => log::info!("ship hit, {lives_left} lives left"),
        GameEvent::GameWon { score } => log::info!("page fully loaded, final score {score}"),
        GameEvent::GameLost { score } => log::info!("out of lives at score {score}"),
        _ => {}
    }
}
