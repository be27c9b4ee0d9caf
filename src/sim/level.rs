//! Level progression
//!
//! A level is done when its queue is drained and no hostile is left
//! alive. Statistics for the finished level are summed from its
//! consumed resources, never from the live field, so noise-filtered
//! entries still count toward the totals.

use super::events::{GameEvent, LevelStats};
use super::state::{GamePhase, SimulationState};

/// Enter the first level at or after `start_index` that has resources,
/// skipping exhausted ones. With none left the run is won, provided the
/// ship still has lives.
pub(super) fn enter_level(state: &mut SimulationState, start_index: usize) {
    let mut idx = start_index;
    while idx < state.levels.len() && state.levels[idx].resources.is_empty() {
        idx += 1;
    }
    if idx < state.levels.len() {
        state.level_index = idx;
        let resources = std::mem::take(&mut state.levels[idx].resources);
        state.resources.load(resources);
        state.push_event(GameEvent::LevelStarted {
            number: state.levels[idx].level_number,
            name: state.levels[idx].name.clone(),
        });
    } else if state.phase == GamePhase::Playing && state.ship.lives > 0 {
        state.phase = GamePhase::Won;
        state.push_event(GameEvent::GameWon { score: state.score });
    }
}

/// Advance past the current level once it is fully cleared. Runs every
/// tick; a loss earlier in the same tick takes precedence and blocks
/// the transition.
pub(super) fn check_level_transition(state: &mut SimulationState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    if !state.resources.is_empty() || state.live_hostiles() > 0 {
        return;
    }
    let level = &state.levels[state.level_index];
    let number = level.level_number;
    let name = level.name.clone();
    let stats = finished_level_stats(state);
    log::info!(
        "level {number} ({name}) cleared: {} resources, {:.0} bytes, score {}",
        stats.resource_count,
        stats.total_bytes,
        state.score
    );
    state.push_event(GameEvent::LevelFinished {
        number,
        name,
        stats,
    });
    enter_level(state, state.level_index + 1);
}

/// Aggregate the consumed resources of the level being closed out.
/// Wasted bytes only count resources with a known non-negative
/// coverage; the audit marks unattributable ones with a negative value.
fn finished_level_stats(state: &SimulationState) -> LevelStats {
    let consumed = state.resources.consumed();
    LevelStats {
        resource_count: consumed.len(),
        total_bytes: consumed.iter().map(|r| r.transfer_size).sum(),
        wasted_bytes: consumed
            .iter()
            .filter_map(|r| {
                r.coverage
                    .filter(|c| *c >= 0.0)
                    .map(|c| r.transfer_size * (100.0 - c) / 100.0)
            })
            .sum(),
        bootup_ms: consumed.iter().map(|r| r.bootup_time).sum(),
        load_time_ms: state.levels[state.level_index].time,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{GamePayload, LevelSpec, ResourceSpec};
    use crate::settings::Settings;
    use crate::sim::state::{CoverageTier, Hostile};
    use glam::Vec2;

    fn resource(bytes: f64, coverage: Option<f64>, bootup: f64) -> ResourceSpec {
        ResourceSpec {
            activation_time: 0.0,
            expiry_time: 100.0,
            transfer_size: bytes,
            coverage,
            label: "chunk.js".to_owned(),
            bootup_time: bootup,
        }
    }

    fn level(number: u32, time: f64, resources: Vec<ResourceSpec>) -> LevelSpec {
        LevelSpec {
            name: format!("Level {number}"),
            level_number: number,
            time,
            resources,
        }
    }

    fn state_with_levels(levels: Vec<LevelSpec>) -> SimulationState {
        let payload = GamePayload {
            levels,
            ..Default::default()
        };
        SimulationState::new(payload, Settings::desktop(), 3)
    }

    fn drain_all(state: &mut SimulationState) {
        let released = state.resources.drain_due(f64::MAX, usize::MAX, None);
        crate::sim::spawn::spawn_hostiles(state, released);
    }

    fn clear_field(state: &mut SimulationState) {
        state.hostiles.clear();
    }

    #[test]
    fn test_no_transition_while_queue_pending() {
        let mut state = state_with_levels(vec![
            level(1, 500.0, vec![resource(1000.0, None, 0.0)]),
            level(2, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        check_level_transition(&mut state);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn test_no_transition_while_hostiles_live() {
        let mut state = state_with_levels(vec![
            level(1, 500.0, vec![resource(1000.0, None, 0.0)]),
            level(2, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        drain_all(&mut state);
        assert_eq!(state.live_hostiles(), 1);
        check_level_transition(&mut state);
        assert_eq!(state.level_index, 0);
    }

    #[test]
    fn test_transition_advances_and_loads_next_queue() {
        let mut state = state_with_levels(vec![
            level(1, 500.0, vec![resource(1000.0, None, 0.0)]),
            level(2, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        drain_all(&mut state);
        clear_field(&mut state);
        check_level_transition(&mut state);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.resources.pending_len(), 1);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_transition_skips_empty_levels() {
        let mut state = state_with_levels(vec![
            level(1, 500.0, vec![resource(1000.0, None, 0.0)]),
            level(2, 600.0, vec![]),
            level(3, 700.0, vec![]),
            level(4, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        drain_all(&mut state);
        clear_field(&mut state);
        check_level_transition(&mut state);
        assert_eq!(state.level_index, 3);
        let started: Vec<u32> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::LevelStarted { number, .. } => Some(*number),
                _ => None,
            })
            .collect();
        assert_eq!(started, [1, 4]);
    }

    #[test]
    fn test_stats_summed_from_consumed_resources() {
        let mut state = state_with_levels(vec![
            level(
                1,
                1234.0,
                vec![
                    resource(40_000.0, Some(75.0), 120.0),
                    resource(5_000.0, None, 0.0),
                    resource(80_000.0, Some(-1.0), 30.0),
                ],
            ),
            level(2, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        drain_all(&mut state);
        clear_field(&mut state);
        check_level_transition(&mut state);
        let stats = state
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::LevelFinished { stats, .. } => Some(*stats),
                _ => None,
            })
            .unwrap();
        assert_eq!(stats.resource_count, 3);
        assert_eq!(stats.total_bytes, 125_000.0);
        assert_eq!(stats.wasted_bytes, 10_000.0);
        assert_eq!(stats.bootup_ms, 150.0);
        assert_eq!(stats.load_time_ms, 1234.0);
    }

    #[test]
    fn test_clearing_final_level_wins_with_lives_left() {
        let mut state = state_with_levels(vec![level(
            1,
            500.0,
            vec![resource(1000.0, None, 0.0)],
        )]);
        drain_all(&mut state);
        clear_field(&mut state);
        check_level_transition(&mut state);
        assert_eq!(state.phase, GamePhase::Won);
        let won = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameWon { .. }));
        assert!(won);
    }

    #[test]
    fn test_loss_takes_precedence_over_win() {
        let mut state = state_with_levels(vec![level(
            1,
            500.0,
            vec![resource(1000.0, None, 0.0)],
        )]);
        drain_all(&mut state);
        clear_field(&mut state);
        state.ship.lives = 0;
        state.phase = GamePhase::Lost;
        check_level_transition(&mut state);
        assert_eq!(state.phase, GamePhase::Lost);
    }

    #[test]
    fn test_noise_filtered_resources_still_count_in_stats() {
        let mut state = state_with_levels(vec![
            level(
                2,
                800.0,
                vec![
                    resource(500.0, Some(100.0), 0.0),
                    resource(60_000.0, Some(50.0), 0.0),
                ],
            ),
            level(3, 900.0, vec![resource(2000.0, None, 0.0)]),
        ]);
        let released = state
            .resources
            .drain_due(f64::MAX, usize::MAX, Some(1.0));
        assert_eq!(released.len(), 1);
        crate::sim::spawn::spawn_hostiles(&mut state, released);
        clear_field(&mut state);
        check_level_transition(&mut state);
        let stats = state
            .events
            .iter()
            .find_map(|e| match e {
                GameEvent::LevelFinished { stats, .. } => Some(*stats),
                _ => None,
            })
            .unwrap();
        assert_eq!(stats.resource_count, 2);
        assert_eq!(stats.total_bytes, 60_500.0);
    }

    #[test]
    fn test_hostile_with_pending_queue_blocks_even_when_due() {
        let mut state = state_with_levels(vec![level(
            1,
            500.0,
            vec![
                resource(1000.0, None, 0.0),
                resource(2000.0, None, 0.0),
            ],
        )]);
        let released = state.resources.drain_due(f64::MAX, 1, None);
        crate::sim::spawn::spawn_hostiles(&mut state, released);
        check_level_transition(&mut state);
        assert_eq!(state.level_index, 0);
        assert!(!state.resources.is_empty());
    }

    #[test]
    fn test_dead_hostiles_do_not_block_transition() {
        let mut state = state_with_levels(vec![level(
            1,
            500.0,
            vec![resource(1000.0, None, 0.0)],
        )]);
        drain_all(&mut state);
        state.hostiles.push(Hostile {
            id: 999,
            label: "dead.js".to_owned(),
            size: 40.0,
            health: 40.0,
            tier: CoverageTier::Unknown,
            expiry_time: 100.0,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            alive: true,
        });
        for hostile in &mut state.hostiles {
            hostile.alive = false;
        }
        check_level_transition(&mut state);
        assert_eq!(state.phase, GamePhase::Won);
    }
}
