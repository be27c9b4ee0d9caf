//! Timed release queues for resources and rewards
//!
//! Both queues release entries whose activation time is strictly before
//! the current timeline position, preserving payload order. The resource
//! queue additionally enforces the field population ceiling and filters
//! sub-threshold noise; the reward queue does neither.

use crate::payload::{ResourceSpec, RewardSpec};

/// Pending resources of the current level, plus everything already
/// consumed from it. Consumed entries (spawned and noise alike) feed the
/// level statistics at transition time.
#[derive(Debug, Clone, Default)]
pub struct ResourceQueue {
    pending: Vec<ResourceSpec>,
    consumed: Vec<ResourceSpec>,
}

impl ResourceQueue {
    /// Replace the queue contents for a fresh level
    pub fn load(&mut self, resources: Vec<ResourceSpec>) {
        self.pending = resources;
        self.consumed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Load-finish time of the first still-pending resource
    pub fn next_expiry(&self) -> Option<f64> {
        self.pending.first().map(|r| r.expiry_time)
    }

    pub fn consumed(&self) -> &[ResourceSpec] {
        &self.consumed
    }

    /// Release resources due before `now`, in payload order, returning
    /// the ones that should spawn hostiles.
    ///
    /// `capacity` is the number of free hostile slots. The ceiling check
    /// runs before each entry is classified, so once the returned batch
    /// fills it the scan stops and everything after it stays pending,
    /// noise included. Noise entries (raw kilobyte size under
    /// `noise_threshold`) are consumed without spawning and without
    /// using a slot. Entries not yet due are skipped in place.
    pub fn drain_due(
        &mut self,
        now: f64,
        capacity: usize,
        noise_threshold: Option<f64>,
    ) -> Vec<ResourceSpec> {
        let mut to_spawn = Vec::new();
        let mut kept = Vec::with_capacity(self.pending.len());
        let mut entries = std::mem::take(&mut self.pending).into_iter();

        for spec in entries.by_ref() {
            if to_spawn.len() >= capacity {
                kept.push(spec);
                break;
            }
            if spec.activation_time < now {
                let kilobytes = spec.transfer_size / 1000.0;
                if noise_threshold.is_some_and(|t| kilobytes < t) {
                    self.consumed.push(spec);
                } else {
                    self.consumed.push(spec.clone());
                    to_spawn.push(spec);
                }
            } else {
                kept.push(spec);
            }
        }
        kept.extend(entries);
        self.pending = kept;
        to_spawn
    }
}

/// Pending rewards for the whole run
#[derive(Debug, Clone, Default)]
pub struct RewardQueue {
    pending: Vec<RewardSpec>,
}

impl RewardQueue {
    pub fn new(rewards: Vec<RewardSpec>) -> Self {
        Self { pending: rewards }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Release rewards due before `now`, in payload order. Rewards have
    /// no population ceiling and no noise filter.
    pub fn drain_due(&mut self, now: f64) -> Vec<RewardSpec> {
        let mut due = Vec::new();
        self.pending.retain(|reward| {
            if reward.time < now {
                due.push(reward.clone());
                false
            } else {
                true
            }
        });
        due
    }
}
