//! Donor reputation.
//!
//! Reputation is a process-wide accumulator across all promises: every
//! successful donation earns the donor a positive score increment. How large
//! the increment is lives behind [`ReputationPolicy`] so it can be swapped at
//! engine construction without touching ledger logic.

use pledge_types::Principal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Policy deciding how much reputation a successful donation earns.
pub trait ReputationPolicy {
    /// Score increment for a donation of `gross`, of which `net` was
    /// credited. Must be positive — reputation becomes non-zero after one
    /// donation.
    fn donation_score(&self, gross: u128, net: u128) -> u64;
}

/// The default policy: a fixed +1 per successful donation, independent of
/// size.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedStep;

impl ReputationPolicy for FixedStep {
    fn donation_score(&self, _gross: u128, _net: u128) -> u64 {
        1
    }
}

/// Size-weighted alternative: one point per whole `unit` of net value
/// donated, with a floor of one point so every donation counts.
#[derive(Clone, Copy, Debug)]
pub struct PerUnit {
    pub unit: u128,
}

impl ReputationPolicy for PerUnit {
    fn donation_score(&self, _gross: u128, net: u128) -> u64 {
        let points = net / self.unit.max(1);
        points.clamp(1, u64::MAX as u128) as u64
    }
}

/// Per-principal reputation scores; monotonically non-decreasing.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReputationBook {
    scores: HashMap<Principal, u64>,
}

impl ReputationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current score (0 if the principal has never donated).
    pub fn score_of(&self, principal: &Principal) -> u64 {
        self.scores.get(principal).copied().unwrap_or(0)
    }

    /// Overwrite a principal's score with a precomputed value.
    pub fn set_score(&mut self, principal: Principal, score: u64) {
        self.scores.insert(principal, score);
    }
}
