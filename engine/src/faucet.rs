//! Cooldown-gated faucet.
//!
//! Each principal may receive the fixed payout at most once per cooldown
//! window. The claim timestamp is recorded only after the payout transfer has
//! succeeded, so a failed payout never consumes the principal's window.

use pledge_types::{Principal, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EngineError;

/// Faucet configuration plus the per-principal claim history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FaucetGate {
    /// Fixed native payout per successful claim (raw units).
    pub payout: u128,
    /// Minimum seconds between two successful claims by one principal.
    pub cooldown_secs: u64,
    /// Timestamp of each principal's most recent successful claim.
    pub last_claim: HashMap<Principal, Timestamp>,
}

impl FaucetGate {
    pub fn new(payout: u128, cooldown_secs: u64) -> Self {
        Self {
            payout,
            cooldown_secs,
            last_claim: HashMap::new(),
        }
    }

    /// Check the cooldown precondition for `caller` at `now`.
    ///
    /// Evaluated fresh on every entry; callers that are refused must wait out
    /// the reported remainder rather than retrying immediately.
    pub fn check(&self, caller: &Principal, now: Timestamp) -> Result<(), EngineError> {
        match self.last_claim.get(caller) {
            None => Ok(()),
            Some(last) if last.has_expired(self.cooldown_secs, now) => Ok(()),
            Some(last) => Err(EngineError::CooldownActive {
                remaining_secs: last.remaining(self.cooldown_secs, now),
            }),
        }
    }

    /// Record a successful claim. Called only after the payout transfer.
    pub fn record_claim(&mut self, caller: &Principal, now: Timestamp) {
        self.last_claim.insert(caller.clone(), now);
    }

    /// Most recent successful claim by `caller`, if any.
    pub fn last_claim_of(&self, caller: &Principal) -> Option<Timestamp> {
        self.last_claim.get(caller).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> FaucetGate {
        FaucetGate::new(1_000, 86_400)
    }

    #[test]
    fn first_claim_passes() {
        let gate = gate();
        assert!(gate.check(&Principal::new("bob"), Timestamp::new(0)).is_ok());
    }

    #[test]
    fn claim_within_cooldown_reports_remaining_wait() {
        let mut gate = gate();
        let bob = Principal::new("bob");
        gate.record_claim(&bob, Timestamp::new(1_000));

        match gate.check(&bob, Timestamp::new(2_000)) {
            Err(EngineError::CooldownActive { remaining_secs }) => {
                assert_eq!(remaining_secs, 86_400 - 1_000);
            }
            other => panic!("expected CooldownActive, got {:?}", other),
        }
    }

    #[test]
    fn claim_at_exact_cooldown_boundary_passes() {
        let mut gate = gate();
        let bob = Principal::new("bob");
        gate.record_claim(&bob, Timestamp::new(1_000));

        assert!(gate.check(&bob, Timestamp::new(1_000 + 86_399)).is_err());
        assert!(gate.check(&bob, Timestamp::new(1_000 + 86_400)).is_ok());
    }

    #[test]
    fn cooldowns_are_tracked_per_principal() {
        let mut gate = gate();
        let bob = Principal::new("bob");
        let carol = Principal::new("carol");
        gate.record_claim(&bob, Timestamp::new(1_000));

        assert!(gate.check(&bob, Timestamp::new(1_001)).is_err());
        assert!(gate.check(&carol, Timestamp::new(1_001)).is_ok());
    }

    #[test]
    fn record_overwrites_previous_claim() {
        let mut gate = gate();
        let bob = Principal::new("bob");
        gate.record_claim(&bob, Timestamp::new(1_000));
        gate.record_claim(&bob, Timestamp::new(90_000));
        assert_eq!(gate.last_claim_of(&bob), Some(Timestamp::new(90_000)));
    }
}
