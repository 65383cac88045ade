//! Engine parameters — fixed at construction, immutable for the engine's
//! entire operational lifetime.

use crate::principal::Principal;
use serde::{Deserialize, Serialize};

/// Number of raw units in one whole native coin.
pub const NATIVE_UNIT: u128 = 1_000_000_000_000_000_000;

/// The denominator of the fee rate: 10000 basis points = 100%.
pub const MAX_FEE_BPS: u32 = 10_000;

/// All engine parameters, set once when the engine is constructed.
///
/// There is no governance over these values after construction; changing the
/// fee rate means deploying a new engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineParams {
    /// Platform fee taken from every donation, in basis points (0–10000).
    pub fee_bps: u32,

    /// Principal that receives the platform fee on every donation.
    pub fee_recipient: Principal,

    /// Principal allowed to fulfill any promise, alongside its creator.
    pub administrator: Principal,

    /// Fixed native payout per successful faucet claim (raw units).
    pub faucet_amount: u128,

    /// Minimum seconds between two successful faucet claims by one principal.
    pub faucet_cooldown_secs: u64,
}

impl EngineParams {
    /// The reference configuration: 2.5% fee, 0.01 native faucet payout,
    /// 24-hour faucet cooldown.
    pub fn reference(fee_recipient: Principal, administrator: Principal) -> Self {
        Self {
            fee_bps: 250,
            fee_recipient,
            administrator,
            faucet_amount: NATIVE_UNIT / 100,
            faucet_cooldown_secs: 24 * 3600,
        }
    }

    /// Whether the fee rate is within the representable range.
    pub fn fee_rate_in_range(&self) -> bool {
        self.fee_bps <= MAX_FEE_BPS
    }
}
