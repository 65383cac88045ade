//! Platform fee computation.
//!
//! The fee is taken per donation on the gross amount, never on running
//! totals, so many small donations and one large donation of the same total
//! pay the same aggregate fee up to at most one raw unit of rounding per
//! donation call.

use pledge_types::params::MAX_FEE_BPS;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Result of splitting a gross donation into fee and net.
///
/// Invariant: `fee + net == gross`, exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    /// The platform's cut, rounded toward zero.
    pub fee: u128,
    /// The amount credited to the donor's ledger entry.
    pub net: u128,
}

/// Pure fee arithmetic at a fixed basis-point rate.
///
/// Performs no transfers and touches no state — callers move the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    bps: u32,
}

impl FeePolicy {
    /// Create a policy. The rate must not exceed 10000 basis points.
    pub fn new(bps: u32) -> Result<Self, EngineError> {
        if bps > MAX_FEE_BPS {
            return Err(EngineError::FeeRateOutOfRange(bps));
        }
        Ok(Self { bps })
    }

    /// The configured rate in basis points.
    pub fn bps(&self) -> u32 {
        self.bps
    }

    /// Split `gross` into `(fee, net)` with `fee = floor(gross * bps / 10000)`.
    ///
    /// Integer arithmetic only; the multiply is checked so an absurd gross
    /// fails instead of wrapping.
    pub fn split(&self, gross: u128) -> Result<FeeSplit, EngineError> {
        if gross == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let fee = gross
            .checked_mul(self.bps as u128)
            .ok_or(EngineError::Overflow)?
            / MAX_FEE_BPS as u128;
        // fee <= gross because bps <= 10000.
        Ok(FeeSplit {
            fee,
            net: gross - fee,
        })
    }
}
