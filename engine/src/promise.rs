//! Promise records.

use pledge_types::{AssetKind, Principal};
use serde::{Deserialize, Serialize};

/// Unique promise identifier, assigned monotonically from 1 and never reused.
pub type PromiseId = u64;

/// A funding request posted by a principal.
///
/// Everything except `fulfilled`, `fulfiller`, `raised_net` and `withdrawn`
/// is fixed at creation. The asset kind in particular never changes — every
/// donation must match it exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promise {
    pub id: PromiseId,
    /// Principal that posted the request and may withdraw collected funds.
    pub creator: Principal,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Opaque media reference (e.g. a content hash). May be empty.
    pub media_ref: String,
    /// The one asset this promise accepts.
    pub asset: AssetKind,
    /// Target amount in the asset's smallest unit. Donations past the target
    /// are still accepted; the engine never auto-closes at the target.
    pub amount_requested: u128,
    /// Display flag, stored but without behavioral effect in the engine.
    pub visible: bool,
    /// One-way flag; set exactly once, together with `fulfiller`.
    pub fulfilled: bool,
    /// The principal credited with fulfilling the promise.
    pub fulfiller: Option<Principal>,
    /// Cumulative net value credited across all donors.
    pub raised_net: u128,
    /// Cumulative value already released to the creator.
    pub withdrawn: u128,
}

impl Promise {
    /// Whether the promise can still be fulfilled.
    pub fn is_open(&self) -> bool {
        !self.fulfilled
    }

    /// Collected net value not yet released to the creator.
    pub fn withdrawable(&self) -> u128 {
        self.raised_net.saturating_sub(self.withdrawn)
    }
}
