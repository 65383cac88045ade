//! Asset-transfer capability — the engine's only seam to external value.
//!
//! The engine holds value "in custody" as an account on an external asset
//! ledger it does not control. Moving value into or out of that account is
//! delegated to an [`AssetTransfer`] implementation injected by the caller;
//! the external ledger is the source of truth for token balances.
//!
//! Native value never enters custody through this trait — it arrives attached
//! to the call that carries it. Only outbound native movement (fee
//! forwarding, faucet payouts, withdrawals) goes through [`push_native`].
//!
//! Each call is all-or-nothing on the external ledger: on `Err` the ledger
//! must be unchanged. The engine never assumes success silently.
//!
//! [`push_native`]: AssetTransfer::push_native

use pledge_types::{AssetId, Principal};
use thiserror::Error;

/// Failure reported by the external asset ledger.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TransferError {
    #[error("insufficient funds in the source account")]
    InsufficientFunds,

    #[error("transfer rejected by the asset ledger: {0}")]
    Rejected(String),
}

/// Capability for moving value between external parties and engine custody.
pub trait AssetTransfer {
    /// Move `amount` of `asset` from `from` into the engine's custody.
    fn pull(&mut self, asset: &AssetId, from: &Principal, amount: u128)
        -> Result<(), TransferError>;

    /// Move `amount` of `asset` out of the engine's custody to `to`.
    fn push(&mut self, asset: &AssetId, to: &Principal, amount: u128)
        -> Result<(), TransferError>;

    /// Move `amount` of native value out of the engine's custody to `to`.
    fn push_native(&mut self, to: &Principal, amount: u128) -> Result<(), TransferError>;
}
