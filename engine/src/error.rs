//! Engine-specific errors.

use pledge_store::StoreError;
use pledge_types::AssetKind;
use thiserror::Error;

use crate::adapter::TransferError;
use crate::promise::PromiseId;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("amount must be non-zero")]
    ZeroAmount,

    #[error("promise {0} not found")]
    PromiseNotFound(PromiseId),

    #[error("donation asset {offered} does not match the promise's asset {expected}")]
    AssetMismatch {
        expected: AssetKind,
        offered: AssetKind,
    },

    #[error("attached native value {attached} does not match the required {required}")]
    ValueMismatch { required: u128, attached: u128 },

    #[error("asset transfer failed: {0}")]
    TransferFailed(TransferError),

    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    #[error("promise {0} has already been fulfilled")]
    AlreadyFulfilled(PromiseId),

    #[error("faucet cooldown active: {remaining_secs}s until the next claim")]
    CooldownActive { remaining_secs: u64 },

    #[error("faucet reserve insufficient: need {needed}, available {available}")]
    InsufficientReserve { needed: u128, available: u128 },

    #[error("promise {0} has no withdrawable funds")]
    NothingToWithdraw(PromiseId),

    #[error("fee rate {0} exceeds 10000 basis points")]
    FeeRateOutOfRange(u32),

    #[error("arithmetic overflow in fund accounting")]
    Overflow,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
