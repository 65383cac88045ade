//! PLEDGE — the promise-funding engine.
//!
//! One [`PledgeEngine`] instance owns the full funding state of a deployment:
//! the promise table, the per-donor donation ledger, reputation scores,
//! faucet claim records, and the custody book. Operations execute atomically;
//! a failed operation leaves no partial state behind.
//!
//! This crate handles:
//! - Promise creation and lookup (monotonic ids, never reused)
//! - Donation fee splitting (exact integer arithmetic, no value lost)
//! - Per-donor cumulative ledger bookkeeping across native and token assets
//! - One-shot fulfillment transitions
//! - Cooldown-gated faucet payouts from the native reserve
//! - Reputation accrual via a pluggable policy
//!
//! All external value movement goes through the [`AssetTransfer`] capability.
//! The discipline throughout is compute, transfer, then commit: every checked
//! computation happens before the first external call, and state commits only
//! once every required transfer has succeeded.

pub mod adapter;
pub mod custody;
pub mod engine;
pub mod error;
pub mod faucet;
pub mod fees;
pub mod promise;
pub mod reputation;

pub use adapter::{AssetTransfer, TransferError};
pub use custody::CustodyBook;
pub use engine::PledgeEngine;
pub use error::EngineError;
pub use faucet::FaucetGate;
pub use fees::{FeePolicy, FeeSplit};
pub use promise::{Promise, PromiseId};
pub use reputation::{FixedStep, PerUnit, ReputationBook, ReputationPolicy};
