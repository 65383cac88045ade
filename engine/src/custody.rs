//! The engine's bookkeeping of value it holds.
//!
//! The external asset ledger is the source of truth for token balances; this
//! book mirrors what the engine believes it holds so that reserve checks and
//! conservation audits need no external call.

use pledge_types::{AssetId, AssetKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-asset balances held by the engine: the native reserve plus one entry
/// per token asset ever observed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyBook {
    /// Native value held (faucet reserve plus net native donations).
    pub native: u128,
    /// Token value held, per asset identifier.
    pub tokens: HashMap<AssetId, u128>,
}

impl CustodyBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance for an asset kind (0 if never observed).
    pub fn balance(&self, asset: &AssetKind) -> u128 {
        match asset {
            AssetKind::Native => self.native,
            AssetKind::Token(id) => self.tokens.get(id).copied().unwrap_or(0),
        }
    }

    /// Overwrite the balance for an asset kind.
    ///
    /// Callers compute the new value with checked arithmetic before any
    /// external transfer; this only records the result.
    pub fn set_balance(&mut self, asset: &AssetKind, value: u128) {
        match asset {
            AssetKind::Native => self.native = value,
            AssetKind::Token(id) => {
                self.tokens.insert(id.clone(), value);
            }
        }
    }
}
