//! Nullable asset ledger — an in-memory external ledger for testing.
//!
//! Models real external-ledger semantics for the token kind: every party
//! (including the engine's custody account) has a balance, pulls and pushes
//! move value between them, and a transfer with insufficient funds fails.
//! Pushes to chosen principals can be refused to drive failure-path tests.

use pledge_engine::{AssetTransfer, TransferError};
use pledge_types::{AssetId, Principal};
use std::collections::{HashMap, HashSet};

/// One observed transfer, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransferRecord {
    Pull {
        asset: AssetId,
        from: Principal,
        amount: u128,
    },
    Push {
        asset: AssetId,
        to: Principal,
        amount: u128,
    },
    PushNative {
        to: Principal,
        amount: u128,
    },
}

/// An in-memory asset ledger for testing.
#[derive(Default)]
pub struct NullLedger {
    native_accounts: HashMap<Principal, u128>,
    token_accounts: HashMap<(AssetId, Principal), u128>,
    custody_tokens: HashMap<AssetId, u128>,
    denied_pushes: HashSet<Principal>,
    deny_pulls: bool,
    /// Every successful transfer, in order.
    pub transfers: Vec<TransferRecord>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` of `asset` into a party's account.
    pub fn credit_token(&mut self, asset: &AssetId, owner: &Principal, amount: u128) {
        *self
            .token_accounts
            .entry((asset.clone(), owner.clone()))
            .or_default() += amount;
    }

    /// A party's token balance.
    pub fn token_balance_of(&self, asset: &AssetId, owner: &Principal) -> u128 {
        self.token_accounts
            .get(&(asset.clone(), owner.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// A party's native balance (only outbound native pushes land here).
    pub fn native_balance_of(&self, owner: &Principal) -> u128 {
        self.native_accounts.get(owner).copied().unwrap_or(0)
    }

    /// Token value currently held in the engine's custody account.
    pub fn custody_of(&self, asset: &AssetId) -> u128 {
        self.custody_tokens.get(asset).copied().unwrap_or(0)
    }

    /// Refuse every future push to `to`.
    pub fn deny_pushes_to(&mut self, to: Principal) {
        self.denied_pushes.insert(to);
    }

    /// Refuse every future pull.
    pub fn deny_pulls(&mut self) {
        self.deny_pulls = true;
    }
}

impl AssetTransfer for NullLedger {
    fn pull(
        &mut self,
        asset: &AssetId,
        from: &Principal,
        amount: u128,
    ) -> Result<(), TransferError> {
        if self.deny_pulls {
            return Err(TransferError::Rejected("pulls disabled".into()));
        }
        let key = (asset.clone(), from.clone());
        let balance = self.token_accounts.get(&key).copied().unwrap_or(0);
        if balance < amount {
            return Err(TransferError::InsufficientFunds);
        }
        self.token_accounts.insert(key, balance - amount);
        *self.custody_tokens.entry(asset.clone()).or_default() += amount;
        self.transfers.push(TransferRecord::Pull {
            asset: asset.clone(),
            from: from.clone(),
            amount,
        });
        Ok(())
    }

    fn push(
        &mut self,
        asset: &AssetId,
        to: &Principal,
        amount: u128,
    ) -> Result<(), TransferError> {
        if self.denied_pushes.contains(to) {
            return Err(TransferError::Rejected(format!("push to {to} refused")));
        }
        let held = self.custody_tokens.get(asset).copied().unwrap_or(0);
        if held < amount {
            return Err(TransferError::InsufficientFunds);
        }
        self.custody_tokens.insert(asset.clone(), held - amount);
        *self
            .token_accounts
            .entry((asset.clone(), to.clone()))
            .or_default() += amount;
        self.transfers.push(TransferRecord::Push {
            asset: asset.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    fn push_native(&mut self, to: &Principal, amount: u128) -> Result<(), TransferError> {
        if self.denied_pushes.contains(to) {
            return Err(TransferError::Rejected(format!("push to {to} refused")));
        }
        *self.native_accounts.entry(to.clone()).or_default() += amount;
        self.transfers.push(TransferRecord::PushNative {
            to: to.clone(),
            amount,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> AssetId {
        AssetId::new("usd-anchor")
    }

    #[test]
    fn pull_moves_tokens_into_custody() {
        let mut ledger = NullLedger::new();
        let bob = Principal::new("bob");
        ledger.credit_token(&usd(), &bob, 500);

        ledger.pull(&usd(), &bob, 200).unwrap();

        assert_eq!(ledger.token_balance_of(&usd(), &bob), 300);
        assert_eq!(ledger.custody_of(&usd()), 200);
    }

    #[test]
    fn pull_with_insufficient_funds_fails() {
        let mut ledger = NullLedger::new();
        let bob = Principal::new("bob");
        ledger.credit_token(&usd(), &bob, 100);

        let result = ledger.pull(&usd(), &bob, 200);
        assert_eq!(result, Err(TransferError::InsufficientFunds));
        assert_eq!(ledger.token_balance_of(&usd(), &bob), 100);
    }

    #[test]
    fn push_moves_tokens_out_of_custody() {
        let mut ledger = NullLedger::new();
        let bob = Principal::new("bob");
        let platform = Principal::new("platform");
        ledger.credit_token(&usd(), &bob, 500);
        ledger.pull(&usd(), &bob, 200).unwrap();

        ledger.push(&usd(), &platform, 5).unwrap();

        assert_eq!(ledger.custody_of(&usd()), 195);
        assert_eq!(ledger.token_balance_of(&usd(), &platform), 5);
    }

    #[test]
    fn denied_pushes_are_refused() {
        let mut ledger = NullLedger::new();
        let bob = Principal::new("bob");
        ledger.deny_pushes_to(bob.clone());

        assert!(ledger.push_native(&bob, 100).is_err());
        assert_eq!(ledger.native_balance_of(&bob), 0);
        assert!(ledger.transfers.is_empty());
    }
}
