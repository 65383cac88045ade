//! The funding engine — owns all state, executes all operations.
//!
//! Operations take `&mut self`, so one engine instance processes one
//! operation at a time; the embedding platform supplies the serialization.
//! The [`AssetTransfer`] capability receives no handle back into the engine,
//! so external code reached during a transfer cannot observe or mutate
//! mid-operation state.
//!
//! Every operation follows the same discipline: validate, compute the entire
//! post-state with checked arithmetic, perform the required external
//! transfers, and only then commit. A failure at any point leaves the engine
//! exactly as it was.

use std::collections::HashMap;

use pledge_store::{EngineStore, StoreError};
use pledge_types::{AssetKind, EngineParams, Principal, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapter::AssetTransfer;
use crate::custody::CustodyBook;
use crate::error::EngineError;
use crate::faucet::FaucetGate;
use crate::fees::FeePolicy;
use crate::promise::{Promise, PromiseId};
use crate::reputation::{FixedStep, ReputationBook, ReputationPolicy};

const META_PARAMS: &[u8] = b"params";
const META_NEXT_PROMISE_ID: &[u8] = b"next_promise_id";
const META_PROMISES: &[u8] = b"promises";
const META_DONATIONS: &[u8] = b"donations";
const META_REPUTATION: &[u8] = b"reputation";
const META_FAUCET_CLAIMS: &[u8] = b"faucet_claims";
const META_CUSTODY: &[u8] = b"custody";
const META_FEES_FORWARDED: &[u8] = b"fees_forwarded";

/// One deployment's complete funding state.
pub struct PledgeEngine {
    params: EngineParams,
    fees: FeePolicy,
    next_promise_id: PromiseId,
    promises: HashMap<PromiseId, Promise>,
    /// Cumulative net credited per (promise, donor).
    donations: HashMap<(PromiseId, Principal), u128>,
    reputation: ReputationBook,
    reputation_policy: Box<dyn ReputationPolicy>,
    faucet: FaucetGate,
    custody: CustodyBook,
    /// Cumulative fees forwarded to the fee recipient, per asset.
    fees_forwarded: CustodyBook,
}

impl PledgeEngine {
    /// Construct an engine with the given parameters and the default
    /// reputation policy (+1 per donation).
    pub fn new(params: EngineParams) -> Result<Self, EngineError> {
        let fees = FeePolicy::new(params.fee_bps)?;
        let faucet = FaucetGate::new(params.faucet_amount, params.faucet_cooldown_secs);
        Ok(Self {
            params,
            fees,
            next_promise_id: 1,
            promises: HashMap::new(),
            donations: HashMap::new(),
            reputation: ReputationBook::new(),
            reputation_policy: Box::new(FixedStep),
            faucet,
            custody: CustodyBook::new(),
            fees_forwarded: CustodyBook::new(),
        })
    }

    /// Swap the reputation policy. Ledger logic is unaffected.
    pub fn with_reputation_policy(mut self, policy: Box<dyn ReputationPolicy>) -> Self {
        self.reputation_policy = policy;
        self
    }

    // ── Promise registry ─────────────────────────────────────────────────

    /// Post a new funding request. Any principal may create one.
    #[allow(clippy::too_many_arguments)]
    pub fn create_promise(
        &mut self,
        creator: Principal,
        title: String,
        description: String,
        category: String,
        media_ref: String,
        asset: AssetKind,
        amount_requested: u128,
        visible: bool,
    ) -> Result<PromiseId, EngineError> {
        if amount_requested == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let id = self.next_promise_id;
        let next = id.checked_add(1).ok_or(EngineError::Overflow)?;
        let promise = Promise {
            id,
            creator,
            title,
            description,
            category,
            media_ref,
            asset,
            amount_requested,
            visible,
            fulfilled: false,
            fulfiller: None,
            raised_net: 0,
            withdrawn: 0,
        };
        info!(
            promise = id,
            creator = %promise.creator,
            asset = %promise.asset,
            requested = amount_requested,
            "promise created"
        );
        self.next_promise_id = next;
        self.promises.insert(id, promise);
        Ok(id)
    }

    // ── Donation ledger ──────────────────────────────────────────────────

    /// Donate `gross` to a promise; returns the net amount credited.
    ///
    /// `attached_value` is the native value accompanying the call: for a
    /// native-kind promise it must equal `gross` exactly; for a token-kind
    /// promise it must be zero, and the gross is instead pulled from the
    /// donor through `ledger`.
    ///
    /// The fee is forwarded to the fee recipient before anything is credited;
    /// a failed fee forward fails the whole donation. For the token kind a
    /// gross already pulled is handed back to the donor in that case.
    pub fn donate(
        &mut self,
        ledger: &mut dyn AssetTransfer,
        id: PromiseId,
        asset: AssetKind,
        gross: u128,
        attached_value: u128,
        donor: &Principal,
    ) -> Result<u128, EngineError> {
        if gross == 0 {
            return Err(EngineError::ZeroAmount);
        }
        let promise = self
            .promises
            .get(&id)
            .ok_or(EngineError::PromiseNotFound(id))?;
        if promise.asset != asset {
            return Err(EngineError::AssetMismatch {
                expected: promise.asset.clone(),
                offered: asset,
            });
        }
        match &asset {
            AssetKind::Native => {
                if attached_value != gross {
                    return Err(EngineError::ValueMismatch {
                        required: gross,
                        attached: attached_value,
                    });
                }
            }
            AssetKind::Token(_) => {
                if attached_value != 0 {
                    return Err(EngineError::ValueMismatch {
                        required: 0,
                        attached: attached_value,
                    });
                }
            }
        }

        // Compute the entire post-state before the first external call.
        let split = self.fees.split(gross)?;
        let key = (id, donor.clone());
        let entry_after = self
            .donations
            .get(&key)
            .copied()
            .unwrap_or(0)
            .checked_add(split.net)
            .ok_or(EngineError::Overflow)?;
        let raised_after = promise
            .raised_net
            .checked_add(split.net)
            .ok_or(EngineError::Overflow)?;
        let custody_after = self
            .custody
            .balance(&asset)
            .checked_add(split.net)
            .ok_or(EngineError::Overflow)?;
        let forwarded_after = self
            .fees_forwarded
            .balance(&asset)
            .checked_add(split.fee)
            .ok_or(EngineError::Overflow)?;
        let points = self.reputation_policy.donation_score(gross, split.net);
        let score_after = self
            .reputation
            .score_of(donor)
            .checked_add(points)
            .ok_or(EngineError::Overflow)?;

        // External transfers. Native value arrived attached to the call, so
        // only the fee moves; a token gross is pulled first.
        match &asset {
            AssetKind::Native => {
                if split.fee > 0 {
                    ledger
                        .push_native(&self.params.fee_recipient, split.fee)
                        .map_err(EngineError::TransferFailed)?;
                }
            }
            AssetKind::Token(token) => {
                ledger
                    .pull(token, donor, gross)
                    .map_err(EngineError::TransferFailed)?;
                if split.fee > 0 {
                    if let Err(err) = ledger.push(token, &self.params.fee_recipient, split.fee) {
                        // The gross already sits in custody on the external
                        // ledger; hand it back before reporting failure.
                        if let Err(refund_err) = ledger.push(token, donor, gross) {
                            warn!(
                                promise = id,
                                donor = %donor,
                                %refund_err,
                                "compensating refund failed; gross stranded in custody"
                            );
                        }
                        return Err(EngineError::TransferFailed(err));
                    }
                }
            }
        }

        // Commit — no further external calls from here on.
        self.donations.insert(key, entry_after);
        let promise = self
            .promises
            .get_mut(&id)
            .ok_or(EngineError::PromiseNotFound(id))?;
        promise.raised_net = raised_after;
        self.custody.set_balance(&asset, custody_after);
        self.fees_forwarded.set_balance(&asset, forwarded_after);
        self.reputation.set_score(donor.clone(), score_after);
        info!(
            promise = id,
            donor = %donor,
            gross,
            net = split.net,
            fee = split.fee,
            "donation credited"
        );
        Ok(split.net)
    }

    // ── Fulfillment ──────────────────────────────────────────────────────

    /// Mark a promise fulfilled, crediting `fulfiller`. Only the promise's
    /// creator or the engine administrator may call this; the transition is
    /// one-shot and moves no value.
    pub fn fulfill(
        &mut self,
        id: PromiseId,
        fulfiller: Principal,
        caller: &Principal,
    ) -> Result<(), EngineError> {
        let promise = self
            .promises
            .get_mut(&id)
            .ok_or(EngineError::PromiseNotFound(id))?;
        if *caller != promise.creator && *caller != self.params.administrator {
            return Err(EngineError::NotAuthorized);
        }
        if promise.fulfilled {
            return Err(EngineError::AlreadyFulfilled(id));
        }
        info!(promise = id, fulfiller = %fulfiller, caller = %caller, "promise fulfilled");
        promise.fulfilled = true;
        promise.fulfiller = Some(fulfiller);
        Ok(())
    }

    // ── Faucet ───────────────────────────────────────────────────────────

    /// Pay the fixed faucet amount to `caller`, subject to the cooldown.
    ///
    /// The claim timestamp commits only after the payout transfer succeeds;
    /// a refused payout leaves the caller free to retry once the reserve is
    /// replenished.
    pub fn claim_faucet(
        &mut self,
        ledger: &mut dyn AssetTransfer,
        caller: &Principal,
        now: Timestamp,
    ) -> Result<u128, EngineError> {
        self.faucet.check(caller, now)?;
        let payout = self.faucet.payout;
        let available = self.custody.native;
        if available < payout {
            return Err(EngineError::InsufficientReserve {
                needed: payout,
                available,
            });
        }
        let native_after = available - payout;
        if let Err(err) = ledger.push_native(caller, payout) {
            debug!(caller = %caller, %err, "faucet payout refused by the asset ledger");
            return Err(EngineError::InsufficientReserve {
                needed: payout,
                available,
            });
        }
        self.custody.native = native_after;
        self.faucet.record_claim(caller, now);
        info!(caller = %caller, amount = payout, "faucet claim paid");
        Ok(payout)
    }

    /// Credit attached native value to the faucet reserve.
    pub fn fund_reserve(&mut self, attached_value: u128) -> Result<(), EngineError> {
        if attached_value == 0 {
            return Err(EngineError::ZeroAmount);
        }
        self.custody.native = self
            .custody
            .native
            .checked_add(attached_value)
            .ok_or(EngineError::Overflow)?;
        debug!(amount = attached_value, reserve = self.custody.native, "reserve funded");
        Ok(())
    }

    // ── Withdrawal ───────────────────────────────────────────────────────

    /// Release a promise's collected net funds to its creator; returns the
    /// amount released. Available at any time — fulfillment is a separate,
    /// purely record-keeping act.
    pub fn withdraw(
        &mut self,
        ledger: &mut dyn AssetTransfer,
        id: PromiseId,
        caller: &Principal,
    ) -> Result<u128, EngineError> {
        let promise = self
            .promises
            .get(&id)
            .ok_or(EngineError::PromiseNotFound(id))?;
        if *caller != promise.creator {
            return Err(EngineError::NotAuthorized);
        }
        let amount = promise.withdrawable();
        if amount == 0 {
            return Err(EngineError::NothingToWithdraw(id));
        }
        let asset = promise.asset.clone();
        let withdrawn_after = promise
            .withdrawn
            .checked_add(amount)
            .ok_or(EngineError::Overflow)?;
        let custody_after = self
            .custody
            .balance(&asset)
            .checked_sub(amount)
            .ok_or(EngineError::Overflow)?;

        match &asset {
            AssetKind::Native => ledger.push_native(caller, amount),
            AssetKind::Token(token) => ledger.push(token, caller, amount),
        }
        .map_err(EngineError::TransferFailed)?;

        let promise = self
            .promises
            .get_mut(&id)
            .ok_or(EngineError::PromiseNotFound(id))?;
        promise.withdrawn = withdrawn_after;
        self.custody.set_balance(&asset, custody_after);
        info!(promise = id, creator = %caller, amount, "collected funds withdrawn");
        Ok(amount)
    }

    // ── Reads ────────────────────────────────────────────────────────────

    pub fn params(&self) -> &EngineParams {
        &self.params
    }

    /// Look up a promise record.
    pub fn promise(&self, id: PromiseId) -> Result<&Promise, EngineError> {
        self.promises
            .get(&id)
            .ok_or(EngineError::PromiseNotFound(id))
    }

    /// Cumulative net donated by `donor` to promise `id` (0 if none).
    pub fn donation_of(&self, id: PromiseId, donor: &Principal) -> u128 {
        self.donations
            .get(&(id, donor.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Reputation score of a principal (0 if they never donated).
    pub fn reputation_of(&self, principal: &Principal) -> u64 {
        self.reputation.score_of(principal)
    }

    /// Timestamp of a principal's most recent successful faucet claim.
    pub fn last_claim_of(&self, principal: &Principal) -> Option<Timestamp> {
        self.faucet.last_claim_of(principal)
    }

    /// The engine's bookkeeping of value it holds.
    pub fn custody(&self) -> &CustodyBook {
        &self.custody
    }

    /// Cumulative fees forwarded to the fee recipient, per asset.
    pub fn fees_forwarded(&self) -> &CustodyBook {
        &self.fees_forwarded
    }

    // ── Persistence ──────────────────────────────────────────────────────

    /// Persist the engine's logical state to a store.
    pub fn save_to_store(&self, store: &dyn EngineStore) -> Result<(), EngineError> {
        store.put_meta(META_PARAMS, &encode(&self.params)?)?;
        store.put_meta(META_NEXT_PROMISE_ID, &self.next_promise_id.to_be_bytes())?;
        store.put_meta(META_PROMISES, &encode(&self.promises)?)?;
        store.put_meta(META_DONATIONS, &encode(&self.donations)?)?;
        store.put_meta(META_REPUTATION, &encode(&self.reputation)?)?;
        store.put_meta(META_FAUCET_CLAIMS, &encode(&self.faucet.last_claim)?)?;
        store.put_meta(META_CUSTODY, &encode(&self.custody)?)?;
        store.put_meta(META_FEES_FORWARDED, &encode(&self.fees_forwarded)?)?;
        Ok(())
    }

    /// Restore an engine from a store, with the default reputation policy.
    pub fn load_from_store(store: &dyn EngineStore) -> Result<Self, EngineError> {
        let params_bytes = store
            .get_meta(META_PARAMS)?
            .ok_or_else(|| StoreError::NotFound("params".into()))?;
        let params: EngineParams = decode(&params_bytes)?;
        let mut engine = Self::new(params)?;

        if let Some(bytes) = store.get_meta(META_NEXT_PROMISE_ID)? {
            if bytes.len() >= 8 {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(&bytes[..8]);
                engine.next_promise_id = u64::from_be_bytes(buf);
            }
        }
        if let Some(bytes) = store.get_meta(META_PROMISES)? {
            engine.promises = decode(&bytes)?;
        }
        if let Some(bytes) = store.get_meta(META_DONATIONS)? {
            engine.donations = decode(&bytes)?;
        }
        if let Some(bytes) = store.get_meta(META_REPUTATION)? {
            engine.reputation = decode(&bytes)?;
        }
        if let Some(bytes) = store.get_meta(META_FAUCET_CLAIMS)? {
            engine.faucet.last_claim = decode(&bytes)?;
        }
        if let Some(bytes) = store.get_meta(META_CUSTODY)? {
            engine.custody = decode(&bytes)?;
        }
        if let Some(bytes) = store.get_meta(META_FEES_FORWARDED)? {
            engine.fees_forwarded = decode(&bytes)?;
        }
        Ok(engine)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, EngineError> {
    bincode::serialize(value)
        .map_err(|e| EngineError::Storage(StoreError::Serialization(e.to_string())))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, EngineError> {
    bincode::deserialize(bytes)
        .map_err(|e| EngineError::Storage(StoreError::Serialization(e.to_string())))
}
