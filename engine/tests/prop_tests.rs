use proptest::collection::vec;
use proptest::prelude::*;

use pledge_engine::{AssetTransfer, FeePolicy, PledgeEngine, TransferError};
use pledge_types::{AssetId, AssetKind, EngineParams, Principal, Timestamp};

/// Ledger double that accepts every transfer.
struct SinkLedger;

impl AssetTransfer for SinkLedger {
    fn pull(&mut self, _: &AssetId, _: &Principal, _: u128) -> Result<(), TransferError> {
        Ok(())
    }
    fn push(&mut self, _: &AssetId, _: &Principal, _: u128) -> Result<(), TransferError> {
        Ok(())
    }
    fn push_native(&mut self, _: &Principal, _: u128) -> Result<(), TransferError> {
        Ok(())
    }
}

fn engine_with(fee_bps: u32, faucet_amount: u128, cooldown_secs: u64) -> PledgeEngine {
    PledgeEngine::new(EngineParams {
        fee_bps,
        fee_recipient: Principal::new("platform"),
        administrator: Principal::new("ops"),
        faucet_amount,
        faucet_cooldown_secs: cooldown_secs,
    })
    .expect("valid params")
}

proptest! {
    /// The fee split conserves value exactly and floors toward zero.
    #[test]
    fn split_conserves_value(
        gross in 1u128..=u128::from(u64::MAX),
        bps in 0u32..=10_000,
    ) {
        let policy = FeePolicy::new(bps).unwrap();
        let s = policy.split(gross).unwrap();
        prop_assert_eq!(s.fee + s.net, gross);
        prop_assert_eq!(s.fee, gross * bps as u128 / 10_000);
        prop_assert!(s.fee <= gross);
    }

    /// A donor's ledger entry is always the exact sum of per-donation nets —
    /// the fee is never re-applied to the running total.
    #[test]
    fn ledger_accumulates_exact_nets(
        amounts in vec(1u128..1_000_000_000, 1..20),
        bps in 0u32..=10_000,
    ) {
        let mut engine = engine_with(bps, 1_000, 100);
        let mut ledger = SinkLedger;
        let bob = Principal::new("bob");
        let id = engine.create_promise(
            Principal::new("alice"),
            "t".into(), "d".into(), "c".into(), String::new(),
            AssetKind::Native, 1, true,
        ).unwrap();

        let policy = FeePolicy::new(bps).unwrap();
        let mut expected = 0u128;
        for gross in &amounts {
            let net = engine
                .donate(&mut ledger, id, AssetKind::Native, *gross, *gross, &bob)
                .unwrap();
            prop_assert_eq!(net, policy.split(*gross).unwrap().net);
            expected += net;
        }

        prop_assert_eq!(engine.donation_of(id, &bob), expected);
        prop_assert_eq!(engine.promise(id).unwrap().raised_net, expected);
    }

    /// Conservation: nets credited plus fees forwarded equal the gross total
    /// accepted for the promise — no value created, lost, or fee-evaded.
    #[test]
    fn donations_conserve_value(
        amounts in vec(1u128..1_000_000_000, 1..20),
        bps in 0u32..=10_000,
    ) {
        let mut engine = engine_with(bps, 1_000, 100);
        let mut ledger = SinkLedger;
        let bob = Principal::new("bob");
        let id = engine.create_promise(
            Principal::new("alice"),
            "t".into(), "d".into(), "c".into(), String::new(),
            AssetKind::Native, 1, true,
        ).unwrap();

        let mut gross_total = 0u128;
        for gross in &amounts {
            engine
                .donate(&mut ledger, id, AssetKind::Native, *gross, *gross, &bob)
                .unwrap();
            gross_total += gross;
        }

        let nets = engine.promise(id).unwrap().raised_net;
        let fees = engine.fees_forwarded().native;
        prop_assert_eq!(nets + fees, gross_total);
    }

    /// Any two successful faucet claims by one principal are separated by at
    /// least the cooldown, whatever sequence of attempts is made.
    #[test]
    fn successful_claims_respect_the_cooldown(
        offsets in vec(0u64..200_000, 1..30),
        cooldown in 1u64..100_000,
    ) {
        let mut engine = engine_with(0, 10, cooldown);
        let mut ledger = SinkLedger;
        engine.fund_reserve(u128::MAX / 2).unwrap();
        let bob = Principal::new("bob");

        let mut now = 0u64;
        let mut successes: Vec<u64> = Vec::new();
        for offset in offsets {
            now += offset;
            if engine
                .claim_faucet(&mut ledger, &bob, Timestamp::new(now))
                .is_ok()
            {
                successes.push(now);
            }
        }

        for pair in successes.windows(2) {
            prop_assert!(pair[1] - pair[0] >= cooldown);
        }
    }
}
