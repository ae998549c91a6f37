//! Property-based tests over the solvers and the pool invariants.
//!
//! Covered properties:
//!
//! 1. **D convergence** — the invariant solver converges for any
//!    reserves and any amplification in `[1, 10^6]`.
//! 2. **Trade conservation** — the y-solver leaves D unchanged up to
//!    rounding.
//! 3. **Round-trip loss** — swapping there and back never profits, with
//!    or without fees.
//! 4. **Virtual price monotonicity** — no single operation lowers the
//!    share value.
//! 5. **Deposit/withdraw round trip** — adding then removing liquidity
//!    returns no more than was deposited.

#![allow(clippy::panic)]

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use primitive_types::U256;

use crate::config::StablePoolConfig;
use crate::domain::{Address, Amount, AssetIndex, Decimals, PoolFee};
use crate::error::PoolError;
use crate::traits::AssetToken;
use crate::traits::ShareToken;
use crate::math::{compute_d, compute_y};
use crate::mock::{MockClock, MockShares, MockToken, RecordingSink, ALICE, BOB, OWNER, POOL};
use crate::pool::StablePool;
use crate::N_COINS;

type TestPool = StablePool<MockToken, MockShares, MockClock, RecordingSink>;

fn idx(i: usize) -> AssetIndex {
    let Ok(index) = AssetIndex::new(i) else {
        panic!("valid index {i}");
    };
    index
}

fn build_pool(amp: u64, fee: u64, admin_fee: u64) -> (TestPool, [MockToken; N_COINS], MockShares) {
    let Ok(d18) = Decimals::new(18) else {
        panic!("valid decimals");
    };
    let Ok(d6) = Decimals::new(6) else {
        panic!("valid decimals");
    };
    let Ok(fee) = PoolFee::new(fee) else {
        panic!("valid fee");
    };
    let Ok(admin) = PoolFee::new(admin_fee) else {
        panic!("valid admin fee");
    };
    let Ok(config) = StablePoolConfig::new(OWNER, POOL, [d18, d6, d6], amp, fee, admin) else {
        panic!("valid config");
    };
    let tokens = [
        MockToken::new(Address::from_bytes([0x10u8; 32])),
        MockToken::new(Address::from_bytes([0x11u8; 32])),
        MockToken::new(Address::from_bytes([0x12u8; 32])),
    ];
    let shares = MockShares::new();
    let Ok(pool) = StablePool::new(
        config,
        tokens.clone(),
        shares.clone(),
        MockClock::new(1_700_000_000),
        RecordingSink::new(),
    ) else {
        panic!("valid pool");
    };
    (pool, tokens, shares)
}

/// Deposits `units` whole tokens of each asset from ALICE.
fn seed(pool: &mut TestPool, tokens: &[MockToken; N_COINS], units: [u64; N_COINS]) {
    let amounts = [
        Amount::from_u128(u128::from(units[0]) * 1_000_000_000_000_000_000),
        Amount::from_u128(u128::from(units[1]) * 1_000_000),
        Amount::from_u128(u128::from(units[2]) * 1_000_000),
    ];
    for (token, amount) in tokens.iter().zip(amounts.iter()) {
        token.credit(&ALICE, *amount);
    }
    let Ok(_) = pool.add_liquidity(ALICE, amounts, Amount::ZERO) else {
        panic!("seed deposit succeeds");
    };
}

// ---------------------------------------------------------------------------
// Solver properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn d_converges_for_any_reserves(
        x0 in 1_000_000u64..=u64::MAX,
        x1 in 1_000_000u64..=u64::MAX,
        x2 in 1_000_000u64..=u64::MAX,
        amp in 1u64..=1_000_000,
    ) {
        let xp = [U256::from(x0), U256::from(x1), U256::from(x2)];
        let d = compute_d(&xp, amp);
        prop_assert!(d.is_ok(), "solver failed: {d:?}");
    }

    #[test]
    fn d_lies_between_curve_families(
        x0 in 1_000_000u64..=u64::MAX,
        x1 in 1_000_000u64..=u64::MAX,
        x2 in 1_000_000u64..=u64::MAX,
        amp in 1u64..=1_000_000,
    ) {
        let xp = [U256::from(x0), U256::from(x1), U256::from(x2)];
        let Ok(d) = compute_d(&xp, amp) else {
            return Err(TestCaseError::fail("solver failed"));
        };
        let sum = U256::from(x0) + U256::from(x1) + U256::from(x2);
        // Constant-sum bound from above, and a crude positive floor.
        prop_assert!(d <= sum + U256::from(2u64));
        prop_assert!(d > U256::zero());
    }

    #[test]
    fn trade_preserves_d(
        reserve in 1_000_000_000u64..=1_000_000_000_000,
        dx_ppm in 1u64..=500_000,
        amp in 1u64..=100_000,
    ) {
        // Balanced 18-decimal-scale pool, trade up to 50% of one reserve.
        let base = U256::from(reserve) * U256::exp10(9);
        let xp = [base, base, base];
        let Ok(d_before) = compute_d(&xp, amp) else {
            return Err(TestCaseError::fail("D solver failed"));
        };
        let dx = base * U256::from(dx_ppm) / U256::from(1_000_000u64);
        let x_new = xp[0] + dx;
        let Ok(y) = compute_y(0, 1, x_new, &xp, amp) else {
            return Err(TestCaseError::fail("y solver failed"));
        };
        let moved = [x_new, y, base];
        let Ok(d_after) = compute_d(&moved, amp) else {
            return Err(TestCaseError::fail("D solver failed after trade"));
        };
        // Truncation in y can only leave D at or slightly above its
        // pre-trade value, never meaningfully below.
        prop_assert!(d_after + U256::from(2u64) >= d_before, "D dropped: {d_before} -> {d_after}");
        let drift = (d_after + U256::from(2u64)) - d_before;
        prop_assert!(
            drift <= d_before / U256::from(1_000u64) + U256::from(16u64),
            "D drifted: {d_before} -> {d_after}"
        );
    }
}

// ---------------------------------------------------------------------------
// Pool properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn round_trip_swap_never_profits(
        seed_units in 1_000u64..=1_000_000,
        trade_units in 1u64..=900,
        fee in prop_oneof![Just(0u64), Just(4_000_000u64), Just(100_000_000u64)],
    ) {
        let (mut pool, tokens, _shares) = build_pool(200, fee, 5_000_000_000);
        seed(&mut pool, &tokens, [seed_units, seed_units, seed_units]);

        let dx = Amount::from_u128(u128::from(trade_units) * 1_000_000_000_000_000_000);
        tokens[0].credit(&BOB, dx);
        let Ok(out) = pool.swap(BOB, idx(0), idx(1), dx, Amount::ZERO) else {
            return Err(TestCaseError::fail("forward swap failed"));
        };
        let Ok(back) = pool.swap(BOB, idx(1), idx(0), out, Amount::ZERO) else {
            return Err(TestCaseError::fail("reverse swap failed"));
        };
        prop_assert!(back <= dx, "round trip profited: {dx} -> {back}");
    }

    #[test]
    fn virtual_price_never_decreases(
        seed_units in 1_000u64..=100_000,
        trade_units in 1u64..=500,
        deposit_units in 1u64..=500,
    ) {
        let (mut pool, tokens, _shares) = build_pool(200, 4_000_000, 5_000_000_000);
        seed(&mut pool, &tokens, [seed_units, seed_units, seed_units]);

        let Ok(vp0) = pool.virtual_price() else {
            return Err(TestCaseError::fail("virtual price failed"));
        };

        let dx = Amount::from_u128(u128::from(trade_units) * 1_000_000);
        tokens[1].credit(&BOB, dx);
        let Ok(_) = pool.swap(BOB, idx(1), idx(2), dx, Amount::ZERO) else {
            return Err(TestCaseError::fail("swap failed"));
        };
        let Ok(vp1) = pool.virtual_price() else {
            return Err(TestCaseError::fail("virtual price failed"));
        };
        prop_assert!(vp1 >= vp0, "swap lowered virtual price");

        let deposit = [
            Amount::from_u128(u128::from(deposit_units) * 1_000_000_000_000_000_000),
            Amount::ZERO,
            Amount::from_u128(u128::from(deposit_units) * 1_000_000),
        ];
        tokens[0].credit(&BOB, deposit[0]);
        tokens[2].credit(&BOB, deposit[2]);
        let Ok(_) = pool.add_liquidity(BOB, deposit, Amount::ZERO) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        let Ok(vp2) = pool.virtual_price() else {
            return Err(TestCaseError::fail("virtual price failed"));
        };
        prop_assert!(vp2 >= vp1, "deposit lowered virtual price");
    }

    #[test]
    fn add_then_remove_returns_no_more(
        seed_units in 1_000u64..=100_000,
        deposit_units in 1u64..=1_000,
    ) {
        let (mut pool, tokens, shares) = build_pool(200, 4_000_000, 5_000_000_000);
        seed(&mut pool, &tokens, [seed_units, seed_units, seed_units]);

        let deposit = [
            Amount::from_u128(u128::from(deposit_units) * 1_000_000_000_000_000_000),
            Amount::from_u128(u128::from(deposit_units) * 1_000_000),
            Amount::from_u128(u128::from(deposit_units) * 1_000_000),
        ];
        for (token, amount) in tokens.iter().zip(deposit.iter()) {
            token.credit(&BOB, *amount);
        }
        let Ok(minted) = pool.add_liquidity(BOB, deposit, Amount::ZERO) else {
            return Err(TestCaseError::fail("deposit failed"));
        };
        let Ok(returned) = pool.remove_liquidity(BOB, minted, [Amount::ZERO; N_COINS]) else {
            return Err(TestCaseError::fail("withdrawal failed"));
        };
        for i in 0..N_COINS {
            prop_assert!(
                returned[i] <= deposit[i],
                "asset {i} round trip profited: {} -> {}",
                deposit[i],
                returned[i]
            );
        }
        // The pool never pays out shares it did not mint.
        prop_assert!(shares.balance_of(&BOB).is_zero());
    }

    #[test]
    fn reserves_stay_covered_by_ledger(
        seed_units in 1_000u64..=100_000,
        trade_units in 1u64..=900,
    ) {
        let (mut pool, tokens, _shares) = build_pool(200, 4_000_000, 5_000_000_000);
        seed(&mut pool, &tokens, [seed_units, seed_units, seed_units]);

        let dx = Amount::from_u128(u128::from(trade_units) * 1_000_000_000_000_000_000);
        tokens[0].credit(&BOB, dx);
        let Ok(out) = pool.swap(BOB, idx(0), idx(2), dx, Amount::ZERO) else {
            return Err(TestCaseError::fail("swap failed"));
        };
        tokens[2].credit(&BOB, out);
        let Ok(_) = pool.swap(BOB, idx(2), idx(1), out, Amount::ZERO) else {
            return Err(TestCaseError::fail("swap failed"));
        };

        for i in 0..N_COINS {
            let held = tokens[i].balance_of(&POOL);
            prop_assert!(
                held >= pool.balances()[i],
                "asset {i}: ledger {held} below accounted {}",
                pool.balances()[i]
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Error-path properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn swap_identical_indices_always_rejected(i in 0usize..N_COINS) {
        let (mut pool, tokens, _shares) = build_pool(200, 4_000_000, 0);
        seed(&mut pool, &tokens, [1_000, 1_000, 1_000]);
        let result = pool.swap(BOB, idx(i), idx(i), Amount::from_u128(1), Amount::ZERO);
        prop_assert_eq!(result, Err(PoolError::CantSwapSameToken));
    }

    #[test]
    fn impossible_floor_always_rejected(floor_units in 101u64..=10_000) {
        let (mut pool, tokens, _shares) = build_pool(200, 4_000_000, 0);
        seed(&mut pool, &tokens, [1_000, 1_000, 1_000]);
        let dx = Amount::from_u128(100 * 1_000_000_000_000_000_000);
        tokens[0].credit(&BOB, dx);
        let floor = Amount::from_u128(u128::from(floor_units) * 1_000_000);
        let result = pool.swap(BOB, idx(0), idx(1), dx, floor);
        prop_assert_eq!(result, Err(PoolError::SlippageTooHigh));
    }
}
