// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the cost formula
//!
//! These tests use proptest to validate invariants of compute_cost across a
//! wide range of gas amounts and prices.

use gasfee::{compute_cost, GasUnits, GweiPrice, TokenPrice};
use proptest::prelude::*;

// Gas amounts from zero up to a full 60M-gas block
fn arb_gas() -> impl Strategy<Value = f64> {
    0.0f64..=60_000_000.0
}

// Gas prices from zero up to 10_000 gwei
fn arb_gwei() -> impl Strategy<Value = f64> {
    0.0f64..=10_000.0
}

// Token prices from zero up to $1M
fn arb_usd() -> impl Strategy<Value = f64> {
    0.0f64..=1_000_000.0
}

proptest! {
    /// Property: the total is exactly gas * gwei * price / 1e9
    #[test]
    fn prop_total_matches_formula(gas in arb_gas(), gwei in arb_gwei(), usd in arb_usd()) {
        let estimate = compute_cost(
            GasUnits::new(gas).unwrap(),
            GweiPrice::new(gwei).unwrap(),
            TokenPrice::new(usd).unwrap(),
            "ETH",
        )
        .unwrap();
        prop_assert_eq!(estimate.total_cost_usd.as_f64(), gas * gwei * usd / 1e9);
    }

    /// Property: inputs are echoed unchanged
    #[test]
    fn prop_inputs_are_echoed(
        gas in arb_gas(),
        gwei in arb_gwei(),
        usd in arb_usd(),
        label in "[A-Z]{2,6}",
    ) {
        let estimate = compute_cost(
            GasUnits::new(gas).unwrap(),
            GweiPrice::new(gwei).unwrap(),
            TokenPrice::new(usd).unwrap(),
            label.clone(),
        )
        .unwrap();
        prop_assert_eq!(estimate.gas_amount.as_f64(), gas);
        prop_assert_eq!(estimate.gas_price.as_f64(), gwei);
        prop_assert_eq!(estimate.token_price.as_f64(), usd);
        prop_assert_eq!(estimate.label, label);
    }

    /// Property: totals are never negative and always finite
    #[test]
    fn prop_total_is_non_negative(gas in arb_gas(), gwei in arb_gwei(), usd in arb_usd()) {
        let total = compute_cost(
            GasUnits::new(gas).unwrap(),
            GweiPrice::new(gwei).unwrap(),
            TokenPrice::new(usd).unwrap(),
            "ETH",
        )
        .unwrap()
        .total_cost_usd
        .as_f64();
        prop_assert!(total >= 0.0);
        prop_assert!(total.is_finite());
    }

    /// Property: more gas never costs less at the same prices
    #[test]
    fn prop_monotonic_in_gas(
        low in arb_gas(),
        extra in 0.0f64..=1_000_000.0,
        gwei in arb_gwei(),
        usd in arb_usd(),
    ) {
        let gwei = GweiPrice::new(gwei).unwrap();
        let usd = TokenPrice::new(usd).unwrap();
        let cheap = compute_cost(GasUnits::new(low).unwrap(), gwei, usd, "ETH").unwrap();
        let dear = compute_cost(GasUnits::new(low + extra).unwrap(), gwei, usd, "ETH").unwrap();
        prop_assert!(dear.total_cost_usd.as_f64() >= cheap.total_cost_usd.as_f64());
    }

    /// Property: totals past f64::MAX are errors, never infinities
    #[test]
    fn prop_overflow_is_rejected(gas in 1e200f64..1e300, gwei in 1e200f64..1e300) {
        let result = compute_cost(
            GasUnits::new(gas).unwrap(),
            GweiPrice::new(gwei).unwrap(),
            TokenPrice::new(1.0).unwrap(),
            "ETH",
        );
        prop_assert!(result.is_err());
    }

    /// Property: negative gas amounts are rejected before any computation
    #[test]
    fn prop_negative_gas_rejected(gas in -1_000_000.0f64..-0.001) {
        prop_assert!(GasUnits::new(gas).is_err());
    }
}

// Timestamps are wall-clock; this assumes the clock is not stepped back mid-test
#[test]
fn sequential_timestamps_are_non_decreasing() {
    let gas = GasUnits::TRANSFER;
    let gwei = GweiPrice::new(1.0).unwrap();
    let usd = TokenPrice::new(1.0).unwrap();

    let mut previous = compute_cost(gas, gwei, usd, "ETH").unwrap().timestamp;
    for _ in 0..1000 {
        let next = compute_cost(gas, gwei, usd, "ETH").unwrap().timestamp;
        assert!(next >= previous);
        previous = next;
    }
}

#[test]
fn non_finite_inputs_are_rejected() {
    assert!(GasUnits::new(f64::NAN).is_err());
    assert!(GweiPrice::new(f64::INFINITY).is_err());
    assert!(TokenPrice::new(f64::NEG_INFINITY).is_err());
}
