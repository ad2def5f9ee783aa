// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! USD cost computation
//!
//! ```text
//! total_cost_usd = gas_amount * gas_price_gwei * token_price_usd / 1e9
//! ```
//!
//! Gas price is in gwei, so dividing by 10^9 converts the product to whole
//! native tokens before it is priced in USD.

use chrono::Utc;

use crate::config::constants::WEI_PER_GWEI;
use crate::errors::AmountError;
use crate::{CostEstimate, GasUnits, GweiPrice, TokenPrice, UsdValue};

/// Compute the USD cost of `gas_amount` at `gas_price`
///
/// Inputs are echoed into the estimate unchanged. The result is not rounded;
/// use [`UsdValue::format`] for display.
///
/// The timestamp is wall-clock time (`Utc::now`). Successive estimates are
/// ordered only while the system clock is not stepped backwards.
///
/// # Errors
///
/// Returns [`AmountError::NotFinite`] when the inputs are individually valid
/// but their product overflows `f64`.
///
/// # Example
///
/// ```
/// use gasfee::{compute_cost, GasUnits, GweiPrice, TokenPrice};
///
/// let estimate = compute_cost(
///     GasUnits::new(21_000.0).unwrap(),
///     GweiPrice::new(2.0).unwrap(),
///     TokenPrice::new(1000.0).unwrap(),
///     "ETH",
/// )
/// .unwrap();
/// assert!((estimate.total_cost_usd.as_f64() - 0.042).abs() < 1e-12);
/// assert_eq!(estimate.label, "ETH");
/// ```
pub fn compute_cost(
    gas_amount: GasUnits,
    gas_price: GweiPrice,
    token_price: TokenPrice,
    label: impl Into<String>,
) -> Result<CostEstimate, AmountError> {
    let total =
        gas_amount.as_f64() * gas_price.as_f64() * token_price.as_f64() / WEI_PER_GWEI;
    let total = AmountError::check("total cost", total)?;

    Ok(CostEstimate {
        gas_amount,
        gas_price,
        token_price,
        total_cost_usd: UsdValue::new(total),
        label: label.into(),
        timestamp: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost(gas: f64, gwei: f64, usd: f64) -> f64 {
        compute_cost(
            GasUnits::new(gas).unwrap(),
            GweiPrice::new(gwei).unwrap(),
            TokenPrice::new(usd).unwrap(),
            "ETH",
        )
        .unwrap()
        .total_cost_usd
        .as_f64()
    }

    #[test]
    fn transfer_at_two_gwei() {
        assert_eq!(cost(21_000.0, 2.0, 1000.0), 21_000.0 * 2.0 * 1000.0 / 1e9);
    }

    #[test]
    fn sub_gwei_prices_keep_precision() {
        let total = cost(21_000.0, 0.717385674, 2500.0);
        assert!((total - 0.037662747885).abs() < 1e-12);
    }

    #[test]
    fn zero_inputs_cost_nothing() {
        assert_eq!(cost(0.0, 5.0, 1000.0), 0.0);
        assert_eq!(cost(21_000.0, 0.0, 1000.0), 0.0);
        assert_eq!(cost(21_000.0, 5.0, 0.0), 0.0);
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let err = compute_cost(
            GasUnits::new(1e200).unwrap(),
            GweiPrice::new(1e200).unwrap(),
            TokenPrice::new(1.0).unwrap(),
            "ETH",
        )
        .unwrap_err();
        assert_eq!(err, AmountError::not_finite("total cost"));
    }

    #[test]
    fn largest_finite_total_is_accepted() {
        let estimate = compute_cost(
            GasUnits::new(1e150).unwrap(),
            GweiPrice::new(1e150).unwrap(),
            TokenPrice::new(1.0).unwrap(),
            "ETH",
        )
        .unwrap();
        assert!(estimate.total_cost_usd.as_f64().is_finite());

        let json = serde_json::to_string(&estimate).unwrap();
        let back: CostEstimate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_cost_usd, estimate.total_cost_usd);
    }

    #[test]
    fn echoes_inputs() {
        let estimate = compute_cost(
            GasUnits::TRANSFER,
            GweiPrice::new(3.5).unwrap(),
            TokenPrice::new(600.0).unwrap(),
            "BNB",
        )
        .unwrap();
        assert_eq!(estimate.gas_amount, GasUnits::TRANSFER);
        assert_eq!(estimate.gas_price.as_f64(), 3.5);
        assert_eq!(estimate.token_price.as_f64(), 600.0);
        assert_eq!(estimate.label, "BNB");
    }

    #[test]
    fn serializes_with_wire_names() {
        let estimate = compute_cost(
            GasUnits::TRANSFER,
            GweiPrice::new(2.0).unwrap(),
            TokenPrice::new(1000.0).unwrap(),
            "ETH",
        )
        .unwrap();
        let json = serde_json::to_value(&estimate).unwrap();
        assert_eq!(json["gasAmount"], 21_000.0);
        assert_eq!(json["gasPrice"], 2.0);
        assert_eq!(json["tokenPrice"], 1000.0);
        assert!(json["totalCostUSD"].is_number());
        assert_eq!(json["label"], "ETH");
        assert!(json["timestamp"].is_i64());
    }
}
