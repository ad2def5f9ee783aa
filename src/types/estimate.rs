//! The cost estimate returned to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::gas::{GasUnits, GweiPrice};
use super::price::{TokenPrice, UsdValue};

/// USD cost of a transaction on one chain
///
/// `total_cost_usd == gas_amount * gas_price * token_price / 1e9`, computed by
/// [`compute_cost`](crate::compute_cost). Inputs are echoed unchanged and no
/// rounding is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Gas units the caller asked about
    pub gas_amount: GasUnits,
    /// Standard-tier gas price used, in gwei
    pub gas_price: GweiPrice,
    /// Native token price used, in USD
    pub token_price: TokenPrice,
    /// Derived total cost
    #[serde(rename = "totalCostUSD")]
    pub total_cost_usd: UsdValue,
    /// Native token symbol of the chain
    pub label: String,
    /// Computation time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}
