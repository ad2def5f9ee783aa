//! Tracing span creation helpers for gasfee operations.
//!
//! Telemetry is kept out of business logic: each instrumented operation has a
//! span helper here and attaches it with `Instrument::instrument`.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async move { /* business logic */ }.instrument(span).await
//! }
//! ```

use tracing::Span;

use crate::{GasOracleKind, GasUnits};

/// Create span for a full cost estimate.
///
/// Parent: None (root span for this operation)
/// Children: fetch_gas_price, fetch_token_prices
#[inline]
pub(crate) fn estimate(chain: &str, chain_id: u64, gas_amount: GasUnits) -> Span {
    tracing::info_span!(
        "gasfee.estimate",
        chain = chain,
        chain_id = chain_id,
        gas_amount = gas_amount.as_f64(),
    )
}

/// Create span for one gas oracle call.
///
/// Parent: estimate span, or None for direct gas price requests
#[inline]
pub(crate) fn fetch_gas_price(chain: &str, chain_id: u64, oracle: GasOracleKind) -> Span {
    tracing::debug_span!(
        "gasfee.fetch_gas_price",
        chain = chain,
        chain_id = chain_id,
        oracle = ?oracle,
    )
}

/// Create span for one price quote call.
///
/// Parent: estimate span, or None for direct token price requests
#[inline]
pub(crate) fn fetch_token_prices(symbols: &str) -> Span {
    tracing::debug_span!("gasfee.fetch_token_prices", symbols = symbols)
}
