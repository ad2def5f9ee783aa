// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas fee orchestration
//!
//! [`GasFeeEstimator`] resolves a chain, fetches its gas price and its native
//! token price concurrently, and hands both to [`compute_cost`]. Nothing is
//! cached: every call observes fresh upstream data.
//!
//! # Example
//!
//! ```rust,ignore
//! use gasfee::{CredentialSet, GasFeeConfig, GasFeeEstimator, GasUnits};
//!
//! let estimator = GasFeeEstimator::from_config(&GasFeeConfig::from_env()?)?;
//! let estimate = estimator
//!     .estimate("base", GasUnits::TRANSFER, &CredentialSet::new())
//!     .await?;
//! println!("{} on {}", estimate.total_cost_usd, estimate.label);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, Instrument};

use crate::{
    compute_cost, spans, ChainDescriptor, ChainRegistry, CoinMarketCapPriceSource, CostEstimate,
    CredentialSet, GasFeeConfig, GasFeeError, GasOracleRouter, GasPriceReading, GasPriceSource,
    GasUnits, TokenPriceReading, TokenPriceSource,
};

/// Estimates transaction costs in USD across the registered chains
#[derive(Clone)]
pub struct GasFeeEstimator {
    registry: ChainRegistry,
    gas: Arc<dyn GasPriceSource>,
    prices: Arc<dyn TokenPriceSource>,
}

impl std::fmt::Debug for GasFeeEstimator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GasFeeEstimator")
            .field("registry", &self.registry)
            .field("prices", &self.prices.provider())
            .finish_non_exhaustive()
    }
}

impl GasFeeEstimator {
    /// Create an estimator over explicit sources
    pub fn new(
        registry: ChainRegistry,
        gas: Arc<dyn GasPriceSource>,
        prices: Arc<dyn TokenPriceSource>,
    ) -> Self {
        Self {
            registry,
            gas,
            prices,
        }
    }

    /// Create an estimator with the built-in registry and HTTP backends
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &GasFeeConfig) -> Result<Self, GasFeeError> {
        Ok(Self::new(
            ChainRegistry::builtin(),
            Arc::new(GasOracleRouter::from_config(config)?),
            Arc::new(CoinMarketCapPriceSource::from_config(config)?),
        ))
    }

    /// The registry this estimator resolves chains against
    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    fn resolve(&self, chain: &str) -> Result<&'static ChainDescriptor, GasFeeError> {
        self.registry
            .resolve(chain)
            .ok_or_else(|| GasFeeError::chain_not_supported(chain))
    }

    /// Estimate the USD cost of `gas_amount` on `chain`
    ///
    /// `chain` is a symbolic id (`"base"`) or a decimal chain id (`"8453"`).
    ///
    /// # Errors
    ///
    /// - [`GasFeeError::ChainNotSupported`] if `chain` is not registered; no
    ///   upstream is contacted in that case
    /// - any error from either fetch; the other in-flight fetch is dropped
    pub async fn estimate(
        &self,
        chain: &str,
        gas_amount: GasUnits,
        credentials: &CredentialSet,
    ) -> Result<CostEstimate, GasFeeError> {
        let descriptor = self.resolve(chain)?;
        self.estimate_for(descriptor, gas_amount, credentials).await
    }

    /// Estimate against an already resolved descriptor
    pub async fn estimate_for(
        &self,
        chain: &ChainDescriptor,
        gas_amount: GasUnits,
        credentials: &CredentialSet,
    ) -> Result<CostEstimate, GasFeeError> {
        let span = spans::estimate(chain.id, chain.chain_id, gas_amount);

        async move {
            let (gas, token) = tokio::try_join!(
                self.gas.fetch(chain, credentials),
                self.prices.fetch(chain.native_token, credentials),
            )?;

            let estimate = compute_cost(gas_amount, gas.propose, token.price, chain.native_token)?;
            debug!(
                gas_price_gwei = estimate.gas_price.as_f64(),
                token_price_usd = estimate.token_price.as_f64(),
                total_cost_usd = estimate.total_cost_usd.as_f64(),
                "Computed cost estimate"
            );
            Ok(estimate)
        }
        .instrument(span)
        .await
    }

    /// Current gas price reading for `chain`
    pub async fn gas_price(
        &self,
        chain: &str,
        credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError> {
        let descriptor = self.resolve(chain)?;
        self.gas.fetch(descriptor, credentials).await
    }

    /// Current USD prices for `symbols`, keyed by upper-case symbol
    pub async fn token_prices(
        &self,
        symbols: &[&str],
        credentials: &CredentialSet,
    ) -> Result<HashMap<String, TokenPriceReading>, GasFeeError> {
        self.prices.fetch_many(symbols, credentials).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::credentials::UpstreamProvider;
    use crate::{ErrorKind, GweiPrice, TokenPrice};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GasPriceSource for Counting {
        async fn fetch(
            &self,
            _chain: &ChainDescriptor,
            _credentials: &CredentialSet,
        ) -> Result<GasPriceReading, GasFeeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GasPriceReading::single_tier(GweiPrice::new(2.0)?))
        }
    }

    #[async_trait]
    impl TokenPriceSource for Counting {
        fn provider(&self) -> UpstreamProvider {
            UpstreamProvider::CoinMarketCap
        }

        async fn fetch_many(
            &self,
            symbols: &[&str],
            _credentials: &CredentialSet,
        ) -> Result<HashMap<String, TokenPriceReading>, GasFeeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut out = HashMap::new();
            for symbol in crate::price::normalize_symbols(symbols) {
                out.insert(
                    symbol.clone(),
                    TokenPriceReading::new(symbol, TokenPrice::new(1000.0)?),
                );
            }
            Ok(out)
        }
    }

    #[tokio::test]
    async fn bnb_uses_its_own_token() {
        let gas = Arc::new(Counting::default());
        let prices = Arc::new(Counting::default());
        let estimator = GasFeeEstimator::new(ChainRegistry::builtin(), gas.clone(), prices.clone());

        let estimate = estimator
            .estimate("56", GasUnits::TRANSFER, &CredentialSet::new())
            .await
            .unwrap();

        assert_eq!(estimate.label, "BNB");
        assert_eq!(gas.calls.load(Ordering::SeqCst), 1);
        assert_eq!(prices.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_chain_makes_no_calls() {
        let gas = Arc::new(Counting::default());
        let prices = Arc::new(Counting::default());
        let estimator = GasFeeEstimator::new(ChainRegistry::builtin(), gas.clone(), prices.clone());

        let err = estimator
            .gas_price("dogechain", &CredentialSet::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ChainNotSupported);
        assert_eq!(gas.calls.load(Ordering::SeqCst), 0);
        assert_eq!(prices.calls.load(Ordering::SeqCst), 0);
    }
}
