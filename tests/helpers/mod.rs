// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for gasfee integration tests
//!
//! Mock implementations of the source traits so the estimator can be tested
//! without real upstreams.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use gasfee::{
    normalize_symbols, BlockMarker, ChainDescriptor, CredentialSet, GasFeeError, GasPriceReading,
    GasPriceSource, GweiPrice, TokenPrice, TokenPriceReading, TokenPriceSource, UpstreamProvider,
};

type ErrorFactory = Box<dyn Fn() -> GasFeeError + Send + Sync>;

/// A gas reading with the given safe/propose/fast tiers
pub fn reading(safe: f64, propose: f64, fast: f64) -> GasPriceReading {
    GasPriceReading {
        safe: GweiPrice::new(safe).unwrap(),
        propose: GweiPrice::new(propose).unwrap(),
        fast: GweiPrice::new(fast).unwrap(),
        base_fee: None,
        last_block: BlockMarker::Number(1),
        timestamp: chrono::Utc::now(),
    }
}

/// An `UpstreamUnavailable` error for `provider`
pub fn unavailable(provider: UpstreamProvider) -> GasFeeError {
    GasFeeError::unavailable(provider, std::io::Error::other("connection refused"))
}

/// Mock GasPriceSource for testing orchestration logic
///
/// # Example
///
/// ```rust,ignore
/// let gas = MockGasSource::returning(reading(1.0, 2.0, 3.0))
///     .with_delay(Duration::from_millis(50));
/// ```
pub struct MockGasSource {
    reading: Option<GasPriceReading>,
    error: Option<ErrorFactory>,
    delay: Duration,
    calls: AtomicUsize,
    seen_chains: Mutex<Vec<&'static str>>,
    completed: AtomicUsize,
}

impl MockGasSource {
    /// Always return `reading`
    pub fn returning(reading: GasPriceReading) -> Self {
        Self {
            reading: Some(reading),
            error: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            seen_chains: Mutex::new(Vec::new()),
            completed: AtomicUsize::new(0),
        }
    }

    /// Always fail with the error built by `error`
    pub fn failing<F>(error: F) -> Self
    where
        F: Fn() -> GasFeeError + Send + Sync + 'static,
    {
        Self {
            reading: None,
            error: Some(Box::new(error)),
            ..Self::returning(reading(0.0, 0.0, 0.0))
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of fetches that ran to completion
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Chain ids fetched, in call order
    pub fn seen_chains(&self) -> Vec<&'static str> {
        self.seen_chains.lock().unwrap().clone()
    }
}

#[async_trait]
impl GasPriceSource for MockGasSource {
    async fn fetch(
        &self,
        chain: &ChainDescriptor,
        _credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_chains.lock().unwrap().push(chain.id);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        match (&self.reading, &self.error) {
            (_, Some(error)) => Err(error()),
            (Some(reading), None) => Ok(reading.clone()),
            (None, None) => unreachable!("mock has neither a reading nor an error"),
        }
    }
}

/// Mock TokenPriceSource backed by a fixed price table
pub struct MockPriceSource {
    prices: HashMap<String, f64>,
    error: Option<ErrorFactory>,
    delay: Duration,
    calls: AtomicUsize,
    completed: AtomicUsize,
    requested: Mutex<Vec<Vec<String>>>,
}

impl MockPriceSource {
    /// Source with no prices
    pub fn new() -> Self {
        Self {
            prices: HashMap::new(),
            error: None,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Add a price for `symbol`
    pub fn with_price(mut self, symbol: &str, usd: f64) -> Self {
        self.prices.insert(symbol.to_ascii_uppercase(), usd);
        self
    }

    /// Always fail with the error built by `error`
    pub fn failing<F>(error: F) -> Self
    where
        F: Fn() -> GasFeeError + Send + Sync + 'static,
    {
        Self {
            error: Some(Box::new(error)),
            ..Self::new()
        }
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches started
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of fetches that ran to completion
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Normalized symbol lists, one per call
    pub fn requested(&self) -> Vec<Vec<String>> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenPriceSource for MockPriceSource {
    fn provider(&self) -> UpstreamProvider {
        UpstreamProvider::CoinMarketCap
    }

    async fn fetch_many(
        &self,
        symbols: &[&str],
        _credentials: &CredentialSet,
    ) -> Result<HashMap<String, TokenPriceReading>, GasFeeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let wanted = normalize_symbols(symbols);
        self.requested.lock().unwrap().push(wanted.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.error {
            return Err(error());
        }

        Ok(wanted
            .into_iter()
            .filter_map(|symbol| {
                let usd = *self.prices.get(&symbol)?;
                let reading = TokenPriceReading::new(symbol.clone(), TokenPrice::new(usd).ok()?);
                Some((symbol, reading))
            })
            .collect())
    }
}
