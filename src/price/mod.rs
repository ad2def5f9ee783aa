// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token price fetching
//!
//! [`TokenPriceSource`] abstracts over USD quote providers. The crate ships a
//! CoinMarketCap implementation ([`CoinMarketCapPriceSource`]); tests plug in
//! mocks through the same trait.
//!
//! Symbols are case-insensitive on the way in and upper-case on the way out:
//! `["eth", " ETH ", "bnb"]` is requested as `ETH,BNB` and the result map is
//! keyed by `ETH` and `BNB`.

mod coinmarketcap;

pub use coinmarketcap::CoinMarketCapPriceSource;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::credentials::UpstreamProvider;
use crate::{CredentialSet, GasFeeError, TokenPriceReading};

/// Fetches USD prices for token symbols
#[async_trait]
pub trait TokenPriceSource: Send + Sync {
    /// Provider this source talks to
    fn provider(&self) -> UpstreamProvider;

    /// Fetch prices for several symbols in one upstream call
    ///
    /// Symbols the upstream does not know are omitted from the result rather
    /// than failing the batch. An empty request yields an empty map without
    /// touching the network.
    async fn fetch_many(
        &self,
        symbols: &[&str],
        credentials: &CredentialSet,
    ) -> Result<HashMap<String, TokenPriceReading>, GasFeeError>;

    /// Fetch the price of a single symbol
    ///
    /// # Errors
    ///
    /// Returns [`GasFeeError::MalformedUpstreamPayload`] if the upstream
    /// answered without a quote for `symbol`.
    async fn fetch(
        &self,
        symbol: &str,
        credentials: &CredentialSet,
    ) -> Result<TokenPriceReading, GasFeeError> {
        let wanted = normalize_symbol(symbol);
        let mut prices = self.fetch_many(&[symbol], credentials).await?;
        prices.remove(&wanted).ok_or_else(|| {
            GasFeeError::malformed(self.provider(), format!("no quote returned for {wanted}"))
        })
    }
}

/// Canonical form of a token symbol
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

/// Normalize, drop blanks and de-duplicate, keeping first-seen order
pub fn normalize_symbols(symbols: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = normalize_symbol(symbol);
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}
