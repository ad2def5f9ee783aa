// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! CoinMarketCap latest-quotes price source

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, Instrument};
use url::Url;

use super::{normalize_symbols, TokenPriceSource};
use crate::config::constants::{endpoints, COINMARKETCAP_KEY_HEADER};
use crate::credentials::UpstreamProvider;
use crate::http::{bounded, build_client, read_json, send_error};
use crate::{spans, CredentialSet, GasFeeConfig, GasFeeError, TokenPrice, TokenPriceReading};

const PROVIDER: UpstreamProvider = UpstreamProvider::CoinMarketCap;

#[derive(Debug, Deserialize)]
struct QuotesResponse {
    status: Status,
    #[serde(default)]
    data: Option<HashMap<String, QuoteEntry>>,
}

#[derive(Debug, Deserialize)]
struct Status {
    error_code: i64,
    #[serde(default)]
    error_message: Option<String>,
}

/// A symbol maps to one listing, or to several when it is ambiguous
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteEntry {
    One(Listing),
    Many(Vec<Listing>),
}

impl QuoteEntry {
    /// The first listing, which CoinMarketCap ranks highest
    fn primary(&self) -> Option<&Listing> {
        match self {
            Self::One(listing) => Some(listing),
            Self::Many(listings) => listings.first(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    quote: HashMap<String, Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    price: Option<f64>,
}

/// Token price source backed by the CoinMarketCap pro API
#[derive(Debug, Clone)]
pub struct CoinMarketCapPriceSource {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    defaults: CredentialSet,
}

impl CoinMarketCapPriceSource {
    /// Create a price source against `base_url`
    ///
    /// A path prefix on `base_url` (e.g. a proxy mount point) is kept; the
    /// quotes path is resolved beneath it.
    pub fn new(
        mut base_url: Url,
        timeout: Duration,
        defaults: CredentialSet,
    ) -> Result<Self, GasFeeError> {
        let client = build_client(timeout).map_err(|e| GasFeeError::unavailable(PROVIDER, e))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            client,
            base_url,
            timeout,
            defaults,
        })
    }

    /// Create a price source from the crate configuration
    pub fn from_config(config: &GasFeeConfig) -> Result<Self, GasFeeError> {
        Self::new(
            config.coinmarketcap_base_url.clone(),
            config.request_timeout,
            config.default_credentials.clone(),
        )
    }

    fn quotes_url(&self) -> Result<Url, GasFeeError> {
        self.base_url
            .join(endpoints::COINMARKETCAP_QUOTES_PATH)
            .map_err(|e| GasFeeError::InvalidEndpoint {
                url: self.base_url.to_string(),
                details: e.to_string(),
            })
    }

    async fn request(&self, url: Url, symbols: &str, key: &str) -> Result<QuotesResponse, GasFeeError> {
        let response = self
            .client
            .get(url)
            .query(&[("symbol", symbols)])
            .header(COINMARKETCAP_KEY_HEADER, key)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| send_error(PROVIDER, self.timeout, e))?;

        read_json(PROVIDER, self.timeout, response).await
    }
}

#[async_trait]
impl TokenPriceSource for CoinMarketCapPriceSource {
    fn provider(&self) -> UpstreamProvider {
        PROVIDER
    }

    async fn fetch_many(
        &self,
        symbols: &[&str],
        credentials: &CredentialSet,
    ) -> Result<HashMap<String, TokenPriceReading>, GasFeeError> {
        let wanted = normalize_symbols(symbols);
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }

        let key = credentials.resolve(PROVIDER, &self.defaults)?;
        let url = self.quotes_url()?;
        let joined = wanted.join(",");

        let span = spans::fetch_token_prices(&joined);
        async move {
            let response = bounded(PROVIDER, self.timeout, self.request(url, &joined, key)).await?;
            let prices = parse_quotes(response, &wanted)?;
            debug!(
                requested = wanted.len(),
                returned = prices.len(),
                "Fetched token prices"
            );
            Ok(prices)
        }
        .instrument(span)
        .await
    }
}

fn parse_quotes(
    response: QuotesResponse,
    wanted: &[String],
) -> Result<HashMap<String, TokenPriceReading>, GasFeeError> {
    if response.status.error_code != 0 {
        let reason = response
            .status
            .error_message
            .unwrap_or_else(|| "no error message".to_string());
        return Err(GasFeeError::rejected(
            PROVIDER,
            format!("error code {}: {reason}", response.status.error_code),
        ));
    }

    let data = response.data.unwrap_or_default();
    let mut prices = HashMap::with_capacity(wanted.len());

    for symbol in wanted {
        let usd = data
            .get(symbol)
            .and_then(QuoteEntry::primary)
            .and_then(|listing| listing.quote.get("USD"))
            .and_then(|quote| quote.price);

        // Listed but unpriced tokens are treated like unknown ones
        let Some(usd) = usd else { continue };

        let price = TokenPrice::new(usd).map_err(|e| {
            GasFeeError::malformed(PROVIDER, format!("price for {symbol}: {e}"))
        })?;
        prices.insert(symbol.clone(), TokenPriceReading::new(symbol.clone(), price));
    }

    Ok(prices)
}
