// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Block-explorer gas oracle backend
//!
//! Speaks the Etherscan v2 multichain `gastracker/gasoracle` API. One endpoint
//! serves every chain; the chain is selected with the `chainid` parameter.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::credentials::UpstreamProvider;
use crate::http::{bounded, build_client, excerpt, read_json, send_error};
use crate::{
    BlockMarker, ChainDescriptor, CredentialSet, GasFeeConfig, GasFeeError, GasOracle,
    GasPriceReading, GasPriceSource, GweiPrice,
};

const PROVIDER: UpstreamProvider = UpstreamProvider::Etherscan;

/// Envelope shared by every Etherscan API response
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    message: String,
    /// An object on success, an explanatory string on failure
    #[serde(default)]
    result: Value,
}

/// `result` object of a successful gasoracle call
///
/// Prices are decimal gwei strings, e.g. `"0.717385674"`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OracleResult {
    last_block: String,
    safe_gas_price: String,
    propose_gas_price: String,
    fast_gas_price: String,
    #[serde(rename = "suggestBaseFee", default)]
    suggest_base_fee: Option<String>,
}

/// Gas price source backed by an Etherscan-compatible gas oracle
#[derive(Debug, Clone)]
pub struct EtherscanGasOracle {
    client: reqwest::Client,
    timeout: Duration,
    endpoint_override: Option<Url>,
    defaults: CredentialSet,
}

impl EtherscanGasOracle {
    /// Create an oracle client
    ///
    /// `endpoint_override`, when set, replaces the endpoint carried by each
    /// chain descriptor. `defaults` supplies keys absent from per-call sets.
    pub fn new(
        timeout: Duration,
        endpoint_override: Option<Url>,
        defaults: CredentialSet,
    ) -> Result<Self, GasFeeError> {
        let client = build_client(timeout).map_err(|e| GasFeeError::unavailable(PROVIDER, e))?;
        Ok(Self {
            client,
            timeout,
            endpoint_override,
            defaults,
        })
    }

    /// Create an oracle client from the crate configuration
    pub fn from_config(config: &GasFeeConfig) -> Result<Self, GasFeeError> {
        Self::new(
            config.request_timeout,
            config.etherscan_endpoint.clone(),
            config.default_credentials.clone(),
        )
    }

    fn endpoint(&self, chain: &ChainDescriptor) -> Result<Url, GasFeeError> {
        if let Some(url) = &self.endpoint_override {
            return Ok(url.clone());
        }
        match chain.gas_oracle {
            GasOracle::Etherscan { endpoint } => {
                Url::parse(endpoint).map_err(|e| GasFeeError::InvalidEndpoint {
                    url: endpoint.to_string(),
                    details: e.to_string(),
                })
            }
            other => Err(GasFeeError::OracleBackendMissing { kind: other.kind() }),
        }
    }

    async fn request(&self, url: Url, chain_id: u64, key: &str) -> Result<Envelope, GasFeeError> {
        let chain_id = chain_id.to_string();
        let response = self
            .client
            .get(url)
            .query(&[
                ("chainid", chain_id.as_str()),
                ("module", "gastracker"),
                ("action", "gasoracle"),
                ("apikey", key),
            ])
            .send()
            .await
            .map_err(|e| send_error(PROVIDER, self.timeout, e))?;

        read_json(PROVIDER, self.timeout, response).await
    }
}

#[async_trait]
impl GasPriceSource for EtherscanGasOracle {
    async fn fetch(
        &self,
        chain: &ChainDescriptor,
        credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError> {
        let key = credentials.resolve(chain.credential, &self.defaults)?;
        let url = self.endpoint(chain)?;

        let envelope = bounded(
            PROVIDER,
            self.timeout,
            self.request(url, chain.chain_id, key),
        )
        .await?;

        let reading = parse_envelope(envelope)?;
        debug!(
            chain = chain.id,
            last_block = %reading.last_block,
            propose_gwei = reading.propose.as_f64(),
            "Fetched gas oracle reading"
        );
        Ok(reading)
    }
}

/// Turn a decoded envelope into a reading, classifying upstream refusals
fn parse_envelope(envelope: Envelope) -> Result<GasPriceReading, GasFeeError> {
    if envelope.status != "1" {
        let detail = match &envelope.result {
            Value::String(s) if !s.is_empty() => s.clone(),
            _ => envelope.message.clone(),
        };
        return Err(GasFeeError::rejected(
            PROVIDER,
            format!("status {}: {}", envelope.status, excerpt(&detail)),
        ));
    }

    let result: OracleResult = serde_json::from_value(envelope.result)
        .map_err(|e| GasFeeError::malformed(PROVIDER, e.to_string()))?;

    let last_block = result
        .last_block
        .trim()
        .parse::<u64>()
        .map_err(|_| GasFeeError::malformed(PROVIDER, "LastBlock is not a block number"))?;

    let base_fee = match result.suggest_base_fee.as_deref() {
        Some(raw) => Some(tier("suggestBaseFee", raw)?),
        None => None,
    };

    Ok(GasPriceReading {
        safe: tier("SafeGasPrice", &result.safe_gas_price)?,
        propose: tier("ProposeGasPrice", &result.propose_gas_price)?,
        fast: tier("FastGasPrice", &result.fast_gas_price)?,
        base_fee,
        last_block: BlockMarker::Number(last_block),
        timestamp: Utc::now(),
    })
}

fn tier(field: &str, raw: &str) -> Result<GweiPrice, GasFeeError> {
    GweiPrice::parse_decimal(raw).ok_or_else(|| {
        GasFeeError::malformed(PROVIDER, format!("{field} is not a gwei amount: {raw:?}"))
    })
}
