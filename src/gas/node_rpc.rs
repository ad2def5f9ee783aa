// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Node JSON-RPC gas price backend
//!
//! Calls `eth_gasPrice` through an alloy HTTP provider. The node reports a
//! single wei price, so every tier of the reading carries it and no block is
//! known.

use std::time::Duration;

use alloy_json_rpc::RpcError;
use alloy_primitives::U256;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_transport::TransportErrorKind;
use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::credentials::UpstreamProvider;
use crate::http::{bounded, excerpt};
use crate::{
    ChainDescriptor, CredentialSet, GasFeeConfig, GasFeeError, GasOracle, GasPriceReading,
    GasPriceSource, GweiPrice,
};

const PROVIDER: UpstreamProvider = UpstreamProvider::Alchemy;

/// Placeholder for the provider network slug in RPC URL templates
const NETWORK_PLACEHOLDER: &str = "{network}";
/// Placeholder for the API key in RPC URL templates
const KEY_PLACEHOLDER: &str = "{key}";

/// Parse a `0x`-prefixed hex quantity as returned by `eth_gasPrice`
///
/// ```
/// use alloy_primitives::U256;
/// use gasfee::parse_hex_wei;
///
/// assert_eq!(parse_hex_wei("0x3B9ACA00"), Some(U256::from(1_000_000_000u64)));
/// assert_eq!(parse_hex_wei("1000"), None);
/// ```
pub fn parse_hex_wei(value: &str) -> Option<U256> {
    let digits = value
        .trim()
        .strip_prefix("0x")
        .or_else(|| value.trim().strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    U256::from_str_radix(digits, 16).ok()
}

/// Gas price source backed by a node provider's `eth_gasPrice`
#[derive(Debug, Clone)]
pub struct NodeRpcGasOracle {
    timeout: Duration,
    url_template: String,
    defaults: CredentialSet,
}

impl NodeRpcGasOracle {
    /// Create a node RPC backend
    ///
    /// `url_template` must contain `{network}` and `{key}` placeholders, e.g.
    /// `https://{network}.g.alchemy.com/v2/{key}`.
    pub fn new(timeout: Duration, url_template: impl Into<String>, defaults: CredentialSet) -> Self {
        Self {
            timeout,
            url_template: url_template.into(),
            defaults,
        }
    }

    /// Create a node RPC backend from the crate configuration
    pub fn from_config(config: &GasFeeConfig) -> Self {
        Self::new(
            config.request_timeout,
            config.node_rpc_url_template.clone(),
            config.default_credentials.clone(),
        )
    }

    fn rpc_url(&self, network: &str, key: &str) -> Result<Url, GasFeeError> {
        let raw = self
            .url_template
            .replace(NETWORK_PLACEHOLDER, network)
            .replace(KEY_PLACEHOLDER, key);
        Url::parse(&raw).map_err(|e| GasFeeError::InvalidEndpoint {
            url: self.url_template.replace(NETWORK_PLACEHOLDER, network),
            details: e.to_string(),
        })
    }

    async fn gas_price(&self, url: Url, key: &str) -> Result<String, GasFeeError> {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url);

        provider
            .raw_request::<_, String>("eth_gasPrice".into(), [(); 0])
            .await
            .map_err(|e| classify_rpc_error(e, key))
    }
}

#[async_trait]
impl GasPriceSource for NodeRpcGasOracle {
    async fn fetch(
        &self,
        chain: &ChainDescriptor,
        credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError> {
        let GasOracle::NodeRpc { network } = chain.gas_oracle else {
            return Err(GasFeeError::OracleBackendMissing {
                kind: chain.gas_oracle.kind(),
            });
        };

        let key = credentials.resolve(chain.credential, &self.defaults)?;
        let url = self.rpc_url(network, key)?;

        let hex = bounded(PROVIDER, self.timeout, self.gas_price(url, key)).await?;
        let reading = reading_from_hex(&hex)?;

        debug!(
            chain = chain.id,
            network = network,
            gwei = reading.propose.as_f64(),
            "Fetched node gas price"
        );
        Ok(reading)
    }
}

fn reading_from_hex(hex: &str) -> Result<GasPriceReading, GasFeeError> {
    let wei = parse_hex_wei(hex).ok_or_else(|| {
        GasFeeError::malformed(PROVIDER, format!("eth_gasPrice result is not a hex quantity: {hex:?}"))
    })?;
    let gwei = GweiPrice::from_wei(wei).map_err(|e| GasFeeError::malformed(PROVIDER, e.to_string()))?;
    Ok(GasPriceReading::single_tier(gwei))
}

/// Map an alloy transport failure onto the crate taxonomy
///
/// The request URL embeds the API key, so any text derived from the transport
/// error is scrubbed of it.
fn classify_rpc_error(err: RpcError<TransportErrorKind>, key: &str) -> GasFeeError {
    match err {
        RpcError::ErrorResp(payload) => GasFeeError::rejected(
            PROVIDER,
            format!("JSON-RPC error {}: {}", payload.code, payload.message),
        ),
        RpcError::Transport(TransportErrorKind::HttpError(http)) => GasFeeError::rejected(
            PROVIDER,
            format!("HTTP {}: {}", http.status, excerpt(&redact(&http.body, key))),
        ),
        RpcError::NullResp => GasFeeError::missing_field(PROVIDER, "result"),
        RpcError::DeserError { err, text } => GasFeeError::malformed(
            PROVIDER,
            format!("{err}: {}", excerpt(&redact(&text, key))),
        ),
        other => GasFeeError::unavailable(
            PROVIDER,
            std::io::Error::other(redact(&other.to_string(), key)),
        ),
    }
}

fn redact(text: &str, key: &str) -> String {
    if key.is_empty() {
        return text.to_string();
    }
    text.replace(key, "***")
}
