// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for gasfee
//!
//! [`GasFeeConfig`] controls upstream timeouts, endpoint overrides, default
//! credentials and the API bind address.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use gasfee::GasFeeConfig;
//!
//! // 5 second upstream timeout, public endpoints, no default keys
//! let config = GasFeeConfig::default();
//! assert!(config.default_credentials.is_empty());
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use gasfee::{GasFeeConfigBuilder, UpstreamProvider};
//! use std::time::Duration;
//!
//! let config = GasFeeConfigBuilder::new()
//!     .request_timeout(Duration::from_secs(2))
//!     .default_credential(UpstreamProvider::Etherscan, "my-key")
//!     .build();
//! assert_eq!(config.request_timeout, Duration::from_secs(2));
//! ```

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use url::Url;

use crate::credentials::{CredentialSet, UpstreamProvider};
use crate::errors::ConfigError;

pub mod constants;

use constants::{config_env, endpoints, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT};

/// Configuration for gasfee operations
///
/// Use [`GasFeeConfigBuilder`] for a fluent API to construct instances, or
/// [`GasFeeConfig::from_env`] to read them from the process environment.
#[derive(Debug, Clone)]
pub struct GasFeeConfig {
    /// Bound applied to every upstream call
    /// Default: 5 seconds
    pub request_timeout: Duration,

    /// Replaces the endpoint of every Etherscan-style descriptor
    /// Default: None (use the descriptor's endpoint)
    pub etherscan_endpoint: Option<Url>,

    /// CoinMarketCap base URL
    /// Default: `https://pro-api.coinmarketcap.com`
    pub coinmarketcap_base_url: Url,

    /// Node RPC URL template with `{network}` and `{key}` placeholders
    /// Default: Alchemy
    pub node_rpc_url_template: String,

    /// Process-wide default API keys
    pub default_credentials: CredentialSet,

    /// API bind address
    pub host: IpAddr,

    /// API bind port
    pub port: u16,
}

impl Default for GasFeeConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            etherscan_endpoint: None,
            coinmarketcap_base_url: default_coinmarketcap_url(),
            node_rpc_url_template: endpoints::ALCHEMY_RPC_TEMPLATE.to_string(),
            default_credentials: CredentialSet::new(),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

impl GasFeeConfig {
    /// Read configuration from the environment (`.env` is honoured via dotenvy).
    ///
    /// Unset variables keep their defaults. Default credentials come from
    /// `ETHERSCAN_API_KEY`, `ALCHEMY_API_KEY` and `COINMARKETCAP_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidVar`] when a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = GasFeeConfigBuilder::new()
            .default_credentials(CredentialSet::from_env());

        if let Some(host) = env_var(config_env::HOST) {
            let host = host
                .parse::<IpAddr>()
                .map_err(|e| ConfigError::invalid_var(config_env::HOST, e.to_string()))?;
            builder = builder.host(host);
        }

        if let Some(port) = env_var(config_env::PORT) {
            let port = port
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid_var(config_env::PORT, e.to_string()))?;
            builder = builder.port(port);
        }

        if let Some(ms) = env_var(config_env::REQUEST_TIMEOUT_MS) {
            let ms = ms.parse::<u64>().map_err(|e| {
                ConfigError::invalid_var(config_env::REQUEST_TIMEOUT_MS, e.to_string())
            })?;
            builder = builder.request_timeout(Duration::from_millis(ms));
        }

        if let Some(url) = env_var(config_env::ETHERSCAN_ENDPOINT) {
            let url = Url::parse(&url).map_err(|e| {
                ConfigError::invalid_var(config_env::ETHERSCAN_ENDPOINT, e.to_string())
            })?;
            builder = builder.etherscan_endpoint(url);
        }

        if let Some(url) = env_var(config_env::COINMARKETCAP_BASE_URL) {
            let url = Url::parse(&url).map_err(|e| {
                ConfigError::invalid_var(config_env::COINMARKETCAP_BASE_URL, e.to_string())
            })?;
            builder = builder.coinmarketcap_base_url(url);
        }

        if let Some(template) = env_var(config_env::NODE_RPC_URL_TEMPLATE) {
            if !template.contains("{key}") {
                return Err(ConfigError::invalid_var(
                    config_env::NODE_RPC_URL_TEMPLATE,
                    "template must contain a {key} placeholder",
                ));
            }
            builder = builder.node_rpc_url_template(template);
        }

        Ok(builder.build())
    }
}

fn env_var(name: &str) -> Option<String> {
    dotenvy::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_coinmarketcap_url() -> Url {
    // Compile-time constant, covered by the constants tests
    Url::parse(endpoints::COINMARKETCAP).expect("valid CoinMarketCap URL")
}

/// Builder for [`GasFeeConfig`]
///
/// # Example
///
/// ```rust
/// use gasfee::GasFeeConfigBuilder;
/// use std::time::Duration;
///
/// let config = GasFeeConfigBuilder::new()
///     .port(8080)
///     .request_timeout(Duration::from_millis(1500))
///     .build();
/// assert_eq!(config.port, 8080);
/// ```
#[derive(Debug, Default)]
pub struct GasFeeConfigBuilder {
    config: GasFeeConfig,
}

impl GasFeeConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout applied to every upstream call
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Override the Etherscan-style endpoint for every chain
    pub fn etherscan_endpoint(mut self, url: Url) -> Self {
        self.config.etherscan_endpoint = Some(url);
        self
    }

    /// Set the CoinMarketCap base URL
    pub fn coinmarketcap_base_url(mut self, url: Url) -> Self {
        self.config.coinmarketcap_base_url = url;
        self
    }

    /// Set the node RPC URL template (`{network}` and `{key}` placeholders)
    pub fn node_rpc_url_template(mut self, template: impl Into<String>) -> Self {
        self.config.node_rpc_url_template = template.into();
        self
    }

    /// Replace the default credential set
    pub fn default_credentials(mut self, credentials: CredentialSet) -> Self {
        self.config.default_credentials = credentials;
        self
    }

    /// Add a single default credential
    pub fn default_credential(mut self, provider: UpstreamProvider, key: impl Into<String>) -> Self {
        self.config.default_credentials.insert(provider, key);
        self
    }

    /// Set the API bind address
    pub fn host(mut self, host: IpAddr) -> Self {
        self.config.host = host;
        self
    }

    /// Set the API bind port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Build the configuration
    pub fn build(self) -> GasFeeConfig {
        self.config
    }
}
