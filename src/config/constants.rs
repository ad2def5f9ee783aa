//! Well-known endpoints, environment variables and header names
//!
//! This module centralizes the upstream URLs and the names used to source
//! credentials so they are discoverable in one place.

use std::time::Duration;

/// Default bound on every upstream call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;

/// Upstream endpoints
pub mod endpoints {
    /// Etherscan v2 multichain API. One key serves every chain; the chain is
    /// selected with the `chainid` query parameter.
    pub const ETHERSCAN_V2: &str = "https://api.etherscan.io/v2/api";

    /// CoinMarketCap pro API base URL.
    pub const COINMARKETCAP: &str = "https://pro-api.coinmarketcap.com";

    /// Path of the latest-quotes endpoint, relative to the configured base URL.
    ///
    /// Relative (no leading `/`) so a base URL with a path prefix keeps it.
    pub const COINMARKETCAP_QUOTES_PATH: &str = "v1/cryptocurrency/quotes/latest";

    /// Alchemy node RPC URL template. `{network}` and `{key}` are substituted
    /// per call.
    pub const ALCHEMY_RPC_TEMPLATE: &str = "https://{network}.g.alchemy.com/v2/{key}";
}

/// Environment variables holding default API keys
pub mod credential_env {
    /// Etherscan API key
    pub const ETHERSCAN: &str = "ETHERSCAN_API_KEY";
    /// Alchemy API key
    pub const ALCHEMY: &str = "ALCHEMY_API_KEY";
    /// CoinMarketCap API key
    pub const COINMARKETCAP: &str = "COINMARKETCAP_API_KEY";
}

/// Request headers carrying per-call API key overrides
pub mod credential_headers {
    /// Etherscan API key override
    pub const ETHERSCAN: &str = "x-etherscan-api-key";
    /// Alchemy API key override
    pub const ALCHEMY: &str = "x-alchemy-api-key";
    /// CoinMarketCap API key override
    pub const COINMARKETCAP: &str = "x-coinmarketcap-api-key";
}

/// Environment variables read by [`GasFeeConfig::from_env`](crate::GasFeeConfig::from_env)
pub mod config_env {
    /// Bind address
    pub const HOST: &str = "API_HOST";
    /// Bind port
    pub const PORT: &str = "API_PORT";
    /// Upstream timeout in milliseconds
    pub const REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";
    /// Etherscan endpoint override
    pub const ETHERSCAN_ENDPOINT: &str = "ETHERSCAN_ENDPOINT";
    /// CoinMarketCap base URL override
    pub const COINMARKETCAP_BASE_URL: &str = "COINMARKETCAP_BASE_URL";
    /// Node RPC URL template override
    pub const NODE_RPC_URL_TEMPLATE: &str = "NODE_RPC_URL_TEMPLATE";
}

/// CoinMarketCap API key header.
pub const COINMARKETCAP_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";

/// Wei per gwei.
pub const WEI_PER_GWEI: f64 = 1_000_000_000.0;
