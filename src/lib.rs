// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! # gasfee: multi-chain transaction cost estimates in USD
//!
//! Given a chain and an amount of gas, gasfee fetches the chain's current gas
//! price and its native token's USD price concurrently, then computes
//!
//! ```text
//! total_cost_usd = gas_amount * gas_price_gwei * token_price_usd / 1e9
//! ```
//!
//! ## Building blocks
//!
//! - [`ChainRegistry`]: static list of supported chains and how to price them
//! - [`GasPriceSource`]: gas oracle backends ([`EtherscanGasOracle`],
//!   [`NodeRpcGasOracle`]) behind [`GasOracleRouter`]
//! - [`TokenPriceSource`]: USD quotes ([`CoinMarketCapPriceSource`])
//! - [`compute_cost`]: the pure cost formula
//! - [`GasFeeEstimator`]: ties the above together
//!
//! API keys are passed per call in a [`CredentialSet`]; keys missing from it
//! fall back to the defaults in [`GasFeeConfig`]. There is no built-in key.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use gasfee::{CredentialSet, GasFeeConfig, GasFeeEstimator, GasUnits, UpstreamProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let estimator = GasFeeEstimator::from_config(&GasFeeConfig::from_env()?)?;
//!     let credentials = CredentialSet::new()
//!         .with(UpstreamProvider::Etherscan, "my-etherscan-key")
//!         .with(UpstreamProvider::CoinMarketCap, "my-cmc-key");
//!
//!     let estimate = estimator
//!         .estimate("ethereum", GasUnits::TRANSFER, &credentials)
//!         .await?;
//!     println!("A transfer costs {}", estimate.total_cost_usd);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod bootstrap;
mod calculator;
mod chains;
pub mod config;
mod credentials;
pub mod errors;
mod estimator;
mod gas;
mod http;
mod price;
mod spans;
pub mod types;

pub use calculator::compute_cost;
pub use chains::{ChainDescriptor, ChainRegistry, GasOracle, GasOracleKind, SUPPORTED_CHAINS};
pub use config::{GasFeeConfig, GasFeeConfigBuilder};
pub use credentials::{CredentialSet, UpstreamProvider};
pub use errors::{AmountError, ConfigError, ErrorKind, GasFeeError};
pub use estimator::GasFeeEstimator;
pub use gas::{parse_hex_wei, EtherscanGasOracle, GasOracleRouter, GasPriceSource, NodeRpcGasOracle};
pub use price::{
    normalize_symbol, normalize_symbols, CoinMarketCapPriceSource, TokenPriceSource,
};
pub use types::estimate::CostEstimate;
pub use types::gas::{BlockMarker, GasPriceReading, GasUnits, GweiPrice};
pub use types::price::{TokenPrice, TokenPriceReading, UsdValue};
