// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Gas price fetching
//!
//! [`GasPriceSource`] is the seam between the estimator and the outside world.
//! Two backends implement it:
//!
//! - [`EtherscanGasOracle`]: block-explorer style gas oracle JSON API
//! - [`NodeRpcGasOracle`]: `eth_gasPrice` against a node provider
//!
//! [`GasOracleRouter`] also implements it and dispatches on the descriptor's
//! [`GasOracle`](crate::GasOracle) style. Adding a third style means adding a
//! backend and registering it with the router; no call site changes.
//!
//! # Example
//!
//! ```rust,ignore
//! use gasfee::{ChainRegistry, CredentialSet, GasFeeConfig, GasOracleRouter, GasPriceSource};
//!
//! let router = GasOracleRouter::from_config(&GasFeeConfig::from_env()?)?;
//! let base = ChainRegistry::builtin().lookup_by_id("base").unwrap();
//! let reading = router.fetch(base, &CredentialSet::new()).await?;
//! println!("standard tier: {}", reading.propose);
//! ```

mod etherscan;
mod node_rpc;

pub use etherscan::EtherscanGasOracle;
pub use node_rpc::{parse_hex_wei, NodeRpcGasOracle};

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use crate::{
    spans, ChainDescriptor, CredentialSet, GasFeeConfig, GasFeeError, GasOracleKind,
    GasPriceReading,
};

/// Fetches the current gas price for a chain
///
/// Implementations resolve the API key for `chain.credential` from
/// `credentials`, falling back to their configured defaults, and fail with
/// [`GasFeeError::MissingCredential`] before any network call if neither has
/// one. Calls are bounded by the implementation's timeout.
#[async_trait]
pub trait GasPriceSource: Send + Sync {
    /// Fetch a fresh reading for `chain`
    async fn fetch(
        &self,
        chain: &ChainDescriptor,
        credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError>;
}

/// Dispatches to a backend based on the chain's gas oracle style
#[derive(Clone, Default)]
pub struct GasOracleRouter {
    backends: HashMap<GasOracleKind, Arc<dyn GasPriceSource>>,
}

impl GasOracleRouter {
    /// Create a router with no backends
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with the Etherscan and node RPC backends from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &GasFeeConfig) -> Result<Self, GasFeeError> {
        Ok(Self::new()
            .with_backend(
                GasOracleKind::Etherscan,
                Arc::new(EtherscanGasOracle::from_config(config)?),
            )
            .with_backend(
                GasOracleKind::NodeRpc,
                Arc::new(NodeRpcGasOracle::from_config(config)),
            ))
    }

    /// Register (or replace) the backend for an oracle style
    #[must_use]
    pub fn with_backend(mut self, kind: GasOracleKind, backend: Arc<dyn GasPriceSource>) -> Self {
        self.backends.insert(kind, backend);
        self
    }

    /// Whether a backend is registered for `kind`
    pub fn supports(&self, kind: GasOracleKind) -> bool {
        self.backends.contains_key(&kind)
    }
}

#[async_trait]
impl GasPriceSource for GasOracleRouter {
    async fn fetch(
        &self,
        chain: &ChainDescriptor,
        credentials: &CredentialSet,
    ) -> Result<GasPriceReading, GasFeeError> {
        let kind = chain.gas_oracle.kind();
        let backend = self
            .backends
            .get(&kind)
            .ok_or(GasFeeError::OracleBackendMissing { kind })?;

        let span = spans::fetch_gas_price(chain.id, chain.chain_id, kind);
        backend.fetch(chain, credentials).instrument(span).await
    }
}
