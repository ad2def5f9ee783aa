// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Supported chains and their gas oracle metadata
//!
//! The registry is a closed, hand-maintained static list. Adding a chain is a
//! data change here; nothing else in the crate branches on chain identity.
//! Each [`ChainDescriptor`] says *which style* of gas oracle serves it
//! ([`GasOracle`]) and which provider's key that oracle needs.
//!
//! # Example
//!
//! ```rust
//! use gasfee::ChainRegistry;
//!
//! let registry = ChainRegistry::builtin();
//!
//! let base = registry.lookup_by_id("base").unwrap();
//! assert_eq!(base.chain_id, 8453);
//! assert_eq!(base.native_token, "ETH");
//!
//! // Numeric ids work too
//! assert_eq!(registry.resolve("8453").unwrap().id, "base");
//! assert!(registry.lookup_by_id("dogechain").is_none());
//! ```

use alloy_chains::Chain;
use serde::Serialize;

use crate::config::constants::endpoints;
use crate::credentials::UpstreamProvider;

/// Where a chain's gas price comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "style")]
pub enum GasOracle {
    /// Block-explorer gas oracle JSON API (`module=gastracker&action=gasoracle`)
    Etherscan {
        /// Endpoint URL; the chain is selected via the `chainid` parameter
        endpoint: &'static str,
    },
    /// Node JSON-RPC `eth_gasPrice`
    NodeRpc {
        /// Provider network slug substituted into the RPC URL template
        network: &'static str,
    },
}

impl GasOracle {
    /// The backend style, used to route to a [`GasPriceSource`](crate::GasPriceSource)
    pub fn kind(&self) -> GasOracleKind {
        match self {
            Self::Etherscan { .. } => GasOracleKind::Etherscan,
            Self::NodeRpc { .. } => GasOracleKind::NodeRpc,
        }
    }
}

/// Discriminant of [`GasOracle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GasOracleKind {
    /// Block-explorer JSON oracle
    Etherscan,
    /// Node JSON-RPC
    NodeRpc,
}

/// Identity and metadata for one supported chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Symbolic id, unique across the registry
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// EIP-155 chain id, unique across the registry
    pub chain_id: u64,
    /// Native token symbol (shared by several chains, e.g. `ETH`)
    pub native_token: &'static str,
    /// Gas oracle serving this chain
    pub gas_oracle: GasOracle,
    /// Provider whose API key the gas oracle needs
    pub credential: UpstreamProvider,
}

impl ChainDescriptor {
    /// The chain as an alloy [`Chain`]
    pub fn chain(&self) -> Chain {
        Chain::from_id(self.chain_id)
    }
}

const fn etherscan_chain(
    id: &'static str,
    name: &'static str,
    chain_id: u64,
    native_token: &'static str,
) -> ChainDescriptor {
    ChainDescriptor {
        id,
        name,
        chain_id,
        native_token,
        gas_oracle: GasOracle::Etherscan {
            endpoint: endpoints::ETHERSCAN_V2,
        },
        credential: UpstreamProvider::Etherscan,
    }
}

const fn alchemy_chain(
    id: &'static str,
    name: &'static str,
    chain_id: u64,
    native_token: &'static str,
    network: &'static str,
) -> ChainDescriptor {
    ChainDescriptor {
        id,
        name,
        chain_id,
        native_token,
        gas_oracle: GasOracle::NodeRpc { network },
        credential: UpstreamProvider::Alchemy,
    }
}

/// Chains supported out of the box
pub static SUPPORTED_CHAINS: &[ChainDescriptor] = &[
    etherscan_chain("ethereum", "Ethereum", 1, "ETH"),
    etherscan_chain("bnb", "BNB Chain", 56, "BNB"),
    etherscan_chain("base", "Base", 8453, "ETH"),
    etherscan_chain("arbitrum", "Arbitrum", 42161, "ETH"),
    etherscan_chain("optimism", "Optimism", 10, "ETH"),
    alchemy_chain("berachain", "Berachain bArtio", 80084, "BERA", "berachain-bartio"),
    alchemy_chain("polygon", "Polygon", 137, "POL", "polygon-mainnet"),
];

/// Read-only lookup over a static list of chain descriptors
#[derive(Debug, Clone, Copy)]
pub struct ChainRegistry {
    chains: &'static [ChainDescriptor],
}

impl Default for ChainRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ChainRegistry {
    /// Registry over [`SUPPORTED_CHAINS`]
    pub const fn builtin() -> Self {
        Self {
            chains: SUPPORTED_CHAINS,
        }
    }

    /// Registry over a custom list
    ///
    /// The caller is responsible for keeping ids and chain ids unique.
    pub const fn new(chains: &'static [ChainDescriptor]) -> Self {
        Self { chains }
    }

    /// Look up by symbolic id (exact match)
    pub fn lookup_by_id(&self, id: &str) -> Option<&'static ChainDescriptor> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Look up by EIP-155 chain id
    pub fn lookup_by_chain_id(&self, chain_id: u64) -> Option<&'static ChainDescriptor> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    /// Look up by symbolic id, or by numeric chain id if `key` is all digits
    pub fn resolve(&self, key: &str) -> Option<&'static ChainDescriptor> {
        let key = key.trim();
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            return key
                .parse::<u64>()
                .ok()
                .and_then(|id| self.lookup_by_chain_id(id));
        }
        self.lookup_by_id(key)
    }

    /// All descriptors, in registry order
    pub fn list_all(&self) -> &'static [ChainDescriptor] {
        self.chains
    }
}
