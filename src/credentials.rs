// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Upstream providers and API key resolution
//!
//! Every upstream call needs an API key for exactly one [`UpstreamProvider`].
//! Keys are resolved per call in this order:
//!
//! 1. The caller's [`CredentialSet`] (e.g. built from request headers)
//! 2. The process-wide defaults held by the backend (from configuration)
//!
//! If neither has a key the call fails with
//! [`GasFeeError::MissingCredential`] before anything is sent over the wire.
//! There is no built-in fallback key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::constants::{credential_env, credential_headers};
use crate::GasFeeError;

/// External service that requires an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpstreamProvider {
    /// Etherscan v2 multichain gas oracle
    Etherscan,
    /// Alchemy node RPC (`eth_gasPrice`)
    Alchemy,
    /// CoinMarketCap price quotes
    CoinMarketCap,
}

impl UpstreamProvider {
    /// All providers, in a stable order.
    pub const ALL: [UpstreamProvider; 3] = [Self::Etherscan, Self::Alchemy, Self::CoinMarketCap];

    /// Lowercase provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Etherscan => "etherscan",
            Self::Alchemy => "alchemy",
            Self::CoinMarketCap => "coinmarketcap",
        }
    }

    /// Environment variable holding the default key.
    pub fn env_var(&self) -> &'static str {
        match self {
            Self::Etherscan => credential_env::ETHERSCAN,
            Self::Alchemy => credential_env::ALCHEMY,
            Self::CoinMarketCap => credential_env::COINMARKETCAP,
        }
    }

    /// Request header a caller can use to override the default key.
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::Etherscan => credential_headers::ETHERSCAN,
            Self::Alchemy => credential_headers::ALCHEMY,
            Self::CoinMarketCap => credential_headers::COINMARKETCAP,
        }
    }
}

impl std::fmt::Display for UpstreamProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of API keys keyed by provider.
///
/// Used both for per-call overrides and for the configured defaults. `Debug`
/// output lists providers only; key material is never printed.
///
/// # Examples
///
/// ```
/// use gasfee::{CredentialSet, UpstreamProvider};
///
/// let defaults = CredentialSet::new().with(UpstreamProvider::Etherscan, "server-key");
/// let overrides = CredentialSet::new().with(UpstreamProvider::Etherscan, "caller-key");
///
/// let key = overrides.resolve(UpstreamProvider::Etherscan, &defaults).unwrap();
/// assert_eq!(key, "caller-key");
///
/// let missing = overrides.resolve(UpstreamProvider::Alchemy, &defaults);
/// assert!(missing.is_err());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    keys: HashMap<UpstreamProvider, String>,
}

impl CredentialSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// Blank keys are ignored so an empty header or env var never shadows a
    /// usable default.
    #[must_use]
    pub fn with(mut self, provider: UpstreamProvider, key: impl Into<String>) -> Self {
        self.insert(provider, key);
        self
    }

    /// Insert or replace the key for `provider`. Blank keys are ignored.
    pub fn insert(&mut self, provider: UpstreamProvider, key: impl Into<String>) {
        let key = key.into();
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return;
        }
        self.keys.insert(provider, trimmed.to_string());
    }

    /// Key for `provider`, if present in this set.
    pub fn get(&self, provider: UpstreamProvider) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    /// Whether this set holds a key for `provider`.
    pub fn contains(&self, provider: UpstreamProvider) -> bool {
        self.keys.contains_key(&provider)
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Resolve a key for `provider`: this set first, then `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`GasFeeError::MissingCredential`] if neither set has a key.
    pub fn resolve<'a>(
        &'a self,
        provider: UpstreamProvider,
        defaults: &'a CredentialSet,
    ) -> Result<&'a str, GasFeeError> {
        self.get(provider)
            .or_else(|| defaults.get(provider))
            .ok_or_else(|| GasFeeError::missing_credential(provider))
    }

    /// Load default keys from the environment (and `.env`, via dotenvy).
    ///
    /// Providers whose variable is unset or blank are simply absent.
    pub fn from_env() -> Self {
        let mut set = Self::new();
        for provider in UpstreamProvider::ALL {
            if let Ok(key) = dotenvy::var(provider.env_var()) {
                set.insert(provider, key);
            }
        }
        set
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut providers: Vec<_> = self.keys.keys().map(UpstreamProvider::name).collect();
        providers.sort_unstable();
        f.debug_struct("CredentialSet")
            .field("providers", &providers)
            .finish()
    }
}
