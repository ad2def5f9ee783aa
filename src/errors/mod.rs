// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the gasfee library.
//!
//! Every fallible operation in the crate returns [`GasFeeError`]. The variants
//! follow the estimation pipeline: registry lookup, credential resolution, then
//! the upstream call itself (unavailable, rejected, or answered with a payload
//! we could not understand).
//!
//! Callers that only need to branch on the *category* of failure (for example
//! to pick an HTTP status) should use [`GasFeeError::kind`], which collapses
//! the variants into the stable [`ErrorKind`] taxonomy.
//!
//! # Examples
//!
//! ```rust,ignore
//! use gasfee::{ErrorKind, GasFeeEstimator, GasUnits, CredentialSet};
//!
//! async fn example(estimator: &GasFeeEstimator) {
//!     let gas = GasUnits::new(21_000.0).unwrap();
//!     match estimator.estimate("ethereum", gas, &CredentialSet::new()).await {
//!         Ok(estimate) => println!("{}", estimate.total_cost_usd),
//!         Err(e) if e.kind() == ErrorKind::ChainNotSupported => eprintln!("bad input: {e}"),
//!         Err(e) => eprintln!("upstream trouble: {e}"),
//!     }
//! }
//! ```

mod amount;
mod config;

pub use amount::AmountError;
pub use config::ConfigError;

use std::time::Duration;

use crate::credentials::UpstreamProvider;
use crate::GasOracleKind;

/// Errors produced while estimating a transaction cost.
#[derive(Debug, thiserror::Error)]
pub enum GasFeeError {
    /// The requested chain is not in the registry.
    #[error("Chain not supported: {chain}")]
    ChainNotSupported {
        /// The identifier the caller asked for
        chain: String,
    },

    /// No API key could be resolved for an upstream provider.
    ///
    /// Neither the per-call [`CredentialSet`](crate::CredentialSet) nor the
    /// configured defaults carry a key for this provider.
    #[error("No API key configured for {provider}")]
    MissingCredential {
        /// Provider whose key is missing
        provider: UpstreamProvider,
    },

    /// The upstream could not be reached (connection, DNS, TLS, I/O).
    #[error("{provider} is unavailable")]
    UpstreamUnavailable {
        /// Provider that failed
        provider: UpstreamProvider,
        /// The underlying transport error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The upstream did not answer within the configured timeout.
    #[error("{provider} did not respond within {timeout:?}")]
    UpstreamTimeout {
        /// Provider that timed out
        provider: UpstreamProvider,
        /// Timeout that elapsed
        timeout: Duration,
    },

    /// The upstream answered but refused the request.
    ///
    /// Covers non-success HTTP statuses, `status != "1"` from block explorer
    /// oracles, non-zero CoinMarketCap error codes and JSON-RPC error objects.
    #[error("{provider} rejected the request: {reason}")]
    UpstreamRejected {
        /// Provider that rejected the request
        provider: UpstreamProvider,
        /// Message reported by the upstream
        reason: String,
    },

    /// The upstream answered with a payload that could not be interpreted.
    #[error("Malformed payload from {provider}: {details}")]
    MalformedUpstreamPayload {
        /// Provider that sent the payload
        provider: UpstreamProvider,
        /// What was wrong with it
        details: String,
    },

    /// A caller-supplied amount was negative or not finite.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    /// A descriptor points at a gas oracle style with no registered backend.
    #[error("No gas oracle backend registered for {kind:?}")]
    OracleBackendMissing {
        /// The oracle style requested by the chain descriptor
        kind: GasOracleKind,
    },

    /// An upstream endpoint URL could not be built.
    #[error("Invalid endpoint URL {url}: {details}")]
    InvalidEndpoint {
        /// The URL (credentials redacted) that failed to parse
        url: String,
        /// Parser message
        details: String,
    },
}

/// Coarse classification of [`GasFeeError`] variants.
///
/// This is the taxonomy surfaced to callers; it lets the inbound layer tell
/// "bad input" apart from "upstream trouble" without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown chain identifier
    ChainNotSupported,
    /// Caller input failed validation
    InvalidInput,
    /// No credential resolvable for a provider
    MissingCredential,
    /// Network failure or timeout
    UpstreamUnavailable,
    /// Upstream refused the request
    UpstreamRejected,
    /// Upstream payload could not be parsed
    MalformedUpstreamPayload,
    /// Local wiring problem (missing backend, bad endpoint)
    Configuration,
}

impl ErrorKind {
    /// Stable snake_case name, used in API error bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChainNotSupported => "chain_not_supported",
            Self::InvalidInput => "invalid_input",
            Self::MissingCredential => "missing_credential",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamRejected => "upstream_rejected",
            Self::MalformedUpstreamPayload => "malformed_upstream_payload",
            Self::Configuration => "configuration",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl GasFeeError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ChainNotSupported { .. } => ErrorKind::ChainNotSupported,
            Self::MissingCredential { .. } => ErrorKind::MissingCredential,
            Self::UpstreamUnavailable { .. } | Self::UpstreamTimeout { .. } => {
                ErrorKind::UpstreamUnavailable
            }
            Self::UpstreamRejected { .. } => ErrorKind::UpstreamRejected,
            Self::MalformedUpstreamPayload { .. } => ErrorKind::MalformedUpstreamPayload,
            Self::InvalidAmount(_) => ErrorKind::InvalidInput,
            Self::OracleBackendMissing { .. } | Self::InvalidEndpoint { .. } => {
                ErrorKind::Configuration
            }
        }
    }

    /// Create a `ChainNotSupported` error.
    pub fn chain_not_supported(chain: impl Into<String>) -> Self {
        Self::ChainNotSupported {
            chain: chain.into(),
        }
    }

    /// Create a `MissingCredential` error.
    pub fn missing_credential(provider: UpstreamProvider) -> Self {
        Self::MissingCredential { provider }
    }

    /// Create an `UpstreamUnavailable` error from any transport error.
    pub fn unavailable(
        provider: UpstreamProvider,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::UpstreamUnavailable {
            provider,
            source: Box::new(source),
        }
    }

    /// Create an `UpstreamTimeout` error.
    pub fn timeout(provider: UpstreamProvider, timeout: Duration) -> Self {
        Self::UpstreamTimeout { provider, timeout }
    }

    /// Create an `UpstreamRejected` error.
    pub fn rejected(provider: UpstreamProvider, reason: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            provider,
            reason: reason.into(),
        }
    }

    /// Create a `MalformedUpstreamPayload` error.
    pub fn malformed(provider: UpstreamProvider, details: impl Into<String>) -> Self {
        Self::MalformedUpstreamPayload {
            provider,
            details: details.into(),
        }
    }

    /// Helper for a required field that was absent from an upstream payload.
    pub fn missing_field(provider: UpstreamProvider, field: &str) -> Self {
        Self::malformed(provider, format!("missing field `{field}`"))
    }
}
