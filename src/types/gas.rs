// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for gas-related values
//!
//! Gas quantities are plain `f64` at this layer: oracles report fractional
//! gwei (`"0.717385674"`) and callers may pass fractional gas amounts. The
//! newtypes keep units apart and guarantee non-negative, finite values.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::constants::WEI_PER_GWEI;
use crate::errors::AmountError;

/// Amount of gas a transaction consumes
///
/// # Example
/// ```
/// use gasfee::GasUnits;
///
/// let gas = GasUnits::new(21_000.0).unwrap();
/// assert_eq!(gas.as_f64(), 21_000.0);
/// assert!(GasUnits::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GasUnits(f64);

impl GasUnits {
    /// Zero gas
    pub const ZERO: Self = Self(0.0);

    /// Gas used by a plain native-token transfer
    pub const TRANSFER: Self = Self(21_000.0);

    /// Create a gas amount, rejecting negative or non-finite values
    pub fn new(units: f64) -> Result<Self, AmountError> {
        AmountError::check("gas amount", units).map(Self)
    }

    /// Get the inner f64 value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for GasUnits {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for GasUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gas price denominated in gwei (10^-9 of the chain's native unit)
///
/// # Example
/// ```
/// use alloy_primitives::U256;
/// use gasfee::GweiPrice;
///
/// let price = GweiPrice::from_wei(U256::from(1_500_000_000u64)).unwrap();
/// assert_eq!(price.as_f64(), 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct GweiPrice(f64);

impl GweiPrice {
    /// Create a gwei price, rejecting negative or non-finite values
    pub fn new(gwei: f64) -> Result<Self, AmountError> {
        AmountError::check("gas price", gwei).map(Self)
    }

    /// Convert a wei-per-gas value to gwei
    ///
    /// Returns an error only if the value does not fit in `u128`, which no
    /// real gas price does.
    pub fn from_wei(wei: U256) -> Result<Self, AmountError> {
        let wei = u128::try_from(wei).map_err(|_| AmountError::not_finite("gas price"))?;
        Self::new(wei as f64 / WEI_PER_GWEI)
    }

    /// Parse a decimal gwei string as reported by block explorer oracles
    pub fn parse_decimal(value: &str) -> Option<Self> {
        value.trim().parse::<f64>().ok().and_then(|v| Self::new(v).ok())
    }

    /// Get the inner f64 value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Format with a `Gwei` suffix at the given precision
    ///
    /// ```
    /// use gasfee::GweiPrice;
    ///
    /// let price = GweiPrice::new(0.717385674).unwrap();
    /// assert_eq!(price.format(4), "0.7174 Gwei");
    /// ```
    pub fn format(&self, precision: usize) -> String {
        format!("{:.precision$} Gwei", self.0, precision = precision)
    }
}

impl<'de> Deserialize<'de> for GweiPrice {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for GweiPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} gwei", self.0)
    }
}

/// Most recent block the oracle observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "number")]
pub enum BlockMarker {
    /// Block number reported by the oracle
    Number(u64),
    /// The backend does not report a block (e.g. `eth_gasPrice`)
    Unknown,
}

impl BlockMarker {
    /// Block number, if known
    pub fn number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for BlockMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Snapshot of a chain's gas price
///
/// Three tiers in gwei, the last block the oracle saw, and the instant the
/// reading was captured locally. Created fresh by every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasPriceReading {
    /// Conservative tier
    pub safe: GweiPrice,
    /// Standard tier, used for estimates
    pub propose: GweiPrice,
    /// Fast tier
    pub fast: GweiPrice,
    /// Suggested base fee, when the oracle reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_fee: Option<GweiPrice>,
    /// Last block observed by the oracle
    pub last_block: BlockMarker,
    /// Local capture time (not the oracle's)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl GasPriceReading {
    /// A reading where every tier carries the same price
    ///
    /// Used by backends that only expose a single price point.
    pub fn single_tier(price: GweiPrice) -> Self {
        Self {
            safe: price,
            propose: price,
            fast: price,
            base_fee: None,
            last_block: BlockMarker::Unknown,
            timestamp: Utc::now(),
        }
    }
}
