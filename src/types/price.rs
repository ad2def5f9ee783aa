// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token price and USD value types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AmountError;

/// USD price of one unit of a token
///
/// # Examples
///
/// ```
/// use gasfee::TokenPrice;
///
/// let eth = TokenPrice::new(3_150.25).unwrap();
/// assert_eq!(eth.as_f64(), 3_150.25);
/// assert!(TokenPrice::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TokenPrice(f64);

impl TokenPrice {
    /// Zero price
    pub const ZERO: Self = Self(0.0);

    /// Create a token price, rejecting negative or non-finite values
    pub fn new(usd_per_token: f64) -> Result<Self, AmountError> {
        AmountError::check("token price", usd_per_token).map(Self)
    }

    /// Get the inner f64 value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Format as price string with specified precision
    pub fn format(&self, precision: usize) -> String {
        format!("${:.precision$}", self.0, precision = precision)
    }
}

impl<'de> Deserialize<'de> for TokenPrice {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for TokenPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// A USD-denominated value
///
/// Carries full `f64` precision. Rounding is a presentation concern; use
/// [`UsdValue::format`] at the edge.
///
/// # Examples
///
/// ```
/// use gasfee::UsdValue;
///
/// let cost = UsdValue::new(0.0421337);
/// assert_eq!(cost.format(2), "$0.04");
/// assert_eq!(cost.format(6), "$0.042134");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsdValue(f64);

impl UsdValue {
    /// Create a new USD value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the inner f64 value
    pub const fn as_f64(&self) -> f64 {
        self.0
    }

    /// Format as USD string with specified precision
    pub fn format(&self, precision: usize) -> String {
        format!("${:.precision$}", self.0, precision = precision)
    }
}

impl std::fmt::Display for UsdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.8}", self.0)
    }
}

/// Snapshot of a token's USD price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPriceReading {
    /// Token symbol as requested (upper-case)
    pub symbol: String,
    /// Price in USD
    pub price: TokenPrice,
    /// Local capture time
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl TokenPriceReading {
    /// Create a reading captured now
    pub fn new(symbol: impl Into<String>, price: TokenPrice) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            timestamp: Utc::now(),
        }
    }
}
