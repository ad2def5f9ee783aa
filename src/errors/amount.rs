//! Validation errors for amount newtypes.

/// An amount failed validation when constructing one of the amount newtypes
/// ([`GasUnits`](crate::GasUnits), [`GweiPrice`](crate::GweiPrice),
/// [`TokenPrice`](crate::TokenPrice)).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AmountError {
    /// The value was below zero.
    #[error("{field} must be non-negative, got {value}")]
    Negative {
        /// Which quantity was being built
        field: &'static str,
        /// The rejected value
        value: f64,
    },

    /// The value was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite {
        /// Which quantity was being built
        field: &'static str,
    },
}

impl AmountError {
    /// Create a `Negative` error.
    pub fn negative(field: &'static str, value: f64) -> Self {
        Self::Negative { field, value }
    }

    /// Create a `NotFinite` error.
    pub fn not_finite(field: &'static str) -> Self {
        Self::NotFinite { field }
    }

    /// Validate that `value` is finite and non-negative.
    pub(crate) fn check(field: &'static str, value: f64) -> Result<f64, Self> {
        if !value.is_finite() {
            return Err(Self::not_finite(field));
        }
        if value < 0.0 {
            return Err(Self::negative(field, value));
        }
        // Normalise -0.0 so serialized output never shows a signed zero
        Ok(if value == 0.0 { 0.0 } else { value })
    }
}
