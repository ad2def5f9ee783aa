//! Error types for loading configuration from the environment.

/// Errors raised while building a [`GasFeeConfig`](crate::GasFeeConfig) from
/// environment variables.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable was present but could not be parsed.
    #[error("Invalid value for {var}: {details}")]
    InvalidVar {
        /// Name of the variable
        var: &'static str,
        /// Why the value was rejected
        details: String,
    },
}

impl ConfigError {
    /// Create an `InvalidVar` error.
    pub fn invalid_var(var: &'static str, details: impl Into<String>) -> Self {
        Self::InvalidVar {
            var,
            details: details.into(),
        }
    }
}
