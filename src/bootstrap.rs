// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{serve_api, AppState};
use crate::credentials::UpstreamProvider;
use crate::{GasFeeConfig, GasFeeEstimator};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = GasFeeConfig::from_env()?;

    for provider in UpstreamProvider::ALL {
        if !config.default_credentials.contains(provider) {
            info!(
                provider = %provider,
                env_var = provider.env_var(),
                "No default API key; requests must supply {}",
                provider.header_name()
            );
        }
    }

    let estimator = GasFeeEstimator::from_config(&config)?;

    let listener = TcpListener::bind(SocketAddr::new(config.host, config.port)).await?;

    serve_api(listener, AppState::new(estimator)).await?;

    Ok(())
}
