// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP API
//!
//! | Route | Response |
//! |---|---|
//! | `GET /api/gas-price?chain=<id>` | [`GasPriceReading`](crate::GasPriceReading) |
//! | `GET /api/token-price?symbols=ETH,BNB` | symbol → [`TokenPriceReading`](crate::TokenPriceReading) |
//! | `GET /api/estimate?chain=<id>&gas=<units>` | [`CostEstimate`](crate::CostEstimate) |
//! | `GET /api/chains` | registered chain descriptors |
//! | `GET /health` | `ok` |
//!
//! API keys may be supplied per request with the `x-etherscan-api-key`,
//! `x-alchemy-api-key` and `x-coinmarketcap-api-key` headers; otherwise the
//! server's configured defaults apply.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::credentials::UpstreamProvider;
use crate::{ChainDescriptor, CredentialSet, ErrorKind, GasFeeError, GasFeeEstimator, GasUnits};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    estimator: Arc<GasFeeEstimator>,
}

impl AppState {
    /// Wrap an estimator for use by the handlers
    pub fn new(estimator: GasFeeEstimator) -> Self {
        Self {
            estimator: Arc::new(estimator),
        }
    }
}

/// Errors returned by handlers
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unparsable query parameter
    BadRequest(String),
    /// Failure from the estimator
    Fee(GasFeeError),
}

impl From<GasFeeError> for ApiError {
    fn from(err: GasFeeError) -> Self {
        Self::Fee(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Fee(GasFeeError::UpstreamTimeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Self::Fee(err) => match err.kind() {
                ErrorKind::ChainNotSupported | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::MissingCredential | ErrorKind::Configuration => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                ErrorKind::UpstreamRejected | ErrorKind::MalformedUpstreamPayload => {
                    StatusCode::BAD_GATEWAY
                }
                ErrorKind::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => ErrorKind::InvalidInput.as_str(),
            Self::Fee(err) => err.kind().as_str(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(message) => message.clone(),
            Self::Fee(err) => err.to_string(),
        };

        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = ErrorBody {
            error: self.kind(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Per-request key overrides from the credential headers
fn credentials_from_headers(headers: &HeaderMap) -> CredentialSet {
    let mut credentials = CredentialSet::new();
    for provider in UpstreamProvider::ALL {
        if let Some(value) = headers
            .get(provider.header_name())
            .and_then(|v| v.to_str().ok())
        {
            credentials.insert(provider, value);
        }
    }
    credentials
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("{name} parameter is required")))
}

#[derive(Debug, Deserialize)]
struct ChainQuery {
    chain: Option<String>,
}

async fn get_gas_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ChainQuery>,
) -> Result<Response, ApiError> {
    let chain = required(query.chain, "chain")?;
    info!(chain = %chain, "Received gas price request");

    let credentials = credentials_from_headers(&headers);
    let reading = state.estimator.gas_price(&chain, &credentials).await?;
    Ok(Json(reading).into_response())
}

#[derive(Debug, Deserialize)]
struct SymbolsQuery {
    symbols: Option<String>,
}

async fn get_token_price(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SymbolsQuery>,
) -> Result<Response, ApiError> {
    let symbols = required(query.symbols, "symbols")?;
    info!(symbols = %symbols, "Received token price request");

    let symbols: Vec<&str> = symbols.split(',').collect();
    let credentials = credentials_from_headers(&headers);
    let prices = state.estimator.token_prices(&symbols, &credentials).await?;
    Ok(Json(prices).into_response())
}

#[derive(Debug, Deserialize)]
struct EstimateQuery {
    chain: Option<String>,
    gas: Option<String>,
}

async fn get_estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EstimateQuery>,
) -> Result<Response, ApiError> {
    let chain = required(query.chain, "chain")?;
    let gas = required(query.gas, "gas")?;
    let gas = gas
        .trim()
        .parse::<f64>()
        .map_err(|_| ApiError::BadRequest(format!("gas is not a number: {gas}")))?;
    let gas = GasUnits::new(gas).map_err(GasFeeError::from)?;
    info!(chain = %chain, gas_amount = gas.as_f64(), "Received estimate request");

    let credentials = credentials_from_headers(&headers);
    let estimate = state.estimator.estimate(&chain, gas, &credentials).await?;
    Ok(Json(estimate).into_response())
}

async fn get_chains(State(state): State<AppState>) -> Json<&'static [ChainDescriptor]> {
    Json(state.estimator.registry().list_all())
}

async fn health() -> &'static str {
    "ok"
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/gas-price", get(get_gas_price))
        .route("/api/token-price", get(get_token_price))
        .route("/api/estimate", get(get_estimate))
        .route("/api/chains", get(get_chains))
        .route("/health", get(health))
        .with_state(state)
}

/// Starts the API server.
pub async fn serve_api(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    let app = router(state);

    let addr = listener.local_addr()?;

    info!(address = ?addr, "Starting server");

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::GasFeeConfig;

    fn app() -> Router {
        let estimator = GasFeeEstimator::from_config(&GasFeeConfig::default()).unwrap();
        router(AppState::new(estimator))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"ok");
    }

    #[tokio::test]
    async fn lists_chains() {
        let (status, json) = get(app(), "/api/chains").await;
        assert_eq!(status, StatusCode::OK);
        let chains = json.as_array().unwrap();
        assert_eq!(chains.len(), crate::SUPPORTED_CHAINS.len());
        assert_eq!(chains[0]["id"], "ethereum");
    }

    #[tokio::test]
    async fn missing_chain_is_bad_request() {
        let (status, json) = get(app(), "/api/gas-price").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");
        assert_eq!(json["message"], "chain parameter is required");
    }

    #[tokio::test]
    async fn missing_symbols_is_bad_request() {
        let (status, _) = get(app(), "/api/token-price?symbols=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_chain_is_bad_request() {
        let (status, json) = get(app(), "/api/gas-price?chain=dogechain").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "chain_not_supported");
    }

    #[tokio::test]
    async fn negative_gas_is_bad_request() {
        let (status, json) = get(app(), "/api/estimate?chain=base&gas=-5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "invalid_input");

        let (status, _) = get(app(), "/api/estimate?chain=base&gas=lots").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_server_key_is_internal_error() {
        // Default config has no keys; the backend fails before any request
        let (status, json) = get(app(), "/api/gas-price?chain=ethereum").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "missing_credential");
    }

    #[test]
    fn reads_credential_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-etherscan-api-key", "abc".parse().unwrap());
        headers.insert("x-coinmarketcap-api-key", " ".parse().unwrap());

        let credentials = credentials_from_headers(&headers);
        assert_eq!(credentials.get(UpstreamProvider::Etherscan), Some("abc"));
        assert!(!credentials.contains(UpstreamProvider::CoinMarketCap));
        assert!(!credentials.contains(UpstreamProvider::Alchemy));
    }

    #[test]
    fn status_mapping() {
        use crate::errors::AmountError;

        let cases = [
            (GasFeeError::chain_not_supported("x"), StatusCode::BAD_REQUEST),
            (
                GasFeeError::InvalidAmount(AmountError::negative("gas amount", -1.0)),
                StatusCode::BAD_REQUEST,
            ),
            (
                GasFeeError::missing_credential(UpstreamProvider::Alchemy),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                GasFeeError::rejected(UpstreamProvider::Etherscan, "NOTOK"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                GasFeeError::malformed(UpstreamProvider::CoinMarketCap, "bad"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                GasFeeError::unavailable(
                    UpstreamProvider::Etherscan,
                    std::io::Error::other("refused"),
                ),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                GasFeeError::timeout(UpstreamProvider::Etherscan, Duration::from_secs(5)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::Fee(err).status(), expected);
        }
    }
}
