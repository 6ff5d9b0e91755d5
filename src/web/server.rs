use axum::{
    extract::{Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::aggregator::WeatherAggregator;
use crate::catalog::store::RegionTable;
use crate::cli::ServeArgs;
use crate::config::AppConfig;
use crate::matching::resolver::ResolveError;
use crate::utils::validation::{parse_coordinates, ValidationError};

/// Whole-request budget; each upstream call has its own shorter timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
pub struct AppState {
    pub aggregator: WeatherAggregator,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// `lat`/`lon` as received; validated in the handler so that a missing
/// value becomes our own 400 body rather than an extractor rejection
#[derive(Deserialize)]
struct CoordinateParams {
    lat: Option<String>,
    lon: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs, config: AppConfig) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args, config).await })
}

/// Build shared state, preloading the region table when configured.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or a requested
/// preload fails.
pub async fn build_state(config: &AppConfig) -> anyhow::Result<Arc<AppState>> {
    let client = config.http_client()?;
    let mut aggregator = WeatherAggregator::new(config, client.clone());

    if config.preload_dataset {
        let table = RegionTable::load(&client, &config.dataset).await?;
        tracing::info!("Preloaded {} region rows from {}", table.len(), config.dataset);
        aggregator = aggregator.with_table(Arc::new(table));
    }

    Ok(Arc::new(AppState { aggregator }))
}

/// Create the application router with routes and middleware configured.
///
/// Rate limiting is added by [`run`], since it needs the peer address.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/weather", get(weather_handler))
        .route("/api/adm4", get(adm4_handler))
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(REQUEST_TIMEOUT_SECS),
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}

async fn run_server(args: ServeArgs, config: AppConfig) -> anyhow::Result<()> {
    config.warn_missing_keys();
    let state = build_state(&config).await?;

    // IP-based rate limiting; every request fans out to five upstreams
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(20)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?;

    let app = create_router(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    });

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting weather-adm4 server at http://{addr}");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Aggregate weather from every provider
async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinateParams>,
) -> Response {
    let start_time = std::time::Instant::now();

    let coords = match parse_coordinates(params.lat.as_deref(), params.lon.as_deref()) {
        Ok(coords) => coords,
        Err(e) => return validation_error_response(&e),
    };

    let weather = state.aggregator.aggregate(coords).await;
    let status = if weather.all_failed() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    tracing::info!(
        "GET /weather {coords} -> {} in {:?}",
        status.as_u16(),
        start_time.elapsed()
    );

    (status, Json(weather)).into_response()
}

/// Resolve the ADM4 code for a coordinate
async fn adm4_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoordinateParams>,
) -> Response {
    let coords = match parse_coordinates(params.lat.as_deref(), params.lon.as_deref()) {
        Ok(coords) => coords,
        Err(e) => return validation_error_response(&e),
    };

    match state.aggregator.resolver().resolve(coords).await {
        Ok(resolution) => Json(resolution).into_response(),
        Err(e @ ResolveError::NotResolvable(_)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(create_safe_error_response(e.kind(), &e.to_string(), None)),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(create_safe_error_response(
                e.kind(),
                "Upstream service unavailable. Please try again later.",
                Some(&e.to_string()),
            )),
        )
            .into_response(),
    }
}

fn validation_error_response(error: &ValidationError) -> Response {
    let error_type = match error {
        ValidationError::MissingCoordinate => "missing_parameter",
        ValidationError::InvalidCoordinate(_) | ValidationError::CoordinateOutOfRange(_) => {
            "invalid_coordinates"
        }
    };

    (
        StatusCode::BAD_REQUEST,
        Json(create_safe_error_response(error_type, &error.to_string(), None)),
    )
        .into_response()
}
