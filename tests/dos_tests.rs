//! Resource Exhaustion Tests
//!
//! Verifies that slow or oversized upstreams cannot stall the API: each
//! upstream call is bounded by its own timeout, providers fail
//! independently, and dataset size is capped.

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weather_adm4::catalog::store::{DatasetSource, RegionTable};
use weather_adm4::config::{AppConfig, Endpoints};
use weather_adm4::utils::validation::{check_row_limit, MAX_ROWS};
use weather_adm4::web::server::{build_state, create_router, MAX_CONCURRENT_REQUESTS, REQUEST_TIMEOUT_SECS};

/// A hanging provider times out on its own and does not hold the others
#[tokio::test]
async fn test_slow_provider_is_isolated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"main": {"temp": 29.0}})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v4/timelines"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({}))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let config = AppConfig {
        endpoints: Endpoints::all_at(&server.uri()),
        dataset: DatasetSource::Url(format!("{}/base.csv", server.uri())),
        upstream_timeout: Duration::from_millis(300),
        ..AppConfig::default()
    };
    let app = create_router(build_state(&config).await.unwrap());

    let start = Instant::now();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/weather?lat=-6.2&lon=106.8")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        elapsed < Duration::from_secs(5),
        "slow provider should be cut off by the upstream timeout, took {elapsed:?}"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["openWeather"]["main"]["temp"], 29.0);
    assert_eq!(body["tomorrowWeather"]["errorType"], "timeout");
}

/// Concurrent requests against one state all complete
#[tokio::test]
async fn test_concurrent_requests_complete() {
    let server = MockServer::start().await;
    let config = AppConfig {
        endpoints: Endpoints::all_at(&server.uri()),
        dataset: DatasetSource::Url(format!("{}/base.csv", server.uri())),
        ..AppConfig::default()
    };
    let app = create_router(build_state(&config).await.unwrap());

    let mut handles = Vec::new();
    for _ in 0..20 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(
                Request::builder()
                    .uri("/weather?lat=-6.2&lon=106.8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::BAD_GATEWAY);
    }
}

/// Server-side limits stay within sane bounds
#[test]
fn test_server_limits_are_bounded() {
    assert!(MAX_CONCURRENT_REQUESTS >= 10);
    assert!(MAX_CONCURRENT_REQUESTS <= 1000);
    assert!(REQUEST_TIMEOUT_SECS >= 10, "must exceed one upstream timeout");
    assert!(REQUEST_TIMEOUT_SECS <= 60);
}

/// Oversized datasets are refused instead of exhausting memory
#[test]
fn test_dataset_row_limit() {
    assert!(check_row_limit(MAX_ROWS - 1).is_none());
    assert!(check_row_limit(MAX_ROWS).is_some());

    // Enough to cover every village in Indonesia
    assert!(MAX_ROWS > 100_000);
}

/// A dataset with only comments and blank lines is rejected, not loaded empty
#[test]
fn test_empty_dataset_rejected() {
    let text = "# comment\n\n   \n# another\n";
    assert!(RegionTable::from_csv(text).is_err());
}
