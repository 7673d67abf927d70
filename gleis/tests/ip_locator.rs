//! Drives the IP location provider against a fake geolocation service.

use std::net::SocketAddr;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use serde_json::json;

use gleis::domain::Location;
use gleis::locator::{IpLocationProvider, LocationError, LocationProvider};

/// Serve `app` on an ephemeral port and return the `/json` URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/json")
}

#[tokio::test]
async fn locates_from_response() {
    let app = Router::new().route(
        "/json",
        get(|| async {
            axum::Json(json!({
                "status": "success",
                "city": "Basel",
                "lat": 47.5584,
                "lon": 7.5733
            }))
        }),
    );
    let provider = IpLocationProvider::with_url(serve(app).await, 5).unwrap();

    let location = provider.current_location().await.unwrap();
    assert_eq!(location, Location::new(47.5584, 7.5733).with_name("Basel"));
}

#[tokio::test]
async fn unknown_city_gets_default_name() {
    let app = Router::new().route(
        "/json",
        get(|| async { axum::Json(json!({ "lat": 46.0, "lon": 8.0 })) }),
    );
    let provider = IpLocationProvider::with_url(serve(app).await, 5).unwrap();

    let location = provider.current_location().await.unwrap();
    assert_eq!(location.name(), Some("Unknown Location"));
}

#[tokio::test]
async fn error_status_is_reported() {
    let app = Router::new().route(
        "/json",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "rate limited").into_response() }),
    );
    let provider = IpLocationProvider::with_url(serve(app).await, 5).unwrap();

    match provider.current_location().await.unwrap_err() {
        LocationError::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "rate limited");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_json_error() {
    let app = Router::new().route("/json", get(|| async { "not json" }));
    let provider = IpLocationProvider::with_url(serve(app).await, 5).unwrap();

    let err = provider.current_location().await.unwrap_err();
    assert!(matches!(err, LocationError::Json { .. }));
}
