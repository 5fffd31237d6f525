//! End-to-end plan-safe-route flow over real sockets.
//!
//! Starts a stand-in directions/forecast service and the AirSense router on
//! ephemeral ports, then drives the public API with reqwest.

use airsense_server::{api, config::Config, state::AppState};
use airsense_upstream::{ForecastClient, OsrmClient};
use axum::{routing::get, Json, Router};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn start_upstream() -> String {
    let app = Router::new()
        .route(
            "/route/v1/:profile/:coords",
            get(|| async {
                Json(json!({
                    "code": "Ok",
                    "routes": [
                        {
                            "geometry": {"type": "LineString", "coordinates": [[-0.1276, 51.5072], [-0.1276, 51.5300]]},
                            "distance": 2540.0,
                            "duration": 420.0
                        },
                        {
                            "geometry": {"type": "LineString", "coordinates": [[-0.1276, 51.5072], [-0.1100, 51.5186], [-0.1276, 51.5300]]},
                            "distance": 3100.0,
                            "duration": 480.0
                        }
                    ]
                }))
            }),
        )
        .route(
            "/api/maps/forecast",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "count": 1,
                    "data": [
                        {"node_id": 7, "lat": 51.52, "lon": -0.12, "aqi_now": 42.0,
                         "aqi_6h": 48.0, "aqi_12h": 61.0, "aqi_24h": 75.0, "wind_direction": 180.0}
                    ]
                }))
            }),
        );
    serve(app).await
}

async fn start_server(upstream: &str) -> String {
    let config = Config::from_lookup(|key| match key {
        "OSRM_BASE_URL" | "FORECAST_SERVICE_URL" => Some(upstream.to_string()),
        "AIRSENSE_SAMPLE_INTERVAL_M" => Some("250".to_string()),
        _ => None,
    });
    let osrm = OsrmClient::with_client(client(), upstream, config.osrm_profile.clone());
    let forecast = ForecastClient::with_client(client(), upstream);
    let state = Arc::new(AppState::with_clients(config, osrm, forecast));
    serve(api::routes().with_state(state)).await
}

fn client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn plan_safe_route_end_to_end() {
    let upstream = start_upstream().await;
    let base = start_server(&upstream).await;

    let resp = client()
        .post(format!("{}/v1/trips/plan-safe-route", base))
        .json(&json!({
            "start_lat": 51.5072,
            "start_lon": -0.1276,
            "end_lat": 51.5300,
            "end_lon": -0.1276,
            "horizon": "24h",
            "health_profile": {"asthma": true, "elderly": true}
        }))
        .send()
        .await
        .expect("plan request");

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "success");

    let routes = body["data"]["routes"].as_array().unwrap();
    assert_eq!(routes.len(), 2);
    assert_eq!(body["data"]["best_route_id"], routes[0]["route_id"]);

    // A single sensor covers every segment, so both routes see the 24h value.
    for route in routes {
        assert_eq!(route["avg_aqi"], 75.0);
        assert_eq!(route["risk"], "Medium");
        assert!(route["exposure_score"].as_f64().unwrap() > 0.0);
    }
    assert_eq!(routes[0]["route_id"], 1);
}

#[tokio::test]
async fn nearest_and_health_end_to_end() {
    let upstream = start_upstream().await;
    let base = start_server(&upstream).await;
    let client = client();

    let health = client.get(format!("{}/health", base)).send().await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(health.text().await.unwrap(), "OK");

    let nearest: Value = client
        .get(format!("{}/v1/air-quality/nearest", base))
        .query(&[("lat", "51.51"), ("lon", "-0.13"), ("horizon", "12h")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(nearest["status"], "success");
    assert_eq!(nearest["data"]["node_id"], 7);
    assert_eq!(nearest["data"]["aqi"], 61.0);
    assert_eq!(nearest["data"]["risk"], "Medium");
    assert_eq!(nearest["data"]["color"], "#f97316");
}
