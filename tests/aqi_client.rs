//! AQI client against a local stand-in for the AQI endpoint

use axum::{
    Router,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use sustainearth::config::AqiConfig;
use sustainearth::{AqiCategory, AqiClient, AqiSource, SustainEarthError};

#[derive(Deserialize)]
struct CityQuery {
    city: String,
}

/// Echoes the city back; the AQI value is picked from the city name so one
/// server covers every scenario.
async fn aqi_endpoint(Query(query): Query<CityQuery>) -> Response {
    match query.city.as_str() {
        "Broken" => (StatusCode::INTERNAL_SERVER_ERROR, "model crashed").into_response(),
        "Garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "Unmeasured" => {
            let body = serde_json::json!({
                "location": "Unmeasured",
                "aqi": null,
                "pollutants": { "pm25": 13.0 }
            });
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        "Slow" => {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            (StatusCode::OK, "{}").into_response()
        }
        city => {
            let aqi = if city == "Delhi" { 301.0 } else { 50.0 };
            let body = serde_json::json!({
                "location": city,
                "aqi": aqi,
                "category": "Moderate",
                "pollutants": { "pm25": 13.0, "pm10": 296.0, "o3": null, "no2": 21.5 },
                "healthImpactScore": 12.5,
                "healthImpactClass": "Very Low Impact Risk"
            });
            (StatusCode::OK, axum::Json(body)).into_response()
        }
    }
}

async fn spawn_endpoint() -> String {
    let app = Router::new().route("/", get(aqi_endpoint));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: String) -> AqiClient {
    AqiClient::new(&AqiConfig {
        base_url,
        timeout_seconds: 1,
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_derives_category_locally() {
    let client = client(spawn_endpoint().await);

    let result = client.fetch("Bengaluru").await.unwrap();
    assert_eq!(result.reading.location, "Bengaluru");
    assert_eq!(result.reading.aqi, 50.0);
    // upstream said Moderate; the value says Good
    assert_eq!(result.category, AqiCategory::Good);
    assert_eq!(result.advisory, AqiCategory::Good.advisory());
    assert_eq!(result.reading.pollutants.pm10, Some(296.0));
    assert_eq!(result.reading.pollutants.o3, None);

    let result = client.fetch("Delhi").await.unwrap();
    assert_eq!(result.category, AqiCategory::Hazardous);
}

#[tokio::test]
async fn test_fetch_encodes_location_with_spaces() {
    let client = client(spawn_endpoint().await);
    let result = client.fetch("New York").await.unwrap();
    assert_eq!(result.reading.location, "New York");
}

#[tokio::test]
async fn test_error_status_is_generic_failure() {
    let client = client(spawn_endpoint().await);
    let err = client.fetch("Broken").await.unwrap_err();
    assert!(matches!(err, SustainEarthError::Api { .. }));
    assert_eq!(err.user_message(), "Failed to fetch air quality data");
}

#[tokio::test]
async fn test_malformed_body_is_generic_failure() {
    let client = client(spawn_endpoint().await);
    let err = client.fetch("Garbled").await.unwrap_err();
    assert!(matches!(err, SustainEarthError::Api { .. }));
    assert_eq!(err.user_message(), "Failed to fetch air quality data");
}

#[tokio::test]
async fn test_null_aqi_is_generic_failure() {
    let client = client(spawn_endpoint().await);
    let err = client.fetch("Unmeasured").await.unwrap_err();
    assert!(matches!(err, SustainEarthError::Api { .. }));
    assert_eq!(err.user_message(), "Failed to fetch air quality data");
}

#[tokio::test]
async fn test_timeout_is_generic_failure() {
    let client = client(spawn_endpoint().await);
    let err = client.fetch("Slow").await.unwrap_err();
    assert!(matches!(err, SustainEarthError::Api { .. }));
}
