//! Round trips against a local axum server through the real reqwest transport.
//!
//! The server mimics the few behaviours the client depends on: API-key
//! checks, 404 for unknown cities, format switching through `mode`, and a
//! JSON body for road risk. It rejects any domain request that does not ask
//! for standard units.

use std::{collections::HashMap, net::SocketAddr, time::Duration};

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use weather_sdk::{
    ApiConfiguration, Coordinates, Customize, Place, TimeoutSettings, UnitSystem, WeatherClient,
    WeatherError, model::TrackPoint,
};

const GOOD_KEY: &str = "good-key";

const LONDON: &str = r#"{
    "coord": {"lon": -0.13, "lat": 51.51},
    "weather": [{"id": 300, "main": "Drizzle",
                 "description": "light intensity drizzle", "icon": "09d"}],
    "main": {"temp": 280.32, "pressure": 1012, "humidity": 81},
    "visibility": 10000,
    "wind": {"speed": 4.1, "deg": 80},
    "clouds": {"all": 90},
    "dt": 1485789600,
    "sys": {"country": "GB", "sunrise": 1485762037, "sunset": 1485794875},
    "timezone": 0,
    "id": 2643743,
    "name": "London",
    "cod": 200
}"#;

async fn current_weather(Query(query): Query<HashMap<String, String>>) -> (StatusCode, String) {
    if query.get("appid").map(String::as_str) != Some(GOOD_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            r#"{"cod":401,"message":"Invalid API key"}"#.to_string(),
        );
    }
    if query.get("q").map(String::as_str) == Some("Atlantis") {
        return (
            StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#.to_string(),
        );
    }
    if query.get("q").map(String::as_str) == Some("Slowtown") {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }

    match query.get("mode").map(String::as_str) {
        Some("xml") => (StatusCode::OK, format!("<current units=\"{}\"/>", query["units"])),
        _ if query.get("units").map(String::as_str) != Some("standard") => (
            StatusCode::BAD_REQUEST,
            r#"{"cod":"400","message":"expected standard units"}"#.to_string(),
        ),
        _ => (StatusCode::OK, LONDON.to_string()),
    }
}

async fn road_risk(Json(body): Json<Value>) -> Json<Value> {
    let points = body["track"].as_array().cloned().unwrap_or_default();
    let risks: Vec<Value> = points
        .iter()
        .map(|p| {
            json!({
                "dt": p["dt"],
                "coord": [p["lat"], p["lon"]],
                "weather": {"temp": 278.15},
                "road": {"state": 1},
                "alerts": []
            })
        })
        .collect();
    Json(Value::Array(risks))
}

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let app = Router::new()
                .route("/data/2.5/weather", get(current_weather))
                .route("/data/2.5/roadrisk", post(road_risk));
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, app).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, api_key: &str) -> WeatherClient {
    let config = ApiConfiguration::builder(api_key)
        .standard_host(addr.to_string())
        .insecure(true)
        .build()
        .unwrap();
    WeatherClient::with_configuration(config)
}

#[test]
fn current_weather_round_trip() {
    let addr = start_server();

    let weather = client(addr, GOOD_KEY)
        .current_weather()
        .at(Place::city_in("London", "GB"))
        .unit_system(UnitSystem::Metric)
        .retrieve()
        .as_domain_object()
        .unwrap();

    assert_eq!(weather.location.name, "London");
    assert_eq!(weather.temperature.value(), 7.0);
    assert_eq!(weather.temperature.unit(), "°C");
    assert_eq!(weather.visibility.unwrap().value(), 10.0);
}

#[test]
fn raw_projection_passes_callers_units_through() {
    let addr = start_server();

    let xml = client(addr, GOOD_KEY)
        .current_weather()
        .at(Place::city("London"))
        .unit_system(UnitSystem::Imperial)
        .retrieve()
        .as_xml()
        .unwrap();

    assert_eq!(xml, r#"<current units="imperial"/>"#);
}

#[test]
fn bad_key_is_invalid_auth_token() {
    let addr = start_server();

    let err = client(addr, "wrong-key")
        .current_weather()
        .at(Place::city("London"))
        .retrieve()
        .as_domain_object()
        .unwrap_err();

    assert!(matches!(err, WeatherError::InvalidAuthToken));
}

#[test]
fn unknown_city_is_no_data_found() {
    let addr = start_server();

    let err = client(addr, GOOD_KEY)
        .current_weather()
        .at(Place::city("Atlantis"))
        .retrieve()
        .as_domain_object()
        .unwrap_err();

    assert!(matches!(err, WeatherError::NoDataFound { .. }));
    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("city not found"));
}

#[test]
fn read_timeout_is_reported_as_timeout() {
    let addr = start_server();

    let err = client(addr, GOOD_KEY)
        .current_weather()
        .at(Place::city("Slowtown"))
        .timeouts(TimeoutSettings {
            connect: Duration::from_secs(1),
            read: Duration::from_millis(200),
        })
        .retrieve()
        .as_domain_object()
        .unwrap_err();

    assert!(matches!(err, WeatherError::NoDataFound { status: None, .. }));
    assert!(err.is_timeout());
}

#[test]
fn road_risk_posts_track() {
    let addr = start_server();
    let start = chrono::DateTime::from_timestamp(1602702000, 0).unwrap();
    let track = [
        TrackPoint::new(Coordinates::new(7.27, 44.04).unwrap(), start),
        TrackPoint::new(
            Coordinates::new(7.37, 45.04).unwrap(),
            start + chrono::Duration::hours(1),
        ),
    ];

    let risks = client(addr, GOOD_KEY)
        .road_risk()
        .unit_system(UnitSystem::Metric)
        .route(&track)
        .unwrap()
        .as_domain_object()
        .unwrap();

    assert_eq!(risks.len(), 2);
    assert_eq!(risks[1].coordinates.longitude, 45.04);
    assert_eq!(risks[1].forecast_at.timestamp(), 1602705600);
    assert_eq!(risks[0].temperature.unwrap().value(), 5.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn async_terminator_round_trip() {
    let addr = start_server();
    let client = client(addr, GOOD_KEY);

    let weather = client
        .current_weather()
        .at(Place::id(2643743))
        .retrieve()
        .as_domain_object_async()
        .await
        .unwrap();

    assert_eq!(weather.location.id, Some(2643743));
    assert_eq!(weather.temperature.as_kelvin(), 280.32);
}
