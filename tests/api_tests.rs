use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use hos_trip_planner::config::environment::EnvironmentConfig;
use hos_trip_planner::config::planning::PlanningConfig;
use hos_trip_planner::repositories::InMemoryTripRepository;
use hos_trip_planner::services::mapbox_directions_service::{DirectionsError, DirectionsProvider, RouteSummary};
use hos_trip_planner::services::trip_planning_service::{METERS_TO_MILES, SECONDS_PER_HOUR};
use hos_trip_planner::{create_app, AppState};

/// Proveedor de prueba con una ruta fija
struct FixedRoute {
    miles: f64,
    hours: f64,
}

#[async_trait]
impl DirectionsProvider for FixedRoute {
    async fn route(&self, locations: &[String]) -> Result<RouteSummary, DirectionsError> {
        if locations.iter().any(|l| l.contains("Atlantis")) {
            return Err(DirectionsError::NotGeocodable("Atlantis".to_string()));
        }
        Ok(RouteSummary {
            distance_meters: self.miles / METERS_TO_MILES,
            duration_seconds: self.hours * SECONDS_PER_HOUR,
            waypoints: Vec::new(),
            steps: Vec::new(),
        })
    }
}

fn create_test_app(provider: Option<Arc<dyn DirectionsProvider>>) -> axum::Router {
    let state = AppState::new(
        EnvironmentConfig::default(),
        PlanningConfig::default(),
        Arc::new(InMemoryTripRepository::new()),
        provider,
    );
    create_app(state)
}

fn long_haul_app() -> axum::Router {
    create_test_app(Some(Arc::new(FixedRoute { miles: 2500.0, hours: 25.0 })))
}

fn trip_body() -> Value {
    json!({
        "current_location": "Chicago, IL",
        "pickup_location": "Dallas, TX",
        "dropoff_location": "Seattle, WA",
        "current_cycle_hours": 12.5
    })
}

async fn send(app: &axum::Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_trip(app: &axum::Router) -> Value {
    let (status, body) = send(app, Method::POST, "/api/trips", Some(trip_body())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

fn count_stops(trip: &Value, stop_type: &str) -> usize {
    trip["stops"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|s| s["stop_type"] == stop_type)
        .count()
}

#[tokio::test]
async fn test_health_check() {
    let app = long_haul_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_long_haul_trip() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;

    assert!((trip["total_distance_miles"].as_f64().unwrap() - 2500.0).abs() < 0.01);
    assert_eq!(trip["total_drive_hours"], 25.0);
    assert_eq!(trip["estimated_days"], 2);
    assert_eq!(trip["current_location"], "Chicago, IL");

    assert_eq!(count_stops(&trip, "pickup"), 1);
    assert_eq!(count_stops(&trip, "fuel"), 2);
    assert_eq!(count_stops(&trip, "rest"), 2);
    assert_eq!(count_stops(&trip, "dropoff"), 1);
    assert_eq!(trip["stops"][0]["location"], "Dallas, TX");
    assert_eq!(trip["stops"][5]["location"], "Seattle, WA");

    let days = trip["daily_schedules"].as_array().unwrap();
    let driving: Vec<f64> = days.iter().map(|d| d["driving_hours"].as_f64().unwrap()).collect();
    assert_eq!(driving, vec![11.0, 11.0, 3.0]);
    assert_eq!(days[2]["on_duty_hours"], 4.0);
    assert_eq!(days[2]["off_duty_hours"], 13.0);
    assert_eq!(days[0]["notes"], "Day 1 schedule");
    assert_eq!(days[0]["log_entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_short_trip_has_single_day() {
    let app = create_test_app(Some(Arc::new(FixedRoute { miles: 300.0, hours: 5.0 })));
    let trip = create_trip(&app).await;

    assert_eq!(trip["estimated_days"], 1);
    assert_eq!(trip["stops"].as_array().unwrap().len(), 2);
    assert_eq!(trip["daily_schedules"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_trips() {
    let app = long_haul_app();
    create_trip(&app).await;
    create_trip(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/trips", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_trip_and_unknown_trip() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let id = trip["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/trips/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);

    let unknown = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/api/trips/{}", unknown), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_day_logs() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let id = trip["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/trips/{}/days/3/logs", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["day_number"], 3);
    assert_eq!(body["data"]["total_driving_hours"], 3.0);
    assert_eq!(
        body["data"]["log_entries"],
        json!([
            { "start_hour": 8.0, "end_hour": 11.0, "status": "Driving" },
            { "start_hour": 11.0, "end_hour": 11.5, "status": "Break" },
            { "start_hour": 11.5, "end_hour": 24.0, "status": "Off Duty" }
        ])
    );
}

#[tokio::test]
async fn test_day_logs_unknown_day() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let id = trip["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/api/trips/{}/days/9/logs", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Schedule not found for the specified trip and day");
}

#[tokio::test]
async fn test_validation_errors() {
    let app = long_haul_app();

    let mut blank = trip_body();
    blank["pickup_location"] = json!("   ");
    let (status, body) = send(&app, Method::POST, "/api/trips", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let mut negative = trip_body();
    negative["current_cycle_hours"] = json!(-3.0);
    let (status, _) = send(&app, Method::POST, "/api/trips", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = json!({ "pickup_location": "Dallas, TX" });
    let (status, body) = send(&app, Method::POST, "/api/trips", Some(missing)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    // Nada se guarda cuando la validación falla
    let (_, list) = send(&app, Method::GET, "/api/trips", None).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn test_not_geocodable_location() {
    let app = long_haul_app();
    let mut body = trip_body();
    body["dropoff_location"] = json!("Atlantis");

    let (status, body) = send(&app, Method::POST, "/api/trips", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_update_trip() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let id = trip["id"].as_str().unwrap();

    let mut update = trip_body();
    update["current_location"] = json!("Denver, CO");
    update["current_cycle_hours"] = json!(30.0);

    let (status, body) = send(&app, Method::PUT, &format!("/api/trips/{}", id), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_location"], "Denver, CO");
    assert_eq!(body["data"]["current_cycle_hours"], 30.0);
    assert_eq!(body["data"]["daily_schedules"].as_array().unwrap().len(), 3);

    let unknown = uuid::Uuid::new_v4();
    let (status, _) = send(&app, Method::PUT, &format!("/api/trips/{}", unknown), Some(trip_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_trip() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let uri = format!("/api/trips/{}", trip["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_legacy_endpoints_are_gone() {
    let app = long_haul_app();

    let (status, body) = send(&app, Method::POST, "/api/route", Some(json!({}))).await;
    assert_eq!(status, StatusCode::GONE);
    assert!(body["error"].as_str().unwrap().contains("/api/trips"));

    let (status, _) = send(&app, Method::POST, "/api/logs", Some(json!({}))).await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn test_missing_provider_returns_503() {
    let app = create_test_app(None);

    let (status, body) = send(&app, Method::POST, "/api/trips", Some(trip_body())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn test_malformed_path_params_use_error_envelope() {
    let app = long_haul_app();
    let trip = create_trip(&app).await;
    let id = trip["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, "/api/trips/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["status"], 404);

    let (status, body) = send(&app, Method::DELETE, "/api/trips/123", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = send(&app, Method::PUT, "/api/trips/nope", Some(trip_body())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, body) = send(&app, Method::GET, &format!("/api/trips/{}/days/first/logs", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
