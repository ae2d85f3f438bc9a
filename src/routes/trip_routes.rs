use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::api_response::ApiResponse;
use crate::dto::trip_dto::{DayLogResponse, TripRequest, TripResponse};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/:id", get(get_trip).put(update_trip).delete(delete_trip))
        .route("/trips/:id/days/:day_number/logs", get(get_day_logs))
        // Endpoints legacy (se mantienen por compatibilidad)
        .route("/route", post(legacy_route))
        .route("/logs", post(legacy_logs))
}

async fn create_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TripResponse>>), AppError> {
    let Json(request) = payload?;
    let controller = TripController::new(state.planner.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<TripResponse>>>, AppError> {
    let controller = TripController::new(state.planner.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let Path(id) = path?;
    let controller = TripController::new(state.planner.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TripRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let controller = TripController::new(state.planner.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    let controller = TripController::new(state.planner.clone());
    controller.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_day_logs(
    State(state): State<AppState>,
    path: Result<Path<(Uuid, i32)>, PathRejection>,
) -> Result<Json<ApiResponse<DayLogResponse>>, AppError> {
    let Path((trip_id, day_number)) = path?;
    let controller = TripController::new(state.planner.clone());
    let response = controller.day_logs(trip_id, day_number).await?;
    Ok(Json(response))
}

async fn legacy_route() -> impl IntoResponse {
    (
        StatusCode::GONE,
        Json(json!({ "error": "This endpoint is deprecated. Please use /api/trips" })),
    )
}

async fn legacy_logs() -> impl IntoResponse {
    (
        StatusCode::GONE,
        Json(json!({ "error": "This endpoint is deprecated. Please use /api/trips/<id>/days/<day>/logs" })),
    )
}
