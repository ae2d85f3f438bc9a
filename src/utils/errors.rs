//! Sistema de manejo de errores
//! 
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::mapbox_directions_service::DirectionsError;
use crate::services::schedule_generator::PlanningError;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    status: u16,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: &'static str,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database Error", "DB_ERROR"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error", "VALIDATION_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found", "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request", "BAD_REQUEST"),
            AppError::Planning(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Planning Error", "SCHEDULE_OVERFLOW"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", "INTERNAL_ERROR"),
            AppError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", "SERVICE_UNAVAILABLE")
            }
            AppError::ExternalApi(_) => (StatusCode::BAD_GATEWAY, "External API Error", "EXTERNAL_API_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, code) = self.parts();

        // Los errores internos se registran completos pero nunca se exponen
        let (message, details) = match &self {
            AppError::Database(e) => {
                log::error!("❌ Database error: {}", e);
                ("An error occurred while accessing the database".to_string(), None)
            }
            AppError::Internal(msg) => {
                log::error!("❌ Internal error: {}", msg);
                ("An unexpected error occurred".to_string(), None)
            }
            AppError::ExternalApi(msg) => {
                log::error!("❌ External API error: {}", msg);
                ("An error occurred while communicating with the routing service".to_string(), None)
            }
            AppError::Validation(e) => {
                log::warn!("⚠️ Validation error: {}", e);
                ("The provided data is invalid".to_string(), Some(json!(e)))
            }
            other => {
                log::warn!("⚠️ {}", other);
                (other.message(), None)
            }
        };

        let body = ErrorResponse {
            status: status.as_u16(),
            error: error.to_string(),
            message,
            details,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl AppError {
    fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Internal(msg)
            | AppError::ServiceUnavailable(msg)
            | AppError::ExternalApi(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<DirectionsError> for AppError {
    fn from(error: DirectionsError) -> Self {
        match error {
            DirectionsError::NotGeocodable(_) | DirectionsError::NotEnoughLocations(_) => {
                AppError::BadRequest(error.to_string())
            }
            other => AppError::ExternalApi(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// Un id o número de día mal formado no identifica ningún recurso
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores internos
pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(not_found_error("Trip", "abc").parts().0, StatusCode::NOT_FOUND);
        assert_eq!(internal_error("boom").parts().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            AppError::from(PlanningError::ScheduleOverflow { remaining_hours: 3.0, max_days: 30 }).parts().0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_directions_errors_are_split_between_client_and_gateway() {
        let not_geocodable = AppError::from(DirectionsError::NotGeocodable("Atlantis".into()));
        assert!(matches!(not_geocodable, AppError::BadRequest(ref m) if m.contains("Atlantis")));

        let no_route = AppError::from(DirectionsError::NoRoute("ocean".into()));
        assert_eq!(no_route.parts().0, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_error_does_not_leak_details() {
        let response = internal_error("connection string postgres://secret").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
