use uuid::Uuid;
use validator::Validate;

use crate::dto::api_response::ApiResponse;
use crate::dto::trip_dto::{DayLogResponse, TripRequest, TripResponse};
use crate::services::trip_planning_service::TripPlanningService;
use crate::utils::errors::{not_found_error, AppError};

pub struct TripController {
    service: TripPlanningService,
}

impl TripController {
    pub fn new(service: TripPlanningService) -> Self {
        Self { service }
    }

    fn to_response(&self, trip: crate::models::trip::Trip) -> TripResponse {
        TripResponse::from_trip(trip, self.service.config().day_start_hour)
    }

    pub async fn create(&self, request: TripRequest) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        let trip = self.service.plan_trip(&request).await?;
        log::info!("✅ Trip {} created", trip.id);

        Ok(ApiResponse::created(self.to_response(trip)))
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<TripResponse>>, AppError> {
        let trips = self.service.repository().list_trips().await?;
        let response = trips.into_iter().map(|t| self.to_response(t)).collect();
        Ok(ApiResponse::list(response))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<ApiResponse<TripResponse>, AppError> {
        let trip = self.service.get_trip(id).await?;
        Ok(ApiResponse::ok(self.to_response(trip)))
    }

    /// Reemplaza los campos descriptivos; paradas y días no se recalculan
    pub async fn update(&self, id: Uuid, request: TripRequest) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        let trip = self
            .service
            .repository()
            .update_trip(id, request.into())
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))?;

        Ok(ApiResponse::success_with_message(
            self.to_response(trip),
            "Trip updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.service.repository().delete_trip(id).await? {
            return Err(not_found_error("Trip", &id.to_string()));
        }
        log::info!("🗑️ Trip {} deleted", id);
        Ok(())
    }

    pub async fn day_logs(&self, trip_id: Uuid, day_number: i32) -> Result<ApiResponse<DayLogResponse>, AppError> {
        let log = self.service.day_log(trip_id, day_number).await?;
        Ok(ApiResponse::ok(log))
    }
}
