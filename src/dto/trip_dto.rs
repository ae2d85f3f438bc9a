use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::daily_schedule::DailySchedule;
use crate::models::log_entry::LogEntry;
use crate::models::stop::Stop;
use crate::models::trip::{Trip, TripUpdate};
use crate::utils::validation::validate_not_blank;

// Request para planificar (POST) o reemplazar (PUT) un viaje
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct TripRequest {
    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub current_location: String,

    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub pickup_location: String,

    #[validate(length(min = 1, max = 255), custom = "validate_not_blank")]
    pub dropoff_location: String,

    #[validate(range(min = 0.0))]
    pub current_cycle_hours: f64,
}

impl From<TripRequest> for TripUpdate {
    fn from(request: TripRequest) -> Self {
        Self {
            current_location: request.current_location,
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            current_cycle_hours: request.current_cycle_hours,
        }
    }
}

// Día con su registro sintetizado
#[derive(Debug, Serialize)]
pub struct DailyScheduleResponse {
    pub id: i64,
    pub day_number: i32,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub notes: Option<String>,
    pub log_entries: Vec<LogEntry>,
}

impl DailyScheduleResponse {
    pub fn from_schedule(schedule: DailySchedule, day_start_hour: f64) -> Self {
        let log_entries = schedule.log_entries(day_start_hour);
        Self {
            id: schedule.id,
            day_number: schedule.day_number,
            driving_hours: schedule.driving_hours,
            on_duty_hours: schedule.on_duty_hours,
            off_duty_hours: schedule.off_duty_hours,
            notes: schedule.notes,
            log_entries,
        }
    }
}

// Response de viaje con paradas y plan diario
#[derive(Debug, Serialize)]
pub struct TripResponse {
    pub id: Uuid,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
    pub total_distance_miles: f64,
    pub total_drive_hours: f64,
    pub estimated_days: i32,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<Stop>,
    pub daily_schedules: Vec<DailyScheduleResponse>,
}

impl TripResponse {
    pub fn from_trip(trip: Trip, day_start_hour: f64) -> Self {
        Self {
            id: trip.id,
            current_location: trip.current_location,
            pickup_location: trip.pickup_location,
            dropoff_location: trip.dropoff_location,
            current_cycle_hours: trip.current_cycle_hours,
            total_distance_miles: trip.total_distance_miles,
            total_drive_hours: trip.total_drive_hours,
            estimated_days: trip.estimated_days,
            created_at: trip.created_at,
            stops: trip.stops,
            daily_schedules: trip
                .daily_schedules
                .into_iter()
                .map(|s| DailyScheduleResponse::from_schedule(s, day_start_hour))
                .collect(),
        }
    }
}

// Response del registro de un día
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayLogResponse {
    pub trip_id: Uuid,
    pub day_number: i32,
    pub log_entries: Vec<LogEntry>,
    pub total_driving_hours: f64,
    pub total_on_duty_hours: f64,
    pub total_off_duty_hours: f64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TripRequest {
        TripRequest {
            current_location: "Chicago, IL".to_string(),
            pickup_location: "Dallas, TX".to_string(),
            dropoff_location: "Seattle, WA".to_string(),
            current_cycle_hours: 12.5,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_negative_cycle_hours_rejected() {
        let mut req = request();
        req.current_cycle_hours = -1.0;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("current_cycle_hours"));
    }

    #[test]
    fn test_blank_and_long_locations_rejected() {
        let mut req = request();
        req.pickup_location = "   ".to_string();
        req.dropoff_location = "x".repeat(256);
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("pickup_location"));
        assert!(fields.contains_key("dropoff_location"));
        assert!(!fields.contains_key("current_location"));
    }

    #[test]
    fn test_missing_field_fails_to_deserialize() {
        let body = r#"{"current_location": "A", "pickup_location": "B", "current_cycle_hours": 3}"#;
        assert!(serde_json::from_str::<TripRequest>(body).is_err());
    }
}
