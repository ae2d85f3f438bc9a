//! Servicio de planificación de viajes
//! 
//! Punto de entrada del planificador: pide la ruta al proveedor, convierte
//! unidades, calcula paradas y plan diario, y entrega el agregado completo
//! al repositorio en una sola llamada.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::config::planning::PlanningConfig;
use crate::dto::trip_dto::{DayLogResponse, TripRequest};
use crate::models::daily_schedule::NewDailySchedule;
use crate::models::stop::NewStop;
use crate::models::trip::{NewTrip, Trip};
use crate::repositories::trip_repository::TripRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::round_hundredths;

use super::mapbox_directions_service::{DirectionsProvider, RouteSummary};
use super::schedule_generator::{estimate_days, generate_schedule, PlanningError};
use super::stop_planner::plan_stops;

pub const METERS_TO_MILES: f64 = 0.000621371;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Construir el agregado Trip a partir de la ruta del proveedor.
///
/// Los conteos de paradas y días se calculan con los valores sin redondear;
/// millas y horas se guardan redondeadas a centésimas.
pub fn build_trip(
    request: &TripRequest,
    route: &RouteSummary,
    config: &PlanningConfig,
) -> Result<NewTrip, PlanningError> {
    let distance_miles = route.distance_meters.max(0.0) * METERS_TO_MILES;
    let drive_hours = route.duration_seconds.max(0.0) / SECONDS_PER_HOUR;

    let stops = plan_stops(
        &request.pickup_location,
        &request.dropoff_location,
        distance_miles,
        drive_hours,
        &config.stops,
    )
    .into_iter()
    .map(|stop| NewStop {
        mile_marker: stop.mile_marker.map(round_hundredths),
        ..stop
    })
    .collect();

    let daily_schedules = generate_schedule(drive_hours, &config.schedule)?
        .into_iter()
        .map(|day| NewDailySchedule {
            driving_hours: round_hundredths(day.driving_hours),
            on_duty_hours: round_hundredths(day.on_duty_hours),
            ..day
        })
        .collect();

    Ok(NewTrip {
        id: Uuid::new_v4(),
        current_location: request.current_location.clone(),
        pickup_location: request.pickup_location.clone(),
        dropoff_location: request.dropoff_location.clone(),
        current_cycle_hours: request.current_cycle_hours,
        total_distance_miles: round_hundredths(distance_miles),
        total_drive_hours: round_hundredths(drive_hours),
        estimated_days: estimate_days(drive_hours, config.schedule.daily_driving_cap_hours),
        created_at: Utc::now(),
        stops,
        daily_schedules,
    })
}

#[derive(Clone)]
pub struct TripPlanningService {
    repository: Arc<dyn TripRepository>,
    provider: Option<Arc<dyn DirectionsProvider>>,
    config: Arc<PlanningConfig>,
}

impl TripPlanningService {
    pub fn new(
        repository: Arc<dyn TripRepository>,
        provider: Option<Arc<dyn DirectionsProvider>>,
        config: PlanningConfig,
    ) -> Self {
        Self {
            repository,
            provider,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn repository(&self) -> &Arc<dyn TripRepository> {
        &self.repository
    }

    /// Planificar y guardar un viaje. Si algo falla no queda ningún viaje guardado.
    pub async fn plan_trip(&self, request: &TripRequest) -> AppResult<Trip> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            log::error!("❌ Mapbox access token not configured");
            AppError::ServiceUnavailable("Mapbox access token not configured".to_string())
        })?;

        log::info!(
            "🚚 Planning trip {} -> {} (cycle hours used: {})",
            request.pickup_location,
            request.dropoff_location,
            request.current_cycle_hours
        );

        let locations = vec![request.pickup_location.clone(), request.dropoff_location.clone()];
        let route = provider.route(&locations).await?;

        let new_trip = build_trip(request, &route, &self.config)?;
        log::info!(
            "🧮 Trip planned: {:.2} mi, {:.2} h, {} stops, {} days (estimated {})",
            new_trip.total_distance_miles,
            new_trip.total_drive_hours,
            new_trip.stops.len(),
            new_trip.daily_schedules.len(),
            new_trip.estimated_days
        );

        self.repository.insert_trip(new_trip).await
    }

    /// Registro horario de un día del viaje
    pub async fn day_log(&self, trip_id: Uuid, day_number: i32) -> AppResult<DayLogResponse> {
        let schedule = self
            .repository
            .find_schedule(trip_id, day_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Schedule not found for the specified trip and day".to_string()))?;

        Ok(DayLogResponse {
            trip_id,
            day_number,
            log_entries: schedule.log_entries(self.config.day_start_hour),
            total_driving_hours: schedule.driving_hours,
            total_on_duty_hours: schedule.on_duty_hours,
            total_off_duty_hours: schedule.off_duty_hours,
            notes: schedule.notes,
        })
    }

    pub async fn get_trip(&self, id: Uuid) -> AppResult<Trip> {
        self.repository
            .find_trip(id)
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))
    }
}
