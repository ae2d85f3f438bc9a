//! Repositorio en memoria
//! 
//! Guarda los viajes en un mapa protegido por `RwLock`. Se usa en desarrollo
//! (`STORAGE_BACKEND=memory`) y en los tests de la API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::trip_repository::TripRepository;
use crate::models::daily_schedule::DailySchedule;
use crate::models::stop::Stop;
use crate::models::trip::{NewTrip, Trip, TripUpdate};
use crate::utils::errors::AppError;

#[derive(Clone, Default)]
pub struct InMemoryTripRepository {
    trips: Arc<RwLock<HashMap<Uuid, Trip>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[async_trait]
impl TripRepository for InMemoryTripRepository {
    async fn insert_trip(&self, trip: NewTrip) -> Result<Trip, AppError> {
        let stored = Trip {
            id: trip.id,
            current_location: trip.current_location,
            pickup_location: trip.pickup_location,
            dropoff_location: trip.dropoff_location,
            current_cycle_hours: trip.current_cycle_hours,
            total_distance_miles: trip.total_distance_miles,
            total_drive_hours: trip.total_drive_hours,
            estimated_days: trip.estimated_days,
            created_at: trip.created_at,
            stops: trip
                .stops
                .into_iter()
                .map(|s| Stop::from_new(self.next_id(), s))
                .collect(),
            daily_schedules: trip
                .daily_schedules
                .into_iter()
                .map(|d| DailySchedule::from_new(self.next_id(), d))
                .collect(),
        };

        // Se inserta el agregado completo de una vez
        let mut trips = self.trips.write().await;
        if trips.contains_key(&stored.id) {
            return Err(AppError::Internal(format!("duplicate trip id {}", stored.id)));
        }
        trips.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, AppError> {
        let trips = self.trips.read().await;
        let mut all: Vec<Trip> = trips.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn find_trip(&self, id: Uuid) -> Result<Option<Trip>, AppError> {
        Ok(self.trips.read().await.get(&id).cloned())
    }

    async fn find_schedule(&self, trip_id: Uuid, day_number: i32) -> Result<Option<DailySchedule>, AppError> {
        let trips = self.trips.read().await;
        Ok(trips
            .get(&trip_id)
            .and_then(|trip| trip.schedule_for_day(day_number))
            .cloned())
    }

    async fn update_trip(&self, id: Uuid, update: TripUpdate) -> Result<Option<Trip>, AppError> {
        let mut trips = self.trips.write().await;
        Ok(trips.get_mut(&id).map(|trip| {
            trip.current_location = update.current_location;
            trip.pickup_location = update.pickup_location;
            trip.dropoff_location = update.dropoff_location;
            trip.current_cycle_hours = update.current_cycle_hours;
            trip.clone()
        }))
    }

    async fn delete_trip(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.trips.write().await.remove(&id).is_some())
    }
}
