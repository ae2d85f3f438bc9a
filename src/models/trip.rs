//! Modelo de Trip
//! 
//! El viaje es la raíz del agregado: posee sus paradas y su plan diario.
//! Se crea una sola vez por planificación y solo cambia mediante
//! actualización completa o borrado.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::daily_schedule::{DailySchedule, NewDailySchedule};
use super::stop::{NewStop, Stop, StopType};

/// Trip persistido junto con sus paradas y días
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
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
    pub daily_schedules: Vec<DailySchedule>,
}

impl Trip {
    /// Buscar el plan de un día concreto
    pub fn schedule_for_day(&self, day_number: i32) -> Option<&DailySchedule> {
        self.daily_schedules.iter().find(|s| s.day_number == day_number)
    }

    /// Paradas de un tipo concreto, en orden de inserción
    pub fn stops_of_type(&self, stop_type: StopType) -> impl Iterator<Item = &Stop> {
        self.stops.iter().filter(move |s| s.stop_type == stop_type)
    }
}

/// Agregado completo listo para persistir en una sola transacción
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub id: Uuid,
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
    pub total_distance_miles: f64,
    pub total_drive_hours: f64,
    pub estimated_days: i32,
    pub created_at: DateTime<Utc>,
    pub stops: Vec<NewStop>,
    pub daily_schedules: Vec<NewDailySchedule>,
}

/// Campos descriptivos que se pueden reemplazar en un Trip existente
#[derive(Debug, Clone, PartialEq)]
pub struct TripUpdate {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub current_cycle_hours: f64,
}
