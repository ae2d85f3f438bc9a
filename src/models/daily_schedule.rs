//! Modelo de DailySchedule
//! 
//! Resumen de servicio de un día del viaje. Las entradas del registro
//! horario no se guardan: se sintetizan desde estos campos cada vez.

use serde::{Deserialize, Serialize};

use super::log_entry::LogEntry;
use crate::services::day_log_synthesizer::synthesize_day_log;

/// Día planificado, aún sin persistir
#[derive(Debug, Clone, PartialEq)]
pub struct NewDailySchedule {
    pub day_number: i32,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub notes: Option<String>,
}

/// Día persistido
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailySchedule {
    pub id: i64,
    pub day_number: i32,
    pub driving_hours: f64,
    pub on_duty_hours: f64,
    pub off_duty_hours: f64,
    pub notes: Option<String>,
}

impl DailySchedule {
    pub fn from_new(id: i64, day: NewDailySchedule) -> Self {
        Self {
            id,
            day_number: day.day_number,
            driving_hours: day.driving_hours,
            on_duty_hours: day.on_duty_hours,
            off_duty_hours: day.off_duty_hours,
            notes: day.notes,
        }
    }

    /// Registro horario del día, calculado a partir del resumen guardado
    pub fn log_entries(&self, day_start_hour: f64) -> Vec<LogEntry> {
        synthesize_day_log(self.driving_hours, self.on_duty_hours, day_start_hour)
    }
}
