//! Sintetizador del registro diario
//! 
//! Expande el resumen de un día en la línea de tiempo Driving / Break /
//! Off Duty que se muestra en la hoja de registro.

use crate::models::log_entry::{DutyStatus, LogEntry};

pub const DEFAULT_DAY_START_HOUR: f64 = 8.0;

/// Duración fija de la pausa registrada tras conducir
pub const LOG_BREAK_HOURS: f64 = 0.5;

pub const END_OF_DAY_HOUR: f64 = 24.0;

/// Generar las entradas del día. Son contiguas y empiezan en `day_start_hour`.
///
/// Si conducción más pausa pasan de las 24:00 no se añade tramo fuera de
/// servicio y el día queda sin llegar a 24.0.
pub fn synthesize_day_log(driving_hours: f64, on_duty_hours: f64, day_start_hour: f64) -> Vec<LogEntry> {
    let mut entries = Vec::with_capacity(3);
    let mut cursor = day_start_hour;

    if driving_hours > 0.0 {
        entries.push(LogEntry::new(cursor, cursor + driving_hours, DutyStatus::Driving));
        cursor += driving_hours;
    }

    if on_duty_hours - driving_hours > 0.0 {
        entries.push(LogEntry::new(cursor, cursor + LOG_BREAK_HOURS, DutyStatus::Break));
        cursor += LOG_BREAK_HOURS;
    }

    if cursor < END_OF_DAY_HOUR {
        entries.push(LogEntry::new(cursor, END_OF_DAY_HOUR, DutyStatus::OffDuty));
    }

    entries
}
