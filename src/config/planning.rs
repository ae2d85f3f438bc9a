//! Configuración de las reglas HOS
//! 
//! Todos los parámetros del planificador se pueden sobrescribir desde el
//! entorno sin tocar el código.

use crate::services::day_log_synthesizer::DEFAULT_DAY_START_HOUR;
use crate::services::schedule_generator::{OverflowPolicy, ScheduleRules};
use crate::services::stop_planner::StopRules;

use super::{env_or, require_positive, ConfigError};

/// Parámetros del planificador de viajes
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningConfig {
    pub stops: StopRules,
    pub schedule: ScheduleRules,
    pub day_start_hour: f64,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            stops: StopRules::default(),
            schedule: ScheduleRules::default(),
            day_start_hour: DEFAULT_DAY_START_HOUR,
        }
    }
}

impl PlanningConfig {
    /// Leer las reglas del entorno, usando los valores por defecto si faltan
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let stops = StopRules {
            fuel_stop_interval_miles: require_positive(
                "FUEL_STOP_MILES",
                env_or("FUEL_STOP_MILES", defaults.stops.fuel_stop_interval_miles)?,
            )?,
            fuel_duration_hours: env_or("FUEL_STOP_HOURS", defaults.stops.fuel_duration_hours)?,
            rest_interval_hours: require_positive(
                "REST_INTERVAL_HOURS",
                env_or("REST_INTERVAL_HOURS", defaults.stops.rest_interval_hours)?,
            )?,
            rest_duration_hours: env_or("REST_STOP_HOURS", defaults.stops.rest_duration_hours)?,
            average_speed_mph: require_positive(
                "AVERAGE_SPEED_MPH",
                env_or("AVERAGE_SPEED_MPH", defaults.stops.average_speed_mph)?,
            )?,
        };

        let max_days: u32 = env_or("MAX_SCHEDULE_DAYS", defaults.schedule.max_days)?;
        require_positive("MAX_SCHEDULE_DAYS", f64::from(max_days))?;

        let overflow = match std::env::var("SCHEDULE_OVERFLOW_POLICY") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<OverflowPolicy>()
                .map_err(|_| ConfigError::Invalid { key: "SCHEDULE_OVERFLOW_POLICY", value: raw })?,
            _ => defaults.schedule.overflow,
        };

        let schedule = ScheduleRules {
            daily_driving_cap_hours: require_positive(
                "DRIVING_HOURS_LIMIT",
                env_or("DRIVING_HOURS_LIMIT", defaults.schedule.daily_driving_cap_hours)?,
            )?,
            break_hours: env_or("BREAK_HOURS", defaults.schedule.break_hours)?,
            off_duty_hours: env_or("OFF_DUTY_HOURS", defaults.schedule.off_duty_hours)?,
            max_days,
            overflow,
        };

        let day_start_hour: f64 = env_or("DAY_START_HOUR", defaults.day_start_hour)?;
        if !(0.0..24.0).contains(&day_start_hour) {
            return Err(ConfigError::Invalid {
                key: "DAY_START_HOUR",
                value: day_start_hour.to_string(),
            });
        }

        for (key, value) in [
            ("FUEL_STOP_HOURS", stops.fuel_duration_hours),
            ("REST_STOP_HOURS", stops.rest_duration_hours),
            ("BREAK_HOURS", schedule.break_hours),
            ("OFF_DUTY_HOURS", schedule.off_duty_hours),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(ConfigError::Invalid { key, value: value.to_string() });
            }
        }

        Ok(Self {
            stops,
            schedule,
            day_start_hour,
        })
    }
}
