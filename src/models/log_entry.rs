//! Entradas del registro de servicio (ELD log)

use serde::{Deserialize, Serialize};

/// Estado de servicio - conjunto cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DutyStatus {
    #[serde(rename = "Off Duty")]
    OffDuty,
    #[serde(rename = "Sleeper")]
    SleeperBerth,
    #[serde(rename = "Driving")]
    Driving,
    #[serde(rename = "On Duty")]
    OnDutyNotDriving,
    #[serde(rename = "Break")]
    Break,
}

impl DutyStatus {
    /// Etiqueta legible para mostrar en la hoja de registro
    pub fn label(&self) -> &'static str {
        match self {
            DutyStatus::OffDuty => "Off Duty",
            DutyStatus::SleeperBerth => "Sleeper Berth",
            DutyStatus::Driving => "Driving",
            DutyStatus::OnDutyNotDriving => "On Duty (Not Driving)",
            DutyStatus::Break => "Break",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub start_hour: f64,
    pub end_hour: f64,
    pub status: DutyStatus,
}

impl LogEntry {
    pub fn new(start_hour: f64, end_hour: f64, status: DutyStatus) -> Self {
        Self { start_hour, end_hour, status }
    }

    pub fn duration_hours(&self) -> f64 {
        self.end_hour - self.start_hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duty_status_codes_and_labels() {
        assert_eq!(serde_json::to_string(&DutyStatus::OnDutyNotDriving).unwrap(), "\"On Duty\"");
        assert_eq!(serde_json::to_string(&DutyStatus::SleeperBerth).unwrap(), "\"Sleeper\"");
        assert_eq!(DutyStatus::OnDutyNotDriving.label(), "On Duty (Not Driving)");
        assert_eq!(DutyStatus::SleeperBerth.label(), "Sleeper Berth");
    }
}
