//! Modelo de Stop
//! 
//! Paradas del itinerario: recogida, combustible, descanso y entrega.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipo de parada - conjunto cerrado
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StopType {
    Pickup,
    Fuel,
    Rest,
    Dropoff,
}

impl StopType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopType::Pickup => "pickup",
            StopType::Fuel => "fuel",
            StopType::Rest => "rest",
            StopType::Dropoff => "dropoff",
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StopType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(StopType::Pickup),
            "fuel" => Ok(StopType::Fuel),
            "rest" => Ok(StopType::Rest),
            "dropoff" => Ok(StopType::Dropoff),
            other => Err(format!("unknown stop type '{}'", other)),
        }
    }
}

/// Parada calculada por el planificador, aún sin persistir
#[derive(Debug, Clone, PartialEq)]
pub struct NewStop {
    pub stop_type: StopType,
    pub location: String,
    pub mile_marker: Option<f64>,
    pub duration_hours: f64,
}

/// Parada persistida
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    pub id: i64,
    pub stop_type: StopType,
    pub location: String,
    pub mile_marker: Option<f64>,
    pub duration_hours: f64,
}

impl Stop {
    pub fn from_new(id: i64, stop: NewStop) -> Self {
        Self {
            id,
            stop_type: stop.stop_type,
            location: stop.location,
            mile_marker: stop.mile_marker,
            duration_hours: stop.duration_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_type_wire_format() {
        assert_eq!(serde_json::to_string(&StopType::Dropoff).unwrap(), "\"dropoff\"");
        let parsed: StopType = serde_json::from_str("\"fuel\"").unwrap();
        assert_eq!(parsed, StopType::Fuel);
    }

    #[test]
    fn test_stop_type_from_str_rejects_unknown() {
        assert_eq!("rest".parse::<StopType>(), Ok(StopType::Rest));
        assert!("scale".parse::<StopType>().is_err());
    }
}
