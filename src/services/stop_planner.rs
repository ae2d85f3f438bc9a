//! Planificador de paradas
//! 
//! Convierte la distancia y la duración totales de la ruta en la lista de
//! paradas del viaje: recogida, combustible cada N millas, descanso cada
//! N horas de conducción y entrega.

use crate::models::stop::{NewStop, StopType};

/// Reglas de espaciado de paradas
#[derive(Debug, Clone, PartialEq)]
pub struct StopRules {
    pub fuel_stop_interval_miles: f64,
    pub fuel_duration_hours: f64,
    pub rest_interval_hours: f64,
    pub rest_duration_hours: f64,
    /// Velocidad media supuesta para ubicar los descansos sobre la ruta.
    /// No se deriva de la distancia ni de la duración del proveedor.
    pub average_speed_mph: f64,
}

impl Default for StopRules {
    fn default() -> Self {
        Self {
            fuel_stop_interval_miles: 1000.0,
            fuel_duration_hours: 0.5,
            rest_interval_hours: 11.0,
            rest_duration_hours: 10.0,
            average_speed_mph: 50.0,
        }
    }
}

/// Calcular las paradas del viaje.
///
/// El resultado queda agrupado en orden de inserción (recogida, combustible,
/// descansos, entrega) y no ordenado por milla. Un último repostaje que cae
/// justo en la milla de entrega se conserva.
pub fn plan_stops(
    pickup_location: &str,
    dropoff_location: &str,
    total_distance_miles: f64,
    total_drive_hours: f64,
    rules: &StopRules,
) -> Vec<NewStop> {
    let fuel_count = whole_intervals(total_distance_miles, rules.fuel_stop_interval_miles);
    let rest_count = whole_intervals(total_drive_hours, rules.rest_interval_hours);

    let mut stops = Vec::with_capacity(fuel_count + rest_count + 2);

    stops.push(NewStop {
        stop_type: StopType::Pickup,
        location: pickup_location.to_string(),
        mile_marker: Some(0.0),
        duration_hours: 0.0,
    });

    for i in 1..=fuel_count {
        let mile = (i as f64 * rules.fuel_stop_interval_miles).min(total_distance_miles);
        stops.push(NewStop {
            stop_type: StopType::Fuel,
            location: format!("Fuel Stop {}", i),
            mile_marker: Some(mile),
            duration_hours: rules.fuel_duration_hours,
        });
    }

    let miles_between_rests = rules.rest_interval_hours * rules.average_speed_mph;
    for i in 1..=rest_count {
        let mile = (i as f64 * miles_between_rests).min(total_distance_miles);
        stops.push(NewStop {
            stop_type: StopType::Rest,
            location: format!("Rest Stop {}", i),
            mile_marker: Some(mile),
            duration_hours: rules.rest_duration_hours,
        });
    }

    stops.push(NewStop {
        stop_type: StopType::Dropoff,
        location: dropoff_location.to_string(),
        mile_marker: Some(total_distance_miles),
        duration_hours: 0.0,
    });

    log::debug!(
        "🛑 Planned {} stops ({} fuel, {} rest) over {:.2} mi",
        stops.len(),
        fuel_count,
        rest_count,
        total_distance_miles
    );

    stops
}

/// floor(total / interval), cero para entradas no positivas
fn whole_intervals(total: f64, interval: f64) -> usize {
    if total <= 0.0 || interval <= 0.0 || !total.is_finite() {
        return 0;
    }
    (total / interval).floor() as usize
}
