//! Generador del plan diario
//! 
//! Reparte las horas de conducción en días con un tope diario fijo
//! (modelo HOS simplificado: tope plano de conducción y bloque fijo fuera
//! de servicio, sin ciclo 60/70 ni reinicio de 34 horas).

use std::str::FromStr;

use thiserror::Error;

use crate::models::daily_schedule::NewDailySchedule;

/// Qué hacer cuando la conducción no cabe en `max_days`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Descarta las horas sobrantes (comportamiento histórico)
    #[default]
    Truncate,
    /// Falla la planificación
    Error,
    /// Sigue generando días hasta consumir toda la conducción
    Extend,
}

impl FromStr for OverflowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" => Ok(Self::Truncate),
            "error" => Ok(Self::Error),
            "extend" => Ok(Self::Extend),
            other => Err(format!("unknown overflow policy '{}'", other)),
        }
    }
}

/// Tope absoluto de días de un plan, también con `Extend`
pub const MAX_PLANNED_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRules {
    pub daily_driving_cap_hours: f64,
    pub break_hours: f64,
    pub off_duty_hours: f64,
    /// Límite exclusivo: se generan como mucho `max_days - 1` días salvo con `Extend`
    pub max_days: u32,
    pub overflow: OverflowPolicy,
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self {
            daily_driving_cap_hours: 11.0,
            break_hours: 1.0,
            off_duty_hours: 13.0,
            max_days: 30,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum PlanningError {
    #[error("{remaining_hours:.2} driving hours do not fit within {max_days} days")]
    ScheduleOverflow { remaining_hours: f64, max_days: u32 },
}

/// Generar el plan diario consumiendo la conducción en bloques de como mucho
/// `daily_driving_cap_hours`.
pub fn generate_schedule(
    total_drive_hours: f64,
    rules: &ScheduleRules,
) -> Result<Vec<NewDailySchedule>, PlanningError> {
    let mut days = Vec::new();
    let mut remaining = total_drive_hours;
    let mut day: u32 = 1;

    // Un tope no positivo nunca consumiría horas
    if rules.daily_driving_cap_hours <= 0.0 || !remaining.is_finite() {
        return Ok(days);
    }

    // Límite exclusivo del bucle
    let day_limit = match rules.overflow {
        OverflowPolicy::Extend => MAX_PLANNED_DAYS + 1,
        _ => rules.max_days.min(MAX_PLANNED_DAYS + 1),
    };

    while remaining > 0.0 && day < day_limit {
        let day_hours = rules.daily_driving_cap_hours.min(remaining);
        days.push(NewDailySchedule {
            day_number: day as i32,
            driving_hours: day_hours,
            on_duty_hours: day_hours + rules.break_hours,
            off_duty_hours: rules.off_duty_hours,
            notes: Some(format!("Day {} schedule", day)),
        });
        remaining -= day_hours;
        day += 1;
    }

    if remaining > 0.0 {
        match rules.overflow {
            OverflowPolicy::Error => {
                return Err(PlanningError::ScheduleOverflow {
                    remaining_hours: remaining,
                    max_days: rules.max_days.min(MAX_PLANNED_DAYS),
                });
            }
            OverflowPolicy::Extend => {
                return Err(PlanningError::ScheduleOverflow {
                    remaining_hours: remaining,
                    max_days: MAX_PLANNED_DAYS,
                });
            }
            OverflowPolicy::Truncate => log::warn!(
                "⚠️ Schedule truncated at {} days: {:.2} driving hours dropped",
                days.len(),
                remaining
            ),
        }
    }

    Ok(days)
}

/// Días estimados del viaje: max(1, floor(horas / tope)).
///
/// Se calcula aparte del número de días generados y puede diferir en uno.
pub fn estimate_days(total_drive_hours: f64, daily_driving_cap_hours: f64) -> i32 {
    if daily_driving_cap_hours <= 0.0 || !total_drive_hours.is_finite() {
        return 1;
    }
    ((total_drive_hours / daily_driving_cap_hours).floor() as i32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driving(days: &[NewDailySchedule]) -> Vec<f64> {
        days.iter().map(|d| d.driving_hours).collect()
    }

    #[test]
    fn test_twenty_five_hours_split_in_three_days() {
        let days = generate_schedule(25.0, &ScheduleRules::default()).unwrap();

        assert_eq!(driving(&days), vec![11.0, 11.0, 3.0]);
        assert_eq!(days[0].on_duty_hours, 12.0);
        assert_eq!(days[2].on_duty_hours, 4.0);
        assert!(days.iter().all(|d| d.off_duty_hours == 13.0));
        assert_eq!(days.iter().map(|d| d.day_number).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(days[1].notes.as_deref(), Some("Day 2 schedule"));
        assert_eq!(estimate_days(25.0, 11.0), 2);
    }

    #[test]
    fn test_zero_hours_yield_no_days_but_one_estimated() {
        let days = generate_schedule(0.0, &ScheduleRules::default()).unwrap();
        assert!(days.is_empty());
        assert_eq!(estimate_days(0.0, 11.0), 1);
        assert_eq!(estimate_days(10.9, 11.0), 1);
    }

    #[test]
    fn test_truncates_after_max_days_minus_one() {
        let rules = ScheduleRules {
            max_days: 4,
            ..ScheduleRules::default()
        };
        let days = generate_schedule(100.0, &rules).unwrap();

        assert_eq!(days.len(), 3);
        assert_eq!(driving(&days).iter().sum::<f64>(), 33.0);
    }

    #[test]
    fn test_default_never_exceeds_twenty_nine_days() {
        let days = generate_schedule(1000.0, &ScheduleRules::default()).unwrap();
        assert_eq!(days.len(), 29);
        assert_eq!(days.last().unwrap().day_number, 29);
    }

    #[test]
    fn test_sum_matches_total_when_it_fits() {
        for total in [0.5, 11.0, 22.0, 57.25, 29.0 * 11.0] {
            let days = generate_schedule(total, &ScheduleRules::default()).unwrap();
            let sum: f64 = driving(&days).iter().sum();
            assert!((sum - total).abs() < 1e-9, "total {} summed to {}", total, sum);
            assert!(days.iter().all(|d| d.on_duty_hours >= d.driving_hours));
        }
    }

    #[test]
    fn test_error_policy_reports_overflow() {
        let rules = ScheduleRules {
            max_days: 3,
            overflow: OverflowPolicy::Error,
            ..ScheduleRules::default()
        };

        let result = generate_schedule(30.0, &rules);
        assert_eq!(
            result,
            Err(PlanningError::ScheduleOverflow { remaining_hours: 8.0, max_days: 3 })
        );

        // Si cabe no hay error
        assert_eq!(generate_schedule(22.0, &rules).unwrap().len(), 2);
    }

    #[test]
    fn test_extend_policy_consumes_everything() {
        let rules = ScheduleRules {
            max_days: 3,
            overflow: OverflowPolicy::Extend,
            ..ScheduleRules::default()
        };

        let days = generate_schedule(40.0, &rules).unwrap();
        assert_eq!(driving(&days), vec![11.0, 11.0, 11.0, 7.0]);
    }

    #[test]
    fn test_extend_policy_is_bounded() {
        let rules = ScheduleRules {
            daily_driving_cap_hours: 0.01,
            overflow: OverflowPolicy::Extend,
            ..ScheduleRules::default()
        };

        match generate_schedule(1_000_000.0, &rules) {
            Err(PlanningError::ScheduleOverflow { remaining_hours, max_days }) => {
                assert_eq!(max_days, MAX_PLANNED_DAYS);
                assert!(remaining_hours > 999_990.0);
            }
            other => panic!("expected overflow, got {:?}", other),
        }

        // Justo en el tope todavía cabe
        let rules = ScheduleRules {
            overflow: OverflowPolicy::Extend,
            ..ScheduleRules::default()
        };
        let days = generate_schedule(11.0 * MAX_PLANNED_DAYS as f64, &rules).unwrap();
        assert_eq!(days.len(), MAX_PLANNED_DAYS as usize);
        assert_eq!(days.last().unwrap().day_number, MAX_PLANNED_DAYS as i32);
    }

    #[test]
    fn test_truncate_caps_huge_max_days() {
        let rules = ScheduleRules {
            max_days: u32::MAX,
            ..ScheduleRules::default()
        };
        let days = generate_schedule(11.0 * 1000.0, &rules).unwrap();
        assert_eq!(days.len(), MAX_PLANNED_DAYS as usize);
    }

    #[test]
    fn test_overflow_policy_from_str() {
        assert_eq!("Extend".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Extend));
        assert_eq!("truncate".parse::<OverflowPolicy>(), Ok(OverflowPolicy::Truncate));
        assert!("drop".parse::<OverflowPolicy>().is_err());
    }
}
