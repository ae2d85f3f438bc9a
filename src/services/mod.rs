//! Services module
//! 
//! Este módulo contiene la lógica de negocio y servicios de la aplicación.
//! Las reglas HOS (paradas, horario diario, registro del día) son funciones
//! puras; `trip_planning_service` las combina con el proveedor de rutas
//! y el repositorio.

pub mod day_log_synthesizer;
pub mod mapbox_directions_service;
pub mod schedule_generator;
pub mod stop_planner;
pub mod trip_planning_service;

pub use day_log_synthesizer::synthesize_day_log;
pub use schedule_generator::{estimate_days, generate_schedule, OverflowPolicy, PlanningError, ScheduleRules};
pub use stop_planner::{plan_stops, StopRules};
pub use trip_planning_service::TripPlanningService;
