//! Modelos del sistema
//! 
//! Este módulo contiene los modelos de datos del planificador: viajes,
//! paradas, horarios diarios y entradas del registro de servicio.

pub mod daily_schedule;
pub mod log_entry;
pub mod stop;
pub mod trip;

pub use daily_schedule::*;
pub use log_entry::*;
pub use stop::*;
pub use trip::*;
