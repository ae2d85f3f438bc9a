//! Planificador de viajes HOS
//! 
//! Servicio HTTP que planifica viajes de camión bajo las reglas de horas de
//! servicio (HOS): paradas de combustible y descanso, horario por día y el
//! registro de servicio de cada día.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_app;
pub use state::AppState;
