//! Persistencia de viajes
//! 
//! `TripRepository` es el contrato; hay una implementación PostgreSQL
//! y otra en memoria para desarrollo y tests.

pub mod memory_trip_repository;
pub mod trip_repository;

pub use memory_trip_repository::InMemoryTripRepository;
pub use trip_repository::{PgTripRepository, TripRepository};
