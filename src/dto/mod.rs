//! Objetos de transferencia de la API HTTP

pub mod api_response;
pub mod trip_dto;

pub use api_response::ApiResponse;
pub use trip_dto::*;
