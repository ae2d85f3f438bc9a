//! Configuración del proyecto
//! 
//! Este módulo contiene la configuración de base de datos, variables de entorno
//! y las reglas HOS usadas por el planificador de viajes.

pub mod database;
pub mod environment;
pub mod planning;

pub use environment::*;
pub use planning::*;

use std::str::FromStr;
use thiserror::Error;

/// Errores de configuración detectados al arrancar
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must be greater than zero (got {value})")]
    NonPositive { key: &'static str, value: f64 },

    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Leer una variable de entorno con valor por defecto
pub(crate) fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        _ => Ok(default),
    }
}

/// Verificar que un valor numérico sea estrictamente positivo
pub(crate) fn require_positive(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { key, value })
    }
}

/// Acceso serializado a las variables de entorno en los tests
#[cfg(test)]
pub(crate) mod test_env {
    use std::sync::{Mutex, MutexGuard};

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    pub(crate) fn lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn clear(keys: &[&str]) {
        for key in keys {
            std::env::remove_var(key);
        }
    }
}
