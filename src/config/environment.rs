//! Configuración de variables de entorno
//! 
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;

use super::{env_or, ConfigError};

/// Backend de almacenamiento para los viajes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" | "in-memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,
    pub mapbox_token: Option<String>,
    pub mapbox_base_url: Option<String>,
    pub mapbox_profile: Option<String>,
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub log_level: tracing::Level,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            cors_origins: Vec::new(),
            mapbox_token: None,
            mapbox_base_url: None,
            mapbox_profile: None,
            database_url: None,
            storage_backend: StorageBackend::Postgres,
            log_level: tracing::Level::DEBUG,
        }
    }
}

impl EnvironmentConfig {
    /// Construir la configuración a partir de las variables de entorno
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let default_level = if environment == "production" {
            tracing::Level::INFO
        } else {
            defaults.log_level
        };

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid { key: "STORAGE_BACKEND", value: raw })?,
            _ => defaults.storage_backend,
        };

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        // MAPBOX_ACCESS_TOKEN es el nombre histórico, MAPBOX_TOKEN el del resto del backend
        let mapbox_token = env::var("MAPBOX_ACCESS_TOKEN")
            .or_else(|_| env::var("MAPBOX_TOKEN"))
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(Self {
            port: env_or("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            mapbox_token,
            mapbox_base_url: non_blank_var("MAPBOX_BASE_URL"),
            mapbox_profile: non_blank_var("MAPBOX_PROFILE"),
            database_url,
            storage_backend,
            log_level: env_or("LOG_LEVEL", default_level)?,
            environment,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
