//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y los parámetros de
//! enrutamiento (OSRM, límites del optimizador, pausa entre territorios).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// Errores al leer la configuración
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Parámetros del núcleo de rutas
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub osrm_base_url: String,
    pub osrm_timeout: Duration,
    /// Por debajo de este número de stops se intenta el trip de OSRM
    pub trip_solver_max_stops: usize,
    pub two_opt_max_passes: usize,
    /// Pausa entre territorios en las operaciones masivas
    pub batch_delay: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            osrm_base_url: "https://router.project-osrm.org".to_string(),
            osrm_timeout: Duration::from_secs(3),
            trip_solver_max_stops: 100,
            two_opt_max_passes: 50,
            batch_delay: Duration::from_millis(1500),
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub log_buffer_capacity: usize,
    pub routing: RoutingConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            database_url: "postgres://localhost/tree_collection".to_string(),
            cors_origins: Vec::new(),
            log_level: "info".to_string(),
            log_buffer_capacity: 200,
            routing: RoutingConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno
    ///
    /// Solo `DATABASE_URL` es obligatoria; el resto tiene valores por defecto.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let routing_defaults = RoutingConfig::default();

        let timeout_secs: u64 = parse_or("OSRM_TIMEOUT_SECS", routing_defaults.osrm_timeout.as_secs())?;
        let batch_delay_ms: u64 = parse_or("BATCH_DELAY_MS", routing_defaults.batch_delay.as_millis() as u64)?;

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_or("PORT", defaults.port)?,
            host: env::var("HOST").unwrap_or(defaults.host),
            database_url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_buffer_capacity: parse_or("LOG_BUFFER_CAPACITY", defaults.log_buffer_capacity)?,
            routing: RoutingConfig {
                osrm_base_url: env::var("OSRM_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(routing_defaults.osrm_base_url),
                osrm_timeout: Duration::from_secs(timeout_secs.clamp(3, 5)),
                trip_solver_max_stops: parse_or("TRIP_SOLVER_MAX_STOPS", routing_defaults.trip_solver_max_stops)?,
                two_opt_max_passes: parse_or("TWO_OPT_MAX_PASSES", routing_defaults.two_opt_max_passes)?,
                batch_delay: Duration::from_millis(batch_delay_ms),
            },
        })
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_defaults() {
        let routing = RoutingConfig::default();
        assert_eq!(routing.trip_solver_max_stops, 100);
        assert_eq!(routing.two_opt_max_passes, 50);
        assert_eq!(routing.osrm_timeout, Duration::from_secs(3));
        assert_eq!(routing.batch_delay, Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        env::set_var("TREE_ROUTING_TEST_NUMBER", "abc");
        let result: Result<u16, _> = parse_or("TREE_ROUTING_TEST_NUMBER", 1);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
        env::remove_var("TREE_ROUTING_TEST_NUMBER");
    }

    #[test]
    fn test_server_url() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }
}
