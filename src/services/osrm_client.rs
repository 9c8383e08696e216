//! Cliente HTTP para OSRM
//!
//! Este módulo maneja la comunicación con los servicios `trip` y `route` de OSRM.
//! Nunca devuelve errores: cada llamada termina en un `ExternalOutcome` y el
//! servicio que la hizo decide el fallback.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::RoutingConfig;
use crate::dto::osrm_dto::{OsrmRouteResponse, OsrmTripResponse};
use crate::models::{osrm_coordinate_list, Coordinate};

/// Resultado de una llamada a un servicio externo
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalOutcome<T> {
    Success(T),
    /// HTTP 429: condición esperada, no un error
    RateLimited,
    Failed(String),
}

impl<T> ExternalOutcome<T> {
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, String>) -> ExternalOutcome<U> {
        match self {
            ExternalOutcome::Success(value) => match f(value) {
                Ok(mapped) => ExternalOutcome::Success(mapped),
                Err(reason) => ExternalOutcome::Failed(reason),
            },
            ExternalOutcome::RateLimited => ExternalOutcome::RateLimited,
            ExternalOutcome::Failed(reason) => ExternalOutcome::Failed(reason),
        }
    }
}

#[derive(Clone)]
pub struct OsrmClient {
    base_url: String,
    client: Client,
}

impl OsrmClient {
    pub fn new(config: &RoutingConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.osrm_timeout)
            .connect_timeout(config.osrm_timeout.min(Duration::from_secs(3)))
            .user_agent("TreeCollectionRouting/1.0")
            .build()?;

        Ok(Self {
            base_url: config.osrm_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Posición en el viaje de cada punto, en el orden de entrada
    pub async fn trip(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<usize>> {
        let url = format!(
            "{}/trip/v1/driving/{}?source=first&roundtrip=false",
            self.base_url,
            osrm_coordinate_list(points)
        );

        let expected = points.len();
        self.get_json::<OsrmTripResponse>(&url)
            .await
            .and_then(|response| response.into_trip_positions(expected))
    }

    /// Geometría completa por carretera, ya en `[lat, lng]`
    pub async fn route(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<Coordinate>> {
        let url = format!(
            "{}/route/v1/driving/{}?overview=full&geometries=geojson",
            self.base_url,
            osrm_coordinate_list(points)
        );

        self.get_json::<OsrmRouteResponse>(&url)
            .await
            .and_then(OsrmRouteResponse::into_path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ExternalOutcome<T> {
        log::debug!("📤 Petición OSRM: {}", url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return ExternalOutcome::Failed(format!("timeout: {}", e)),
            Err(e) => return ExternalOutcome::Failed(format!("request error: {}", e)),
        };

        let status = response.status();
        log::debug!("📡 Estado de respuesta OSRM: {}", status);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return ExternalOutcome::RateLimited;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return ExternalOutcome::Failed(format!("HTTP {}: {}", status, body));
        }

        match response.json::<T>().await {
            Ok(parsed) => ExternalOutcome::Success(parsed),
            Err(e) => ExternalOutcome::Failed(format!("invalid response body: {}", e)),
        }
    }
}
