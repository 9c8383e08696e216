//! Geometría de ruta de un territorio
//!
//! Pide a OSRM la ruta por carretera que une los stops en su orden actual. Si
//! el servicio no responde, hay límite de peticiones o el payload no sirve, se
//! guarda la línea recta entre stops. Solo los errores de persistencia suben.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::models::{Coordinate, Located};
use crate::repositories::RouteStore;
use crate::utils::errors::AppResult;

use super::osrm_client::{ExternalOutcome, OsrmClient};

/// Servicio de direcciones que devuelve la geometría por carretera en `[lat, lng]`
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn road_path(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<Coordinate>>;
}

#[async_trait]
impl DirectionsProvider for OsrmClient {
    async fn road_path(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<Coordinate>> {
        self.route(points).await
    }
}

/// Qué geometría quedó guardada
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeometryOutcome {
    /// Menos de dos stops ubicados: `route_geometry = null`
    Cleared,
    RoadFollowing { points: usize },
    StraightLine { points: usize },
}

#[derive(Clone)]
pub struct RouteGeometryService {
    store: Arc<dyn RouteStore>,
    directions: Arc<dyn DirectionsProvider>,
}

impl RouteGeometryService {
    pub fn new(store: Arc<dyn RouteStore>, directions: Arc<dyn DirectionsProvider>) -> Self {
        Self { store, directions }
    }

    /// Recalcula y guarda la geometría del territorio
    pub async fn rebuild(&self, territory_id: i64) -> AppResult<GeometryOutcome> {
        let stops = self.store.stops_by_territory(territory_id).await?;
        let ordered: Vec<Coordinate> = stops.iter().filter_map(|stop| stop.coordinate()).collect();

        if ordered.len() < 2 {
            log::info!("🧹 Territorio {}: {} stops ubicados, se borra la geometría", territory_id, ordered.len());
            self.store.set_territory_geometry(territory_id, None).await?;
            return Ok(GeometryOutcome::Cleared);
        }

        let outcome = match self.directions.road_path(&ordered).await {
            ExternalOutcome::Success(path) => {
                log::info!("🛣️ Territorio {}: geometría por carretera con {} puntos", territory_id, path.len());
                self.store.set_territory_geometry(territory_id, Some(&path)).await?;
                GeometryOutcome::RoadFollowing { points: path.len() }
            }
            ExternalOutcome::RateLimited => {
                log::warn!("⏳ Territorio {}: límite de peticiones en OSRM, se usa línea recta", territory_id);
                self.store_straight_line(territory_id, &ordered).await?
            }
            ExternalOutcome::Failed(reason) => {
                log::warn!("⚠️ Territorio {}: fallo de OSRM ({}), se usa línea recta", territory_id, reason);
                self.store_straight_line(territory_id, &ordered).await?
            }
        };

        Ok(outcome)
    }

    /// Recalcula varios territorios tras una escritura ya confirmada.
    ///
    /// Un fallo se registra y no corta el resto. Devuelve cuántos fallaron.
    pub async fn rebuild_after_write<I>(&self, territory_ids: I) -> usize
    where
        I: IntoIterator<Item = i64>,
    {
        let mut failed = 0;
        for territory_id in territory_ids {
            if let Err(e) = self.rebuild(territory_id).await {
                log::warn!("⚠️ Territorio {}: no se pudo recalcular la geometría: {}", territory_id, e);
                failed += 1;
            }
        }
        failed
    }

    async fn store_straight_line(&self, territory_id: i64, ordered: &[Coordinate]) -> AppResult<GeometryOutcome> {
        self.store.set_territory_geometry(territory_id, Some(ordered)).await?;
        Ok(GeometryOutcome::StraightLine { points: ordered.len() })
    }
}
