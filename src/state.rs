//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;
use std::time::Instant;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::observability::LogBuffer;
use crate::repositories::{PgRouteStore, RouteStore};
use crate::services::{
    DirectionsProvider, OsrmClient, RouteGeometryService, RouteSequencer, SequencerSettings, TerritoryBatchService,
    TripSolver,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub store: Arc<dyn RouteStore>,
    pub trip_solver: Arc<dyn TripSolver>,
    pub directions: Arc<dyn DirectionsProvider>,
    pub log_buffer: LogBuffer,
    pub started_at: Instant,
}

impl AppState {
    /// Estado de producción: PostgreSQL y OSRM para trip y route
    pub fn new(pool: PgPool, config: EnvironmentConfig, log_buffer: LogBuffer) -> Result<Self, reqwest::Error> {
        let osrm = Arc::new(OsrmClient::new(&config.routing)?);
        let store = Arc::new(PgRouteStore::new(pool.clone()));

        Ok(Self::with_components(pool, config, store, osrm.clone(), osrm, log_buffer))
    }

    pub fn with_components(
        pool: PgPool,
        config: EnvironmentConfig,
        store: Arc<dyn RouteStore>,
        trip_solver: Arc<dyn TripSolver>,
        directions: Arc<dyn DirectionsProvider>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            pool,
            config,
            store,
            trip_solver,
            directions,
            log_buffer,
            started_at: Instant::now(),
        }
    }

    pub fn geometry_service(&self) -> RouteGeometryService {
        RouteGeometryService::new(self.store.clone(), self.directions.clone())
    }

    pub fn sequencer(&self) -> RouteSequencer {
        RouteSequencer::new(
            self.store.clone(),
            self.trip_solver.clone(),
            self.geometry_service(),
            SequencerSettings::from(&self.config.routing),
        )
    }

    pub fn batch_service(&self) -> TerritoryBatchService {
        TerritoryBatchService::new(
            self.store.clone(),
            self.sequencer(),
            self.geometry_service(),
            self.config.routing.batch_delay,
        )
    }
}
