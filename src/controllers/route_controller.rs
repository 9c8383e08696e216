use std::sync::Arc;

use crate::dto::route_dto::{BatchAction, BatchSummary, OptimizeRouteRequest};
use crate::repositories::RouteStore;
use crate::services::{GeometryOutcome, RouteGeometryService, RouteSequencer, SequenceOutcome, TerritoryBatchService};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Optimización de rutas y cálculo de geometría
pub struct RouteController {
    store: Arc<dyn RouteStore>,
    sequencer: RouteSequencer,
    geometry: RouteGeometryService,
    batch: TerritoryBatchService,
}

impl RouteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            sequencer: state.sequencer(),
            geometry: state.geometry_service(),
            batch: state.batch_service(),
        }
    }

    pub async fn optimize(&self, territory_id: i64, request: OptimizeRouteRequest) -> Result<SequenceOutcome, AppError> {
        log::info!("🧭 Optimizando territorio {}", territory_id);
        self.sequencer.optimize_territory(territory_id, request.start_point).await
    }

    pub async fn calculate(&self, territory_id: i64) -> Result<GeometryOutcome, AppError> {
        if self.store.find_territory(territory_id).await?.is_none() {
            return Err(not_found_error("Territory", territory_id));
        }
        self.geometry.rebuild(territory_id).await
    }

    pub async fn run_batch(&self, action: BatchAction) -> Result<BatchSummary, AppError> {
        self.batch.run(action).await
    }
}
