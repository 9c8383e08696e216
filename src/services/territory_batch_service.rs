//! Optimización o recálculo de todos los territorios
//!
//! Procesa los territorios uno detrás de otro con una pausa entre ellos para no
//! saturar el servidor público de OSRM. Un fallo en un territorio se registra y
//! se cuenta, pero no corta el lote.

use std::sync::Arc;
use std::time::Duration;

use crate::dto::route_dto::{BatchAction, BatchSummary};
use crate::repositories::RouteStore;
use crate::utils::errors::AppResult;

use super::route_geometry_service::RouteGeometryService;
use super::route_sequencer::RouteSequencer;

pub struct TerritoryBatchService {
    store: Arc<dyn RouteStore>,
    sequencer: RouteSequencer,
    geometry: RouteGeometryService,
    delay: Duration,
}

impl TerritoryBatchService {
    pub fn new(
        store: Arc<dyn RouteStore>,
        sequencer: RouteSequencer,
        geometry: RouteGeometryService,
        delay: Duration,
    ) -> Self {
        Self {
            store,
            sequencer,
            geometry,
            delay,
        }
    }

    pub async fn run(&self, action: BatchAction) -> AppResult<BatchSummary> {
        let ids = self.store.territory_ids().await?;
        log::info!("🚀 Lote {:?} sobre {} territorios", action, ids.len());

        let mut summary = BatchSummary {
            action,
            processed: 0,
            failed: 0,
        };

        for (index, territory_id) in ids.iter().copied().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let result = match action {
                BatchAction::Optimize => self.sequencer.optimize_territory(territory_id, None).await.map(|_| ()),
                BatchAction::Calculate => self.geometry.rebuild(territory_id).await.map(|_| ()),
            };

            match result {
                Ok(()) => summary.processed += 1,
                Err(e) => {
                    log::error!("❌ Lote {:?} falló en territorio {}: {}", action, territory_id, e);
                    summary.failed += 1;
                }
            }
        }

        log::info!(
            "🏁 Lote {:?} terminado: {} procesados, {} fallidos",
            action,
            summary.processed,
            summary.failed
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, Stop, Territory};
    use crate::repositories::InMemoryRouteStore;
    use crate::services::osrm_client::ExternalOutcome;
    use crate::services::route_geometry_service::DirectionsProvider;
    use crate::services::route_sequencer::SequencerSettings;
    use crate::services::trip_solver::TripSolver;
    use async_trait::async_trait;
    use std::time::Instant;

    struct Offline;

    #[async_trait]
    impl TripSolver for Offline {
        async fn trip_positions(&self, _points: &[Coordinate]) -> ExternalOutcome<Vec<usize>> {
            ExternalOutcome::Failed("offline".to_string())
        }
    }

    #[async_trait]
    impl DirectionsProvider for Offline {
        async fn road_path(&self, _points: &[Coordinate]) -> ExternalOutcome<Vec<Coordinate>> {
            ExternalOutcome::Failed("offline".to_string())
        }
    }

    fn batch(store: Arc<InMemoryRouteStore>, delay: Duration) -> TerritoryBatchService {
        let geometry = RouteGeometryService::new(store.clone(), Arc::new(Offline));
        let sequencer = RouteSequencer::new(store.clone(), Arc::new(Offline), geometry.clone(), SequencerSettings::default());
        TerritoryBatchService::new(store, sequencer, geometry, delay)
    }

    async fn seeded_store() -> Arc<InMemoryRouteStore> {
        let store = Arc::new(InMemoryRouteStore::new());
        for id in 1..=3 {
            store.insert_territory(Territory::new(id, format!("T{}", id), "#123456", &[])).await;
            store
                .insert_stop(Stop::new(id * 10, "A").located_at(49.0 + id as f64 * 0.01, 11.0).in_territory(id))
                .await;
            store
                .insert_stop(Stop::new(id * 10 + 1, "B").located_at(49.0, 11.0 + id as f64 * 0.01).in_territory(id))
                .await;
        }
        store
    }

    #[tokio::test]
    async fn test_optimize_all_processes_every_territory() {
        let store = seeded_store().await;
        let summary = batch(store.clone(), Duration::ZERO).run(BatchAction::Optimize).await.unwrap();

        assert_eq!(summary, BatchSummary { action: BatchAction::Optimize, processed: 3, failed: 0 });
        for id in 1..=3 {
            assert!(store.territory(id).await.unwrap().route_geometry.is_some());
        }
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let store = seeded_store().await;
        store.set_fail_writes(true);

        let summary = batch(store, Duration::ZERO).run(BatchAction::Calculate).await.unwrap();

        assert_eq!(summary.processed, 0);
        assert_eq!(summary.failed, 3);
    }

    #[tokio::test]
    async fn test_delay_only_between_territories() {
        let store = seeded_store().await;
        let started = Instant::now();

        batch(store, Duration::from_millis(40)).run(BatchAction::Calculate).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(80));
    }
}
