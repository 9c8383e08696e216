//! Secuenciación de stops de un territorio
//!
//! Flujo: cargar stops ubicados, intentar el trip de OSRM si son pocos, si no
//! (o si falla) vecino más cercano + 2-opt, guardar `sequence = 0..n-1` en una
//! transacción y reconstruir la geometría.

use std::sync::Arc;

use serde::Serialize;

use crate::config::RoutingConfig;
use crate::models::{Coordinate, Stop};
use crate::repositories::RouteStore;
use crate::utils::errors::{not_found_error, AppResult};

use super::nearest_neighbor::nearest_neighbor;
use super::route_geometry_service::{GeometryOutcome, RouteGeometryService};
use super::trip_solver::{solve_with_trip_service, TripSolver};
use super::two_opt::two_opt;

/// Límites del secuenciador
#[derive(Debug, Clone, Copy)]
pub struct SequencerSettings {
    /// El trip de OSRM solo se intenta con menos stops que esto
    pub trip_solver_max_stops: usize,
    pub two_opt_max_passes: usize,
}

impl From<&RoutingConfig> for SequencerSettings {
    fn from(config: &RoutingConfig) -> Self {
        Self {
            trip_solver_max_stops: config.trip_solver_max_stops,
            two_opt_max_passes: config.two_opt_max_passes,
        }
    }
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self::from(&RoutingConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencingStrategy {
    TripService,
    Heuristic,
    /// Sin stops ubicados
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceOutcome {
    pub territory_id: i64,
    pub strategy: SequencingStrategy,
    pub sequenced_stops: usize,
    pub geometry: GeometryOutcome,
}

#[derive(Clone)]
pub struct RouteSequencer {
    store: Arc<dyn RouteStore>,
    trip_solver: Arc<dyn TripSolver>,
    geometry: RouteGeometryService,
    settings: SequencerSettings,
}

impl RouteSequencer {
    pub fn new(
        store: Arc<dyn RouteStore>,
        trip_solver: Arc<dyn TripSolver>,
        geometry: RouteGeometryService,
        settings: SequencerSettings,
    ) -> Self {
        Self {
            store,
            trip_solver,
            geometry,
            settings,
        }
    }

    /// Optimiza el orden de recogida del territorio
    pub async fn optimize_territory(&self, territory_id: i64, start: Option<Coordinate>) -> AppResult<SequenceOutcome> {
        if self.store.find_territory(territory_id).await?.is_none() {
            return Err(not_found_error("Territory", territory_id));
        }

        let located: Vec<Stop> = self
            .store
            .stops_by_territory(territory_id)
            .await?
            .into_iter()
            .filter(Stop::is_located)
            .collect();

        let (strategy, sequenced_stops) = if located.is_empty() {
            log::info!("📭 Territorio {}: sin stops ubicados, no se secuencia", territory_id);
            (SequencingStrategy::Skipped, 0)
        } else {
            let count = located.len();
            let (strategy, ordered) = self.order_stops(territory_id, located, start).await;

            let order: Vec<(i64, i32)> = ordered
                .iter()
                .enumerate()
                .map(|(position, stop)| (stop.id, position as i32))
                .collect();
            self.store.set_stop_sequence(territory_id, &order).await?;

            log::info!("✅ Territorio {}: {} stops secuenciados ({:?})", territory_id, count, strategy);
            (strategy, count)
        };

        let geometry = self.geometry.rebuild(territory_id).await?;

        Ok(SequenceOutcome {
            territory_id,
            strategy,
            sequenced_stops,
            geometry,
        })
    }

    async fn order_stops(
        &self,
        territory_id: i64,
        stops: Vec<Stop>,
        start: Option<Coordinate>,
    ) -> (SequencingStrategy, Vec<Stop>) {
        if stops.len() < self.settings.trip_solver_max_stops {
            match solve_with_trip_service(self.trip_solver.as_ref(), stops.clone(), start).await {
                Ok(ordered) => return (SequencingStrategy::TripService, ordered),
                Err(e) => log::warn!("⚠️ Territorio {}: {}, se usa la heurística", territory_id, e),
            }
        } else {
            log::info!(
                "🧮 Territorio {}: {} stops, se usa la heurística directamente",
                territory_id,
                stops.len()
            );
        }

        let ordered = two_opt(nearest_neighbor(stops, start), self.settings.two_opt_max_passes);
        (SequencingStrategy::Heuristic, ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Territory;
    use crate::repositories::InMemoryRouteStore;
    use crate::services::osrm_client::ExternalOutcome;
    use crate::services::route_geometry_service::DirectionsProvider;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Solver que devuelve el orden inverso, o falla
    struct ReversingSolver {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TripSolver for ReversingSolver {
        async fn trip_positions(&self, points: &[Coordinate]) -> ExternalOutcome<Vec<usize>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return ExternalOutcome::Failed("connection refused".to_string());
            }
            // El primero se queda fijo, el resto se invierte
            let n = points.len();
            let positions = (0..n).map(|i| if i == 0 { 0 } else { n - i }).collect();
            ExternalOutcome::Success(positions)
        }
    }

    struct NoDirections;

    #[async_trait]
    impl DirectionsProvider for NoDirections {
        async fn road_path(&self, _points: &[Coordinate]) -> ExternalOutcome<Vec<Coordinate>> {
            ExternalOutcome::RateLimited
        }
    }

    fn sequencer(store: Arc<InMemoryRouteStore>, solver: Arc<ReversingSolver>) -> RouteSequencer {
        let geometry = RouteGeometryService::new(store.clone(), Arc::new(NoDirections));
        RouteSequencer::new(store, solver, geometry, SequencerSettings::default())
    }

    fn solver(fail: bool) -> Arc<ReversingSolver> {
        Arc::new(ReversingSolver { fail, calls: AtomicUsize::new(0) })
    }

    async fn territory_store() -> Arc<InMemoryRouteStore> {
        let store = Arc::new(InMemoryRouteStore::new());
        store.insert_territory(Territory::new(1, "Nord", "#00ff00", &[])).await;
        store
    }

    async fn sequence_of(store: &InMemoryRouteStore, id: i64) -> i32 {
        store.stop(id).await.unwrap().sequence
    }

    #[tokio::test]
    async fn test_trip_service_order_is_persisted() {
        let store = territory_store().await;
        store.insert_stop(Stop::new(1, "A").located_at(49.40, 11.80).in_territory(1)).await;
        store.insert_stop(Stop::new(2, "B").located_at(49.41, 11.80).in_territory(1)).await;
        store.insert_stop(Stop::new(3, "C").located_at(49.40, 11.82).in_territory(1)).await;
        let solver = solver(false);

        let outcome = sequencer(store.clone(), solver.clone()).optimize_territory(1, None).await.unwrap();

        assert_eq!(outcome.strategy, SequencingStrategy::TripService);
        assert_eq!(outcome.sequenced_stops, 3);
        // Puntos enviados: 2 (norte), 1, 3 -> viaje 2, 3, 1
        assert_eq!(sequence_of(&store, 2).await, 0);
        assert_eq!(sequence_of(&store, 3).await, 1);
        assert_eq!(sequence_of(&store, 1).await, 2);
        assert_eq!(solver.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_solver_failure_falls_back_to_heuristic() {
        let store = territory_store().await;
        store.insert_stop(Stop::new(1, "A").located_at(49.40, 11.80).in_territory(1)).await;
        store.insert_stop(Stop::new(2, "B").located_at(49.41, 11.80).in_territory(1)).await;
        store.insert_stop(Stop::new(3, "C").located_at(49.40, 11.82).in_territory(1)).await;

        let outcome = sequencer(store.clone(), solver(true)).optimize_territory(1, None).await.unwrap();

        assert_eq!(outcome.strategy, SequencingStrategy::Heuristic);
        assert_eq!(sequence_of(&store, 2).await, 0);
        assert_eq!(sequence_of(&store, 1).await, 1);
        assert_eq!(sequence_of(&store, 3).await, 2);
        assert_eq!(outcome.geometry, GeometryOutcome::StraightLine { points: 3 });
    }

    #[tokio::test]
    async fn test_large_territory_never_calls_solver() {
        let store = territory_store().await;
        for i in 0..100 {
            let stop = Stop::new(i, format!("Street {}", i))
                .located_at(49.0 + (i as f64) * 0.001, 11.0 + ((i * 7) % 13) as f64 * 0.001)
                .in_territory(1);
            store.insert_stop(stop).await;
        }
        let solver = solver(false);

        let outcome = sequencer(store.clone(), solver.clone()).optimize_territory(1, None).await.unwrap();

        assert_eq!(outcome.strategy, SequencingStrategy::Heuristic);
        assert_eq!(outcome.sequenced_stops, 100);
        assert_eq!(solver.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unlocated_stops_keep_their_sequence() {
        let store = territory_store().await;
        store.insert_stop(Stop::new(1, "A").located_at(49.40, 11.80).in_territory(1).with_sequence(4)).await;
        store.insert_stop(Stop::new(2, "B").located_at(49.41, 11.80).in_territory(1).with_sequence(3)).await;
        store.insert_stop(Stop::new(3, "C").in_territory(1).with_sequence(7)).await;

        sequencer(store.clone(), solver(true)).optimize_territory(1, None).await.unwrap();

        assert_eq!(sequence_of(&store, 2).await, 0);
        assert_eq!(sequence_of(&store, 1).await, 1);
        assert_eq!(sequence_of(&store, 3).await, 7);
    }

    #[tokio::test]
    async fn test_no_located_stops_skips_and_clears_geometry() {
        let store = territory_store().await;
        store.insert_stop(Stop::new(1, "A").in_territory(1).with_sequence(2)).await;

        let outcome = sequencer(store.clone(), solver(false)).optimize_territory(1, None).await.unwrap();

        assert_eq!(outcome.strategy, SequencingStrategy::Skipped);
        assert_eq!(outcome.geometry, GeometryOutcome::Cleared);
        assert_eq!(sequence_of(&store, 1).await, 2);
    }

    #[tokio::test]
    async fn test_unknown_territory_is_not_found() {
        let store = Arc::new(InMemoryRouteStore::new());
        let result = sequencer(store, solver(false)).optimize_territory(99, None).await;

        assert!(matches!(result, Err(crate::utils::errors::AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_persistence_failure_propagates() {
        let store = territory_store().await;
        store.insert_stop(Stop::new(1, "A").located_at(49.40, 11.80).in_territory(1).with_sequence(1)).await;
        store.insert_stop(Stop::new(2, "B").located_at(49.41, 11.80).in_territory(1).with_sequence(0)).await;
        store.set_fail_writes(true);

        let result = sequencer(store.clone(), solver(true)).optimize_territory(1, None).await;

        assert!(matches!(result, Err(crate::utils::errors::AppError::Database(_))));
        assert_eq!(sequence_of(&store, 1).await, 1);
    }
}
