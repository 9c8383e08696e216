//! `RouteStore` en memoria
//!
//! Sirve para tests y para ejecutar el núcleo sin PostgreSQL. Cada escritura
//! toma el lock una sola vez, así que también es atómica.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{to_stored_path, Coordinate, Stop, Territory};
use crate::utils::errors::{AppError, AppResult};

use super::route_store::RouteStore;

#[derive(Default)]
struct MemoryData {
    stops: BTreeMap<i64, Stop>,
    territories: BTreeMap<i64, Territory>,
}

#[derive(Default)]
pub struct InMemoryRouteStore {
    data: RwLock<MemoryData>,
    fail_writes: AtomicBool,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_territory(&self, territory: Territory) {
        self.data.write().await.territories.insert(territory.id, territory);
    }

    pub async fn insert_stop(&self, stop: Stop) {
        self.data.write().await.stops.insert(stop.id, stop);
    }

    pub async fn stop(&self, id: i64) -> Option<Stop> {
        self.data.read().await.stops.get(&id).cloned()
    }

    pub async fn territory(&self, id: i64) -> Option<Territory> {
        self.data.read().await.territories.get(&id).cloned()
    }

    /// Hace fallar todas las escrituras siguientes
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "in-memory store is read-only".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RouteStore for InMemoryRouteStore {
    async fn stops_by_territory(&self, territory_id: i64) -> AppResult<Vec<Stop>> {
        let data = self.data.read().await;
        let mut stops: Vec<Stop> = data
            .stops
            .values()
            .filter(|stop| stop.territory_id == Some(territory_id))
            .cloned()
            .collect();
        stops.sort_by_key(|stop| (stop.sequence, stop.id));
        Ok(stops)
    }

    async fn set_stop_sequence(&self, territory_id: i64, order: &[(i64, i32)]) -> AppResult<()> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        for &(stop_id, sequence) in order {
            if let Some(stop) = data.stops.get_mut(&stop_id) {
                if stop.territory_id == Some(territory_id) {
                    stop.sequence = sequence;
                }
            }
        }
        Ok(())
    }

    async fn find_territory(&self, territory_id: i64) -> AppResult<Option<Territory>> {
        Ok(self.territory(territory_id).await)
    }

    async fn territory_ids(&self) -> AppResult<Vec<i64>> {
        Ok(self.data.read().await.territories.keys().copied().collect())
    }

    async fn set_territory_geometry(&self, territory_id: i64, path: Option<&[Coordinate]>) -> AppResult<()> {
        self.check_writable()?;
        let mut data = self.data.write().await;
        if let Some(territory) = data.territories.get_mut(&territory_id) {
            territory.route_geometry = path.map(to_stored_path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stops_come_back_in_sequence_order() {
        let store = InMemoryRouteStore::new();
        store.insert_stop(Stop::new(1, "A").in_territory(1).with_sequence(2)).await;
        store.insert_stop(Stop::new(2, "B").in_territory(1).with_sequence(0)).await;
        store.insert_stop(Stop::new(3, "C").in_territory(2).with_sequence(1)).await;
        store.insert_stop(Stop::new(4, "D").in_territory(1).with_sequence(0)).await;

        let ids: Vec<i64> = store.stops_by_territory(1).await.unwrap().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[tokio::test]
    async fn test_failed_write_changes_nothing() {
        let store = InMemoryRouteStore::new();
        store.insert_stop(Stop::new(1, "A").in_territory(1).with_sequence(5)).await;
        store.set_fail_writes(true);

        assert!(store.set_stop_sequence(1, &[(1, 0)]).await.is_err());
        assert_eq!(store.stop(1).await.unwrap().sequence, 5);
    }
}
