use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Coordinate, Stop, Territory};
use crate::utils::errors::AppResult;

use super::route_store::RouteStore;
use super::stop_repository::StopRepository;
use super::territory_repository::TerritoryRepository;

/// `RouteStore` sobre PostgreSQL
pub struct PgRouteStore {
    stops: StopRepository,
    territories: TerritoryRepository,
}

impl PgRouteStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            stops: StopRepository::new(pool.clone()),
            territories: TerritoryRepository::new(pool),
        }
    }
}

#[async_trait]
impl RouteStore for PgRouteStore {
    async fn stops_by_territory(&self, territory_id: i64) -> AppResult<Vec<Stop>> {
        self.stops.find_by_territory(territory_id).await
    }

    async fn set_stop_sequence(&self, territory_id: i64, order: &[(i64, i32)]) -> AppResult<()> {
        self.stops.set_sequences(territory_id, order).await
    }

    async fn find_territory(&self, territory_id: i64) -> AppResult<Option<Territory>> {
        self.territories.find_by_id(territory_id).await
    }

    async fn territory_ids(&self) -> AppResult<Vec<i64>> {
        self.territories.ids().await
    }

    async fn set_territory_geometry(&self, territory_id: i64, path: Option<&[Coordinate]>) -> AppResult<()> {
        self.territories.set_route_geometry(territory_id, path).await
    }
}
