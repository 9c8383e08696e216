//! Contrato de persistencia del núcleo de rutas
//!
//! El secuenciador y el constructor de geometría solo hablan con este trait.

use async_trait::async_trait;

use crate::models::{Coordinate, Stop, Territory};
use crate::utils::errors::AppResult;

#[async_trait]
pub trait RouteStore: Send + Sync {
    /// Stops del territorio ordenados por `sequence` y luego por `id`
    async fn stops_by_territory(&self, territory_id: i64) -> AppResult<Vec<Stop>>;

    /// Escribe todas las secuencias o ninguna
    async fn set_stop_sequence(&self, territory_id: i64, order: &[(i64, i32)]) -> AppResult<()>;

    async fn find_territory(&self, territory_id: i64) -> AppResult<Option<Territory>>;

    async fn territory_ids(&self) -> AppResult<Vec<i64>>;

    /// `None` borra la geometría
    async fn set_territory_geometry(&self, territory_id: i64, path: Option<&[Coordinate]>) -> AppResult<()>;
}
