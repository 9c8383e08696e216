use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::{to_stored_path, Coordinate, Territory, TerritorySummary};
use crate::utils::errors::AppError;

const TERRITORY_COLUMNS: &str = "id, name, color, polygon, route_geometry, driver_name";

pub struct TerritoryRepository {
    pool: PgPool,
}

impl TerritoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: String, color: String, polygon: Vec<[f64; 2]>) -> Result<i64, AppError> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO territories (name, color, polygon) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(name)
        .bind(color)
        .bind(Json(polygon))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Territory>, AppError> {
        let territory = sqlx::query_as::<_, Territory>(&format!(
            "SELECT {} FROM territories WHERE id = $1",
            TERRITORY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(territory)
    }

    pub async fn find_all(&self) -> Result<Vec<Territory>, AppError> {
        let territories = sqlx::query_as::<_, Territory>(&format!(
            "SELECT {} FROM territories ORDER BY id",
            TERRITORY_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(territories)
    }

    pub async fn list_with_counts(&self) -> Result<Vec<TerritorySummary>, AppError> {
        let territories = sqlx::query_as::<_, TerritorySummary>(
            r#"
            SELECT t.id, t.name, t.color, t.polygon, t.route_geometry, t.driver_name,
                (SELECT COUNT(*) FROM stops s WHERE s.territory_id = t.id) AS total_stops,
                (SELECT COUNT(*) FROM stops s WHERE s.territory_id = t.id AND s.status = 'open') AS open_stops,
                (SELECT COUNT(*) FROM stops s WHERE s.territory_id = t.id AND s.status = 'collected') AS collected_stops
            FROM territories t
            ORDER BY t.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(territories)
    }

    pub async fn ids(&self) -> Result<Vec<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM territories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn update(
        &self,
        id: i64,
        name: Option<String>,
        color: Option<String>,
        polygon: Option<Vec<[f64; 2]>>,
        driver_name: Option<String>,
    ) -> Result<Territory, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Territory {} not found", id)))?;

        // Cadena vacía = sin conductor
        let driver_name = match driver_name {
            Some(name) if name.trim().is_empty() => None,
            Some(name) => Some(name),
            None => current.driver_name,
        };

        let territory = sqlx::query_as::<_, Territory>(&format!(
            r#"
            UPDATE territories
            SET name = $2, color = $3, polygon = $4, driver_name = $5
            WHERE id = $1
            RETURNING {}
            "#,
            TERRITORY_COLUMNS
        ))
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(color.unwrap_or(current.color))
        .bind(polygon.map(Json).unwrap_or(current.polygon))
        .bind(driver_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(territory)
    }

    pub async fn set_route_geometry(&self, id: i64, path: Option<&[Coordinate]>) -> Result<(), AppError> {
        sqlx::query("UPDATE territories SET route_geometry = $2 WHERE id = $1")
            .bind(id)
            .bind(path.map(to_stored_path))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Desasigna sus stops y borra el territorio en una transacción
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE stops SET territory_id = NULL WHERE territory_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM territories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}
