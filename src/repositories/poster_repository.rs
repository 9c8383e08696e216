use sqlx::PgPool;

use crate::models::Poster;
use crate::utils::errors::AppError;

const POSTER_COLUMNS: &str = "id, lat, lng, note, created_at";

pub struct PosterRepository {
    pool: PgPool,
}

impl PosterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Los más recientes primero
    pub async fn find_all(&self) -> Result<Vec<Poster>, AppError> {
        let posters = sqlx::query_as::<_, Poster>(&format!(
            "SELECT {} FROM posters ORDER BY created_at DESC, id DESC",
            POSTER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posters)
    }

    pub async fn create(&self, lat: f64, lng: f64, note: String) -> Result<Poster, AppError> {
        let poster = sqlx::query_as::<_, Poster>(&format!(
            "INSERT INTO posters (lat, lng, note) VALUES ($1, $2, $3) RETURNING {}",
            POSTER_COLUMNS
        ))
        .bind(lat)
        .bind(lng)
        .bind(note)
        .fetch_one(&self.pool)
        .await?;

        Ok(poster)
    }

    pub async fn update(&self, id: i64, lat: f64, lng: f64, note: String) -> Result<Option<Poster>, AppError> {
        let poster = sqlx::query_as::<_, Poster>(&format!(
            "UPDATE posters SET lat = $2, lng = $3, note = $4 WHERE id = $1 RETURNING {}",
            POSTER_COLUMNS
        ))
        .bind(id)
        .bind(lat)
        .bind(lng)
        .bind(note)
        .fetch_optional(&self.pool)
        .await?;

        Ok(poster)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let deleted = sqlx::query("DELETE FROM posters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let deleted = sqlx::query("DELETE FROM posters")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}
