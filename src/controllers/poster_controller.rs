use sqlx::PgPool;
use validator::Validate;

use crate::dto::poster_dto::PosterRequest;
use crate::dto::ApiResponse;
use crate::models::Poster;
use crate::repositories::poster_repository::PosterRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct PosterController {
    repository: PosterRepository,
}

impl PosterController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PosterRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<Poster>, AppError> {
        self.repository.find_all().await
    }

    pub async fn create(&self, request: PosterRequest) -> Result<ApiResponse<Poster>, AppError> {
        request.validate()?;

        let poster = self
            .repository
            .create(request.lat, request.lng, request.note.unwrap_or_default())
            .await?;

        log::info!("📌 Cartel {} marcado", poster.id);
        Ok(ApiResponse::success(poster))
    }

    /// Sustituye posición y nota
    pub async fn update(&self, id: i64, request: PosterRequest) -> Result<ApiResponse<Poster>, AppError> {
        request.validate()?;

        let poster = self
            .repository
            .update(id, request.lat, request.lng, request.note.unwrap_or_default())
            .await?
            .ok_or_else(|| not_found_error("Poster", id))?;

        Ok(ApiResponse::success(poster))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Poster", id));
        }
        Ok(())
    }

    pub async fn delete_all(&self) -> Result<u64, AppError> {
        let deleted = self.repository.delete_all().await?;
        log::warn!("🗑️ Todos los carteles eliminados ({})", deleted);
        Ok(deleted)
    }
}
