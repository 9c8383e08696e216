use sqlx::PgPool;
use validator::Validate;

use crate::dto::territory_dto::{CreateTerritoryRequest, CreatedResponse, UpdateTerritoryRequest};
use crate::dto::ApiResponse;
use crate::models::{Territory, TerritorySummary};
use crate::repositories::territory_repository::TerritoryRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct TerritoryController {
    repository: TerritoryRepository,
}

impl TerritoryController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TerritoryRepository::new(pool),
        }
    }

    /// Listado con contadores de stops por estado
    pub async fn list(&self) -> Result<Vec<TerritorySummary>, AppError> {
        self.repository.list_with_counts().await
    }

    pub async fn create(&self, request: CreateTerritoryRequest) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        let id = self
            .repository
            .create(request.name.trim().to_string(), request.color, request.polygon)
            .await?;

        log::info!("🗺️ Territorio {} creado", id);
        Ok(ApiResponse::success_with_message(
            CreatedResponse { id },
            "Territory created".to_string(),
        ))
    }

    pub async fn update(&self, id: i64, request: UpdateTerritoryRequest) -> Result<ApiResponse<Territory>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields to update"));
        }
        request.validate()?;

        let territory = self
            .repository
            .update(id, request.name, request.color, request.polygon, request.driver_name)
            .await?;

        Ok(ApiResponse::success(territory))
    }

    /// Sus stops quedan sin territorio
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Territory", id));
        }

        log::info!("🗑️ Territorio {} eliminado", id);
        Ok(())
    }
}
