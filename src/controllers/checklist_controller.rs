use sqlx::PgPool;
use validator::Validate;

use crate::dto::checklist_dto::{blank_to_none, CreateChecklistItemRequest, UpdateChecklistItemRequest};
use crate::dto::territory_dto::CreatedResponse;
use crate::dto::ApiResponse;
use crate::models::ChecklistItem;
use crate::repositories::checklist_repository::{ChecklistChanges, ChecklistRepository};
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

/// Checklist de organización de la campaña
pub struct ChecklistController {
    repository: ChecklistRepository,
}

impl ChecklistController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ChecklistRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<ChecklistItem>, AppError> {
        self.repository.find_all().await
    }

    pub async fn create(&self, request: CreateChecklistItemRequest) -> Result<ApiResponse<CreatedResponse>, AppError> {
        request.validate()?;

        let id = self
            .repository
            .create(
                request.text.trim().to_string(),
                blank_to_none(request.target_date),
                blank_to_none(request.responsible),
            )
            .await?;

        Ok(ApiResponse::success(CreatedResponse { id }))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateChecklistItemRequest,
    ) -> Result<ApiResponse<ChecklistItem>, AppError> {
        if request.is_empty() {
            return Err(bad_request_error("No fields to update"));
        }
        request.validate()?;

        let item = self
            .repository
            .update(
                id,
                ChecklistChanges {
                    text: request.text,
                    target_date: request.target_date.map(blank_to_none),
                    responsible: request.responsible.map(blank_to_none),
                    is_completed: request.is_completed,
                },
            )
            .await?;

        Ok(ApiResponse::success(item))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Checklist item", id));
        }
        Ok(())
    }

    /// Vuelve a la lista por defecto para una campaña nueva
    pub async fn reset(&self) -> Result<ApiResponse<Vec<ChecklistItem>>, AppError> {
        let count = self.repository.reset_to_defaults().await?;
        log::info!("📋 Checklist reiniciado con {} tareas", count);

        let items = self.repository.find_all().await?;
        Ok(ApiResponse::success_with_message(items, "Checklist reset".to_string()))
    }
}
