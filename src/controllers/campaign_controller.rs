use sqlx::PgPool;
use validator::Validate;

use crate::dto::campaign_dto::{
    CampaignAction, CampaignActionRequest, CampaignActionResponse, CampaignRegistrationResponse,
    RegisterCampaignEntryRequest, UpdateCampaignEntryRequest,
};
use crate::dto::ApiResponse;
use crate::models::{CampaignEntry, CampaignStatus};
use crate::repositories::campaign_repository::CampaignRepository;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

/// Campaña telefónica a vecinos de años anteriores
pub struct CampaignController {
    repository: CampaignRepository,
}

impl CampaignController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CampaignRepository::new(pool),
        }
    }

    pub async fn list(&self) -> Result<Vec<CampaignEntry>, AppError> {
        self.repository.find_all().await
    }

    pub async fn update_entry(&self, request: UpdateCampaignEntryRequest) -> Result<ApiResponse<()>, AppError> {
        request.validate()?;
        let (id, status) = match (request.id, request.status) {
            (Some(id), Some(status)) => (id, status),
            _ => return Err(bad_request_error("Missing id or status")),
        };
        let status = CampaignStatus::parse(&status)
            .ok_or_else(|| bad_request_error(&format!("Unknown status '{}'", status)))?;

        if !self.repository.update_status(id, status).await? {
            return Err(not_found_error("Campaign entry", id));
        }

        Ok(ApiResponse::success(()))
    }

    pub async fn run_action(&self, request: CampaignActionRequest) -> Result<ApiResponse<CampaignActionResponse>, AppError> {
        let action = CampaignAction::parse(&request.action)
            .ok_or_else(|| bad_request_error(&format!("Invalid action '{}'", request.action)))?;

        let (affected, message) = match action {
            CampaignAction::DeleteAll => {
                let deleted = self.repository.delete_all().await?;
                log::warn!("🗑️ Campaña vaciada ({} entradas)", deleted);
                (deleted, "All entries deleted")
            }
            CampaignAction::ResetStatus => {
                let reset = self.repository.reset_statuses().await?;
                log::info!("🔄 Campaña reiniciada: {} entradas vuelven a open", reset);
                (reset, "All statuses reset to open")
            }
        };

        Ok(ApiResponse::success_with_message(
            CampaignActionResponse { affected },
            message.to_string(),
        ))
    }

    /// Registra el árbol de una entrada como stop sin ubicar ni asignar
    pub async fn register(
        &self,
        request: RegisterCampaignEntryRequest,
    ) -> Result<ApiResponse<CampaignRegistrationResponse>, AppError> {
        request.validate()?;
        let (entry_id, name, address) = match (request.id, request.name, request.address) {
            (Some(id), Some(name), Some(address)) => (id, name, address),
            _ => return Err(bad_request_error("Missing data")),
        };

        let stop_id = self
            .repository
            .register(entry_id, name.trim().to_string(), address.trim().to_string(), request.phone)
            .await?
            .ok_or_else(|| not_found_error("Campaign entry", entry_id))?;

        log::info!("📞 Entrada {} registrada como stop {}", entry_id, stop_id);
        Ok(ApiResponse::success(CampaignRegistrationResponse { entry_id, stop_id }))
    }
}
