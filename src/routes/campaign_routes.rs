use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::campaign_controller::CampaignController;
use crate::dto::campaign_dto::{
    CampaignActionRequest, CampaignActionResponse, CampaignRegistrationResponse, RegisterCampaignEntryRequest,
    UpdateCampaignEntryRequest,
};
use crate::dto::ApiResponse;
use crate::models::CampaignEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_campaign_router() -> Router<AppState> {
    Router::new()
        .route("/entries", get(list_entries).put(update_entry))
        .route("/actions", post(run_action))
        .route("/register", post(register_entry))
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<CampaignEntry>>, AppError> {
    let entries = CampaignController::new(state.pool).list().await?;
    Ok(Json(entries))
}

async fn update_entry(
    State(state): State<AppState>,
    Json(request): Json<UpdateCampaignEntryRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = CampaignController::new(state.pool).update_entry(request).await?;
    Ok(Json(response))
}

async fn run_action(
    State(state): State<AppState>,
    Json(request): Json<CampaignActionRequest>,
) -> Result<Json<ApiResponse<CampaignActionResponse>>, AppError> {
    let response = CampaignController::new(state.pool).run_action(request).await?;
    Ok(Json(response))
}

async fn register_entry(
    State(state): State<AppState>,
    Json(request): Json<RegisterCampaignEntryRequest>,
) -> Result<Json<ApiResponse<CampaignRegistrationResponse>>, AppError> {
    let response = CampaignController::new(state.pool).register(request).await?;
    Ok(Json(response))
}
