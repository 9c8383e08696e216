use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::checklist_controller::ChecklistController;
use crate::dto::checklist_dto::{CreateChecklistItemRequest, UpdateChecklistItemRequest};
use crate::dto::territory_dto::CreatedResponse;
use crate::dto::ApiResponse;
use crate::models::ChecklistItem;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checklist_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/reset", post(reset_items))
        .route("/:id", put(update_item).delete(delete_item))
}

async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<ChecklistItem>>, AppError> {
    let items = ChecklistController::new(state.pool).list().await?;
    Ok(Json(items))
}

async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateChecklistItemRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, AppError> {
    let response = ChecklistController::new(state.pool).create(request).await?;
    Ok(Json(response))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateChecklistItemRequest>,
) -> Result<Json<ApiResponse<ChecklistItem>>, AppError> {
    let response = ChecklistController::new(state.pool).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    ChecklistController::new(state.pool).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Checklist item deleted"
    })))
}

async fn reset_items(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<ChecklistItem>>>, AppError> {
    let response = ChecklistController::new(state.pool).reset().await?;
    Ok(Json(response))
}
