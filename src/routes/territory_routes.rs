use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::territory_controller::TerritoryController;
use crate::dto::territory_dto::{CreateTerritoryRequest, CreatedResponse, UpdateTerritoryRequest};
use crate::dto::ApiResponse;
use crate::models::{Territory, TerritorySummary};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_territory_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_territories).post(create_territory))
        .route("/:id", put(update_territory).delete(delete_territory))
}

async fn list_territories(State(state): State<AppState>) -> Result<Json<Vec<TerritorySummary>>, AppError> {
    let controller = TerritoryController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn create_territory(
    State(state): State<AppState>,
    Json(request): Json<CreateTerritoryRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, AppError> {
    let controller = TerritoryController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn update_territory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateTerritoryRequest>,
) -> Result<Json<ApiResponse<Territory>>, AppError> {
    let controller = TerritoryController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_territory(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TerritoryController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Territory deleted"
    })))
}
