use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::stop_controller::StopController;
use crate::dto::stop_dto::{CreateStopsPayload, RegisterStopRequest, StopQuery, UpdateStopRequest};
use crate::dto::territory_dto::CreatedResponse;
use crate::dto::ApiResponse;
use crate::models::Stop;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_stop_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stops).post(create_stops).delete(delete_all_stops))
        .route("/:id", put(update_stop).delete(delete_stop))
}

/// Registro público de árboles
pub fn create_register_router() -> Router<AppState> {
    Router::new().route("/", post(register_stop))
}

fn controller(state: &AppState) -> StopController {
    StopController::new(state.pool.clone(), state.geometry_service())
}

async fn list_stops(
    State(state): State<AppState>,
    Query(query): Query<StopQuery>,
) -> Result<Json<Vec<Stop>>, AppError> {
    let response = controller(&state).list(query.territory_id).await?;
    Ok(Json(response))
}

async fn create_stops(
    State(state): State<AppState>,
    Json(payload): Json<CreateStopsPayload>,
) -> Result<Json<ApiResponse<Vec<Stop>>>, AppError> {
    let response = controller(&state).create(payload.into_vec()).await?;
    Ok(Json(response))
}

async fn register_stop(
    State(state): State<AppState>,
    Json(request): Json<RegisterStopRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, AppError> {
    let response = controller(&state).register(request).await?;
    Ok(Json(response))
}

async fn update_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateStopRequest>,
) -> Result<Json<ApiResponse<Stop>>, AppError> {
    let response = controller(&state).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_stop(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Stop deleted"
    })))
}

async fn delete_all_stops(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = controller(&state).delete_all().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "deleted": deleted
    })))
}
