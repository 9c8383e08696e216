use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};

use crate::controllers::poster_controller::PosterController;
use crate::dto::poster_dto::PosterRequest;
use crate::dto::ApiResponse;
use crate::models::Poster;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_poster_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posters).post(create_poster).delete(delete_all_posters))
        .route("/:id", put(update_poster).delete(delete_poster))
}

async fn list_posters(State(state): State<AppState>) -> Result<Json<Vec<Poster>>, AppError> {
    let posters = PosterController::new(state.pool).list().await?;
    Ok(Json(posters))
}

async fn create_poster(
    State(state): State<AppState>,
    Json(request): Json<PosterRequest>,
) -> Result<Json<ApiResponse<Poster>>, AppError> {
    let response = PosterController::new(state.pool).create(request).await?;
    Ok(Json(response))
}

async fn update_poster(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PosterRequest>,
) -> Result<Json<ApiResponse<Poster>>, AppError> {
    let response = PosterController::new(state.pool).update(id, request).await?;
    Ok(Json(response))
}

async fn delete_poster(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    PosterController::new(state.pool).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Poster deleted"
    })))
}

async fn delete_all_posters(State(state): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = PosterController::new(state.pool).delete_all().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "deleted": deleted
    })))
}
