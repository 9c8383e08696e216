use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::OptimizeRouteRequest;
use crate::dto::ApiResponse;
use crate::services::{GeometryOutcome, SequenceOutcome};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de optimización; se montan junto a las de territorios
pub fn create_route_planning_router() -> Router<AppState> {
    Router::new()
        .route("/:id/optimize", post(optimize_route))
        .route("/:id/calculate-route", post(calculate_route))
}

async fn optimize_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Option<Json<OptimizeRouteRequest>>,
) -> Result<Json<ApiResponse<SequenceOutcome>>, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let controller = RouteController::new(&state);
    let outcome = controller.optimize(id, request).await?;
    Ok(Json(ApiResponse::success(outcome)))
}

async fn calculate_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<GeometryOutcome>>, AppError> {
    let controller = RouteController::new(&state);
    let outcome = controller.calculate(id).await?;
    Ok(Json(ApiResponse::success(outcome)))
}
