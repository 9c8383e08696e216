use axum::{extract::State, routing::post, Json, Router};

use crate::controllers::route_controller::RouteController;
use crate::dto::route_dto::{BatchRouteRequest, BatchSummary};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new().route("/routes/batch", post(run_batch))
}

/// Optimiza o recalcula todos los territorios, uno detrás de otro
async fn run_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRouteRequest>,
) -> Result<Json<ApiResponse<BatchSummary>>, AppError> {
    let controller = RouteController::new(&state);
    let summary = controller.run_batch(request.action).await?;
    Ok(Json(ApiResponse::success(summary)))
}
