//! Routers HTTP
//!
//! Cada recurso tiene su propio router; `create_router` los monta bajo `/api`.

pub mod admin_routes;
pub mod campaign_routes;
pub mod checklist_routes;
pub mod health_routes;
pub mod poster_routes;
pub mod route_planning_routes;
pub mod stop_routes;
pub mod territory_routes;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest(
            "/api/territories",
            territory_routes::create_territory_router().merge(route_planning_routes::create_route_planning_router()),
        )
        .nest("/api/stops", stop_routes::create_stop_router())
        .nest("/api/register", stop_routes::create_register_router())
        .nest("/api/checklist", checklist_routes::create_checklist_router())
        .nest("/api/posters", poster_routes::create_poster_router())
        .nest("/api/campaign", campaign_routes::create_campaign_router())
        .nest("/api/admin", admin_routes::create_admin_router())
        .nest("/api/health", health_routes::create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
