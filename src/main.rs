use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use tree_collection_routing::config::{DatabaseConfig, EnvironmentConfig};
use tree_collection_routing::database::DatabaseConnection;
use tree_collection_routing::observability::{init_tracing, LogBuffer};
use tree_collection_routing::routes::create_router;
use tree_collection_routing::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging con captura para /api/health
    let log_buffer = LogBuffer::new(config.log_buffer_capacity);
    init_tracing(&config.log_level, log_buffer.clone())?;

    info!("🌲 Tree Collection Route Planner");
    info!("================================");
    info!("🌍 Entorno: {}", config.environment);
    info!("🛣️ OSRM: {} (timeout {:?})", config.routing.osrm_base_url, config.routing.osrm_timeout);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&DatabaseConfig::new(config.database_url.clone())).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();
    let addr: SocketAddr = config.server_url().parse()?;
    if config.cors_origins.is_empty() {
        warn!("⚠️ CORS_ORIGINS vacío: se permite cualquier origen");
    }

    let app_state = AppState::new(pool, config, log_buffer.clone())?;
    let app = create_router(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /api/health");
    info!("   GET    /api/territories");
    info!("   POST   /api/territories");
    info!("   PUT    /api/territories/:id");
    info!("   DELETE /api/territories/:id");
    info!("   POST   /api/territories/:id/optimize");
    info!("   POST   /api/territories/:id/calculate-route");
    info!("   GET    /api/stops?territory_id=");
    info!("   POST   /api/stops");
    info!("   PUT    /api/stops/:id");
    info!("   DELETE /api/stops/:id");
    info!("   DELETE /api/stops");
    info!("   POST   /api/register");
    info!("   GET    /api/checklist");
    info!("   POST   /api/checklist");
    info!("   PUT    /api/checklist/:id");
    info!("   DELETE /api/checklist/:id");
    info!("   POST   /api/checklist/reset");
    info!("   GET    /api/posters");
    info!("   POST   /api/posters");
    info!("   PUT    /api/posters/:id");
    info!("   DELETE /api/posters/:id");
    info!("   DELETE /api/posters");
    info!("   GET    /api/campaign/entries");
    info!("   PUT    /api/campaign/entries");
    info!("   POST   /api/campaign/actions");
    info!("   POST   /api/campaign/register");
    info!("   POST   /api/admin/routes/batch");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    log_buffer.clear();

    if let Err(e) = served {
        error!("❌ Servidor terminó con error: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
