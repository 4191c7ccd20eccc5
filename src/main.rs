mod config;
mod state;
mod database;
mod models;
mod services;
mod utils;
mod middleware;
mod repositories;
mod controllers;
mod routes;
mod dto;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::{run_migrations, DatabaseConnection};
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use middleware::rate_limit::{rate_limit_middleware, RateLimitState};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚚 Fleet Tracking Backend");
    info!("=========================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = run_migrations(db_connection.pool()).await {
        error!("❌ Error aplicando el schema: {}", e);
        return Err(anyhow::anyhow!("Error de schema: {}", e));
    }
    info!("✅ Schema de base de datos listo");

    let pool = db_connection.pool().clone();
    let app_state = AppState::new(pool, config.clone());
    let rate_limit_state = RateLimitState::new(&config);

    // CORS permisivo solo en desarrollo
    let cors = if config.is_development() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/parts", routes::part_routes::create_part_router())
        .nest(
            "/gps",
            routes::tracking_routes::create_tracking_router().layer(
                axum::middleware::from_fn_with_state(rate_limit_state, rate_limit_middleware),
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_addr().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚐 Endpoints - Vehicles:");
    info!("   POST /api/vehicles - Registrar vehículo");
    info!("   GET  /api/vehicles - Listar flota con salud agregada");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("   GET  /api/vehicles/:id/status - Estado de mantenimiento");
    info!("   PUT  /api/vehicles/:id/maintenance - Registrar servicios");
    info!("   POST /api/vehicles/:id/control - Habilitar/deshabilitar");
    info!("   GET  /api/vehicles/:id/track - Traza reciente");
    info!("   POST /api/vehicles/reset-daily-mileage - Reset kilometraje diario");
    info!("📦 Endpoints - Parts:");
    info!("   POST /api/parts - Crear pieza");
    info!("   GET  /api/parts - Listar inventario");
    info!("   GET  /api/parts/:id - Obtener pieza");
    info!("   PUT  /api/parts/:id - Actualizar pieza");
    info!("   DELETE /api/parts/:id - Eliminar pieza");
    info!("📡 Endpoints - GPS:");
    info!("   POST /gps/data - Telemetría JSON");
    info!("   POST /gps/binary_data - Paquete binario comprimido");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                anyhow::Error::from(e)
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check del servicio
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "fleet-tracking",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
