use axum::{
    body::Bytes,
    extract::State,
    routing::post,
    Json, Router,
};

use crate::controllers::tracking_controller::TrackingController;
use crate::dto::tracking_dto::GpsUpdateRequest;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new()
        .route("/data", post(gps_data))
        .route("/binary_data", post(gps_binary_data))
}

/// Telemetría JSON de los trackers
async fn gps_data(
    State(state): State<AppState>,
    Json(request): Json<GpsUpdateRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrackingController::new(state.pool.clone());
    controller.ingest_json(request).await?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}

/// Paquete binario comprimido del firmware
async fn gps_binary_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TrackingController::new(state.pool.clone());
    controller.ingest_binary(&body).await?;
    Ok(Json(serde_json::json!({ "status": "success" })))
}
