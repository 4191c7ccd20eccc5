use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::controllers::tracking_controller::TrackingController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::status_dto::MaintenanceStatusResponse;
use crate::dto::tracking_dto::TrackPointResponse;
use crate::dto::vehicle_dto::{
    ControlActionRequest, CreateVehicleRequest, UpdateMaintenanceRequest, UpdateVehicleRequest,
    VehicleListResponse, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_vehicle))
        .route("/", get(list_vehicles))
        .route("/reset-daily-mileage", post(reset_daily_mileage))
        .route("/:id", get(get_vehicle))
        .route("/:id", put(update_vehicle))
        .route("/:id", axum::routing::delete(delete_vehicle))
        .route("/:id/status", get(vehicle_status))
        .route("/:id/maintenance", put(update_maintenance))
        .route("/:id/control", post(control_vehicle))
        .route("/:id/track", get(vehicle_track))
}

#[derive(Debug, Deserialize)]
struct TrackQuery {
    limit: Option<i64>,
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleListResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Vehicle deleted successfully"
    })))
}

/// Estado de mantenimiento calculado: 8 categorías + salud agregada
async fn vehicle_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MaintenanceStatusResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.status(id).await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.update_maintenance(id, request).await?;
    Ok(Json(response))
}

async fn control_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ControlActionRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.control(id, request).await?;
    Ok(Json(response))
}

async fn vehicle_track(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<TrackQuery>,
) -> Result<Json<Vec<TrackPointResponse>>, AppError> {
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let controller = TrackingController::new(state.pool.clone());
    let response = controller.track(id, limit).await?;
    Ok(Json(response))
}

async fn reset_daily_mileage(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let updated = controller.reset_daily_mileage().await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "updated": updated
    })))
}
