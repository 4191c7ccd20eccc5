//! DTOs del estado de mantenimiento
//!
//! Salida del motor de mantenimiento tal como la consume el dashboard:
//! porcentaje para el ancho de la barra de progreso, color de pintado,
//! etiqueta del tier, kilómetros restantes y odómetro del próximo servicio.

use serde::Serialize;
use uuid::Uuid;

use crate::models::maintenance::{CategoryStatus, MaintenanceCategory, VehicleHealth};
use crate::models::vehicle::Vehicle;

/// Estado calculado de una categoría para el render
#[derive(Debug, Serialize)]
pub struct CategoryStatusResponse {
    pub category: MaintenanceCategory,
    pub percentage: f64,
    pub color: String,
    pub label: String,
    pub remaining: f64,
    pub interval: f64,
    pub last_change: Option<f64>,
    pub next_due: Option<f64>,
}

impl CategoryStatusResponse {
    pub fn build(
        category: MaintenanceCategory,
        last_change: Option<f64>,
        status: &CategoryStatus,
    ) -> Self {
        Self {
            category,
            percentage: status.percentage,
            color: status.color().to_string(),
            label: status.label().to_string(),
            remaining: status.remaining,
            interval: category.interval(),
            last_change,
            next_due: last_change.map(|value| value + category.interval()),
        }
    }
}

/// Salud agregada del vehículo para badges y ordenación de la flota
#[derive(Debug, Serialize)]
pub struct VehicleHealthResponse {
    pub average_percentage: f64,
    pub has_critical: bool,
    pub color: String,
}

impl From<VehicleHealth> for VehicleHealthResponse {
    fn from(health: VehicleHealth) -> Self {
        Self {
            average_percentage: health.average_percentage,
            has_critical: health.has_critical,
            color: health.color().to_string(),
        }
    }
}

/// Respuesta completa del endpoint de estado: las 8 categorías en orden
/// canónico más el agregado
#[derive(Debug, Serialize)]
pub struct MaintenanceStatusResponse {
    pub vehicle_id: Uuid,
    pub mileage: f64,
    pub categories: Vec<CategoryStatusResponse>,
    pub health: VehicleHealthResponse,
}

impl MaintenanceStatusResponse {
    pub fn build(
        vehicle: &Vehicle,
        statuses: &[CategoryStatus; 8],
        health: VehicleHealth,
    ) -> Self {
        let log = vehicle.maintenance_log();
        let categories = MaintenanceCategory::ALL
            .iter()
            .zip(statuses.iter())
            .map(|(category, status)| {
                CategoryStatusResponse::build(*category, log.last_change(*category), status)
            })
            .collect();

        Self {
            vehicle_id: vehicle.id,
            mileage: vehicle.mileage,
            categories,
            health: health.into(),
        }
    }
}
