//! DTOs de Vehicle
//!
//! Requests con validación y responses del recurso vehículo. Las columnas
//! `next_<categoría>_change` del backend antiguo eran redundantes; aquí se
//! derivan del último servicio más el intervalo fijo de la categoría.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::status_dto::VehicleHealthResponse;
use crate::models::maintenance::{MaintenanceCategory, MaintenanceLog};
use crate::models::vehicle::Vehicle;

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "crate::utils::validation::validate_device_id")]
    pub device_id: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_plate_number")]
    pub plate_number: String,

    pub driver_name: Option<String>,

    #[validate(range(min = 0.0))]
    pub mileage: Option<f64>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(range(min = 1950, max = 2030))]
    pub year: Option<i32>,

    #[validate(custom = "crate::utils::validation::validate_plate_number")]
    pub plate_number: Option<String>,

    pub driver_name: Option<String>,

    #[validate(range(min = 0.0))]
    pub mileage: Option<f64>,
}

// Request para registrar lecturas de servicio - campos ausentes quedan intactos
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMaintenanceRequest {
    #[validate(range(min = 0.0))]
    pub oil: Option<f64>,
    #[validate(range(min = 0.0))]
    pub brakes: Option<f64>,
    #[validate(range(min = 0.0))]
    pub timing_belt: Option<f64>,
    #[validate(range(min = 0.0))]
    pub filter: Option<f64>,
    #[validate(range(min = 0.0))]
    pub clutch: Option<f64>,
    #[validate(range(min = 0.0))]
    pub battery: Option<f64>,
    #[validate(range(min = 0.0))]
    pub tires: Option<f64>,
    #[validate(range(min = 0.0))]
    pub shock_absorbers: Option<f64>,
}

impl UpdateMaintenanceRequest {
    /// Lectura nueva para una categoría, si la request la trae
    pub fn reading(&self, category: MaintenanceCategory) -> Option<f64> {
        match category {
            MaintenanceCategory::Oil => self.oil,
            MaintenanceCategory::Brakes => self.brakes,
            MaintenanceCategory::TimingBelt => self.timing_belt,
            MaintenanceCategory::Filter => self.filter,
            MaintenanceCategory::Clutch => self.clutch,
            MaintenanceCategory::Battery => self.battery,
            MaintenanceCategory::Tires => self.tires,
            MaintenanceCategory::ShockAbsorbers => self.shock_absorbers,
        }
    }
}

// Request para habilitar/deshabilitar un vehículo
#[derive(Debug, Deserialize)]
pub struct ControlActionRequest {
    pub action: String,
}

// Response de vehículo - contrato plano del backend original, con los
// next_* derivados
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: Uuid,
    pub device_id: String,
    pub name: String,
    pub year: Option<i32>,
    pub plate_number: String,
    pub driver_name: Option<String>,
    pub status: String,
    pub speed: f64,
    pub mileage: f64,
    pub daily_mileage: f64,
    pub current_location_lat: Option<f64>,
    pub current_location_lng: Option<f64>,
    pub last_update: Option<DateTime<Utc>>,
    pub last_oil_change: Option<f64>,
    pub next_oil_change: Option<f64>,
    pub last_brake_change: Option<f64>,
    pub next_brake_change: Option<f64>,
    pub last_timing_belt_change: Option<f64>,
    pub next_timing_belt_change: Option<f64>,
    pub last_filter_change: Option<f64>,
    pub next_filter_change: Option<f64>,
    pub last_clutch_change: Option<f64>,
    pub next_clutch_change: Option<f64>,
    pub last_battery_change: Option<f64>,
    pub next_battery_change: Option<f64>,
    pub last_tires_change: Option<f64>,
    pub next_tires_change: Option<f64>,
    pub last_shock_absorbers_change: Option<f64>,
    pub next_shock_absorbers_change: Option<f64>,
    pub created_at: DateTime<Utc>,
}

fn next_due(log: &MaintenanceLog, category: MaintenanceCategory) -> Option<f64> {
    log.last_change(category).map(|value| value + category.interval())
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        let log = vehicle.maintenance_log();
        Self {
            id: vehicle.id,
            device_id: vehicle.device_id,
            name: vehicle.name,
            year: vehicle.year,
            plate_number: vehicle.plate_number,
            driver_name: vehicle.driver_name,
            status: vehicle.status,
            speed: vehicle.speed,
            mileage: vehicle.mileage,
            daily_mileage: vehicle.daily_mileage,
            current_location_lat: vehicle.current_location_lat,
            current_location_lng: vehicle.current_location_lng,
            last_update: vehicle.last_update,
            last_oil_change: log.oil,
            next_oil_change: next_due(&log, MaintenanceCategory::Oil),
            last_brake_change: log.brakes,
            next_brake_change: next_due(&log, MaintenanceCategory::Brakes),
            last_timing_belt_change: log.timing_belt,
            next_timing_belt_change: next_due(&log, MaintenanceCategory::TimingBelt),
            last_filter_change: log.filter,
            next_filter_change: next_due(&log, MaintenanceCategory::Filter),
            last_clutch_change: log.clutch,
            next_clutch_change: next_due(&log, MaintenanceCategory::Clutch),
            last_battery_change: log.battery,
            next_battery_change: next_due(&log, MaintenanceCategory::Battery),
            last_tires_change: log.tires,
            next_tires_change: next_due(&log, MaintenanceCategory::Tires),
            last_shock_absorbers_change: log.shock_absorbers,
            next_shock_absorbers_change: next_due(&log, MaintenanceCategory::ShockAbsorbers),
            created_at: vehicle.created_at,
        }
    }
}

// Response para listados de flota: resumen + salud agregada para badges
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub id: Uuid,
    pub device_id: String,
    pub name: String,
    pub plate_number: String,
    pub driver_name: Option<String>,
    pub status: String,
    pub speed: f64,
    pub mileage: f64,
    pub daily_mileage: f64,
    pub current_location_lat: Option<f64>,
    pub current_location_lng: Option<f64>,
    pub last_update: Option<DateTime<Utc>>,
    pub health: VehicleHealthResponse,
}

impl VehicleListResponse {
    pub fn build(vehicle: Vehicle, health: VehicleHealthResponse) -> Self {
        Self {
            id: vehicle.id,
            device_id: vehicle.device_id,
            name: vehicle.name,
            plate_number: vehicle.plate_number,
            driver_name: vehicle.driver_name,
            status: vehicle.status,
            speed: vehicle.speed,
            mileage: vehicle.mileage,
            daily_mileage: vehicle.daily_mileage,
            current_location_lat: vehicle.current_location_lat,
            current_location_lng: vehicle.current_location_lng,
            last_update: vehicle.last_update,
            health,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::vehicle::STATUS_OFFLINE;

    #[test]
    fn test_response_derives_next_due_from_interval() {
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            device_id: "tracker01".to_string(),
            name: "Crafter 2".to_string(),
            year: None,
            plate_number: "XX-999-YY".to_string(),
            driver_name: None,
            status: STATUS_OFFLINE.to_string(),
            speed: 0.0,
            mileage: 61_000.0,
            daily_mileage: 0.0,
            current_location_lat: None,
            current_location_lng: None,
            last_update: None,
            last_oil_change: Some(58_000.0),
            last_brake_change: None,
            last_timing_belt_change: Some(30_000.0),
            last_filter_change: None,
            last_clutch_change: None,
            last_battery_change: None,
            last_tires_change: None,
            last_shock_absorbers_change: None,
            created_at: Utc::now(),
        };

        let response = VehicleResponse::from(vehicle);
        assert_eq!(response.next_oil_change, Some(68_000.0));
        assert_eq!(response.next_timing_belt_change, Some(90_000.0));
        assert_eq!(response.next_brake_change, None);
    }
}
