//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle que mapea exactamente a la tabla
//! `vehicles` del schema, incluidas las 8 columnas `last_<categoría>_change`
//! que alimentan el motor de mantenimiento.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceLog;

/// Estados operativos de un vehículo tal como los reporta el tracking
pub const STATUS_OFFLINE: &str = "offline";
pub const STATUS_ONLINE: &str = "online";
pub const STATUS_DISABLED: &str = "disabled";

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
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
    pub last_brake_change: Option<f64>,
    pub last_timing_belt_change: Option<f64>,
    pub last_filter_change: Option<f64>,
    pub last_clutch_change: Option<f64>,
    pub last_battery_change: Option<f64>,
    pub last_tires_change: Option<f64>,
    pub last_shock_absorbers_change: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Snapshot del registro de servicio para el motor de mantenimiento
    pub fn maintenance_log(&self) -> MaintenanceLog {
        MaintenanceLog {
            oil: self.last_oil_change,
            brakes: self.last_brake_change,
            timing_belt: self.last_timing_belt_change,
            filter: self.last_filter_change,
            clutch: self.last_clutch_change,
            battery: self.last_battery_change,
            tires: self.last_tires_change,
            shock_absorbers: self.last_shock_absorbers_change,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.status == STATUS_DISABLED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vehicle() -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            device_id: "tracker01".to_string(),
            name: "Sprinter 1".to_string(),
            year: Some(2019),
            plate_number: "AB-123-CD".to_string(),
            driver_name: Some("K. Fischer".to_string()),
            status: STATUS_OFFLINE.to_string(),
            speed: 0.0,
            mileage: 48_000.0,
            daily_mileage: 0.0,
            current_location_lat: None,
            current_location_lng: None,
            last_update: None,
            last_oil_change: Some(45_000.0),
            last_brake_change: None,
            last_timing_belt_change: None,
            last_filter_change: Some(40_000.0),
            last_clutch_change: None,
            last_battery_change: None,
            last_tires_change: None,
            last_shock_absorbers_change: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_maintenance_log_maps_columns() {
        let vehicle = sample_vehicle();
        let log = vehicle.maintenance_log();
        assert_eq!(log.oil, Some(45_000.0));
        assert_eq!(log.filter, Some(40_000.0));
        assert_eq!(log.brakes, None);
        assert_eq!(log.shock_absorbers, None);
    }

    #[test]
    fn test_disabled_flag() {
        let mut vehicle = sample_vehicle();
        assert!(!vehicle.is_disabled());
        vehicle.status = STATUS_DISABLED.to_string();
        assert!(vehicle.is_disabled());
    }
}
