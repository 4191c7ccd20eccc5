//! DTOs de tracking GPS
//!
//! Request del endpoint JSON de telemetría y puntos de traza para el mapa.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::LocationPoint;

// Posición reportada por un tracker vía JSON
#[derive(Debug, Deserialize)]
pub struct GpsUpdateRequest {
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
}

// Punto de traza para pintar el recorrido en el mapa
#[derive(Debug, Serialize)]
pub struct TrackPointResponse {
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl From<LocationPoint> for TrackPointResponse {
    fn from(point: LocationPoint) -> Self {
        Self {
            lat: point.lat,
            lng: point.lng,
            speed: point.speed,
            timestamp: point.timestamp,
        }
    }
}
