//! Modelo de historial de posiciones
//!
//! Cada paquete de tracker aceptado deja un punto en `location_history`;
//! el kilometraje diario se acumula midiendo entre puntos consecutivos.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Punto de la traza de un vehículo - mapea a la tabla location_history
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LocationPoint {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub lat: f64,
    pub lng: f64,
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}
