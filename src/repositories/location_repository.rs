//! Repositorio del historial de posiciones
//!
//! Acceso a la tabla `location_history`: inserción de puntos de traza y
//! consulta del último punto del día para acumular kilometraje.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::location::LocationPoint;
use crate::utils::errors::AppError;

pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        vehicle_id: Uuid,
        lat: f64,
        lng: f64,
        speed: Option<f64>,
        timestamp: DateTime<Utc>,
    ) -> Result<LocationPoint, AppError> {
        let point = sqlx::query_as::<_, LocationPoint>(
            r#"
            INSERT INTO location_history (id, vehicle_id, lat, lng, speed, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(lat)
        .bind(lng)
        .bind(speed)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(point)
    }

    /// Último punto registrado de un vehículo desde un instante dado
    pub async fn last_point_since(
        &self,
        vehicle_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Option<LocationPoint>, AppError> {
        let point = sqlx::query_as::<_, LocationPoint>(
            r#"
            SELECT * FROM location_history
            WHERE vehicle_id = $1 AND timestamp >= $2
            ORDER BY timestamp DESC
            LIMIT 1
            "#,
        )
        .bind(vehicle_id)
        .bind(since)
        .fetch_optional(&self.pool)
        .await?;

        Ok(point)
    }

    /// Puntos recientes de la traza, del más nuevo al más viejo
    pub async fn recent_points(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<LocationPoint>, AppError> {
        let points = sqlx::query_as::<_, LocationPoint>(
            r#"
            SELECT * FROM location_history
            WHERE vehicle_id = $1
            ORDER BY timestamp DESC
            LIMIT $2
            "#,
        )
        .bind(vehicle_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }
}
