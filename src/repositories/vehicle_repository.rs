//! Repositorio de vehículos
//!
//! Acceso a la tabla `vehicles` con el API runtime de sqlx.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceLog;
use crate::models::vehicle::{Vehicle, STATUS_OFFLINE};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        device_id: String,
        name: String,
        year: Option<i32>,
        plate_number: String,
        driver_name: Option<String>,
        mileage: f64,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, device_id, name, year, plate_number, driver_name, status, speed, mileage, daily_mileage, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, 0, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(device_id)
        .bind(name)
        .bind(year)
        .bind(plate_number)
        .bind(driver_name)
        .bind(STATUS_OFFLINE)
        .bind(mileage)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_by_device_id(&self, device_id: &str) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE device_id = $1")
            .bind(device_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles =
            sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(vehicles)
    }

    pub async fn device_id_exists(&self, device_id: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE device_id = $1)")
                .bind(device_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        year: Option<i32>,
        plate_number: Option<String>,
        driver_name: Option<String>,
        mileage: Option<f64>,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual para mezclar los campos ausentes
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET name = $2, year = $3, plate_number = $4, driver_name = $5, mileage = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(year.or(current.year))
        .bind(plate_number.unwrap_or(current.plate_number))
        .bind(driver_name.or(current.driver_name))
        .bind(mileage.unwrap_or(current.mileage))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Persistir el registro de servicio completo de un vehículo
    pub async fn update_maintenance_log(
        &self,
        id: Uuid,
        log: &MaintenanceLog,
    ) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET last_oil_change = $2,
                last_brake_change = $3,
                last_timing_belt_change = $4,
                last_filter_change = $5,
                last_clutch_change = $6,
                last_battery_change = $7,
                last_tires_change = $8,
                last_shock_absorbers_change = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(log.oil)
        .bind(log.brakes)
        .bind(log.timing_belt)
        .bind(log.filter)
        .bind(log.clutch)
        .bind(log.battery)
        .bind(log.tires)
        .bind(log.shock_absorbers)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            "UPDATE vehicles SET status = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// Aplicar un paquete de posición aceptado: coordenadas, velocidad,
    /// kilometrajes acumulados y marca de tiempo
    pub async fn apply_position_update(
        &self,
        id: Uuid,
        lat: f64,
        lng: f64,
        speed: f64,
        last_update: DateTime<Utc>,
        mileage: f64,
        daily_mileage: f64,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET current_location_lat = $2,
                current_location_lng = $3,
                speed = $4,
                last_update = $5,
                status = 'online',
                mileage = $6,
                daily_mileage = $7
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(lat)
        .bind(lng)
        .bind(speed)
        .bind(last_update)
        .bind(mileage)
        .bind(daily_mileage)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Poner a cero el kilometraje diario de toda la flota
    pub async fn reset_daily_mileage(&self) -> Result<u64, AppError> {
        let result = sqlx::query("UPDATE vehicles SET daily_mileage = 0")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehicle not found".to_string()));
        }

        Ok(())
    }
}
