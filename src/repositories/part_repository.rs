//! Repositorio de repuestos
//!
//! Acceso a la tabla `parts` con el API runtime de sqlx.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::part::Part;
use crate::utils::errors::AppError;

pub struct PartRepository {
    pool: PgPool,
}

impl PartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        quantity: i32,
        min_quantity: i32,
        price: Decimal,
        location: Option<String>,
        compatible_vehicles: Vec<String>,
    ) -> Result<Part, AppError> {
        let part = sqlx::query_as::<_, Part>(
            r#"
            INSERT INTO parts (id, name, description, quantity, min_quantity, price, location, compatible_vehicles, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .bind(quantity)
        .bind(min_quantity)
        .bind(price)
        .bind(location)
        .bind(Json(compatible_vehicles))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Part>, AppError> {
        let part = sqlx::query_as::<_, Part>("SELECT * FROM parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(part)
    }

    pub async fn find_all(&self) -> Result<Vec<Part>, AppError> {
        let parts = sqlx::query_as::<_, Part>("SELECT * FROM parts ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(parts)
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
        quantity: Option<i32>,
        min_quantity: Option<i32>,
        price: Option<Decimal>,
        location: Option<String>,
        compatible_vehicles: Option<Vec<String>>,
    ) -> Result<Part, AppError> {
        // Obtener pieza actual para mezclar los campos ausentes
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Part not found".to_string()))?;

        let part = sqlx::query_as::<_, Part>(
            r#"
            UPDATE parts
            SET name = $2, description = $3, quantity = $4, min_quantity = $5, price = $6, location = $7, compatible_vehicles = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name.unwrap_or(current.name))
        .bind(description.or(current.description))
        .bind(quantity.unwrap_or(current.quantity))
        .bind(min_quantity.unwrap_or(current.min_quantity))
        .bind(price.unwrap_or(current.price))
        .bind(location.or(current.location))
        .bind(Json(compatible_vehicles.unwrap_or(current.compatible_vehicles.0)))
        .fetch_one(&self.pool)
        .await?;

        Ok(part)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Part not found".to_string()));
        }

        Ok(())
    }
}
