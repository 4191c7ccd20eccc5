//! Modelo de Part
//!
//! Inventario de repuestos: cada pieza lleva stock, stock mínimo, precio y la
//! lista de device ids de los vehículos compatibles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Part principal - mapea exactamente a la tabla parts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Part {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub compatible_vehicles: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl Part {
    /// Una pieza está bajo mínimos cuando el stock cae al umbral configurado
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_stock_threshold_is_inclusive() {
        let mut part = Part {
            id: Uuid::new_v4(),
            name: "Bremsscheibe".to_string(),
            description: None,
            quantity: 3,
            min_quantity: 2,
            price: Decimal::new(12_950, 2),
            location: Some("Regal B2".to_string()),
            compatible_vehicles: Json(vec!["tracker01".to_string()]),
            created_at: Utc::now(),
        };
        assert!(!part.is_low_stock());
        part.quantity = 2;
        assert!(part.is_low_stock());
        part.quantity = 0;
        assert!(part.is_low_stock());
    }
}
