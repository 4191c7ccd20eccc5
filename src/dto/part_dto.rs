//! DTOs de Part
//!
//! Requests con validación y responses del inventario de repuestos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::part::Part;

// Request para crear una pieza
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePartRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,

    pub price: Option<Decimal>,

    pub location: Option<String>,

    pub compatible_vehicles: Option<Vec<String>>,
}

// Request para actualizar una pieza
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePartRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,

    pub price: Option<Decimal>,

    pub location: Option<String>,

    pub compatible_vehicles: Option<Vec<String>>,
}

// Response de pieza
#[derive(Debug, Serialize)]
pub struct PartResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub price: Decimal,
    pub location: Option<String>,
    pub compatible_vehicles: Vec<String>,
    pub low_stock: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Part> for PartResponse {
    fn from(part: Part) -> Self {
        let low_stock = part.is_low_stock();
        Self {
            id: part.id,
            name: part.name,
            description: part.description,
            quantity: part.quantity,
            min_quantity: part.min_quantity,
            price: part.price,
            location: part.location,
            compatible_vehicles: part.compatible_vehicles.0,
            low_stock,
            created_at: part.created_at,
        }
    }
}
