use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::part_dto::{CreatePartRequest, PartResponse, UpdatePartRequest};
use crate::dto::ApiResponse;
use crate::repositories::part_repository::PartRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct PartController {
    repository: PartRepository,
}

impl PartController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate()?;

        let part = self
            .repository
            .create(
                request.name,
                request.description,
                request.quantity.unwrap_or(1),
                request.min_quantity.unwrap_or(1),
                request.price.unwrap_or(Decimal::ZERO),
                request.location,
                request.compatible_vehicles.unwrap_or_default(),
            )
            .await?;

        log::info!("📦 Part added to inventory: {}", part.name);

        Ok(ApiResponse::success_with_message(
            PartResponse::from(part),
            "Part created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<PartResponse, AppError> {
        let part = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Part", &id.to_string()))?;

        Ok(PartResponse::from(part))
    }

    pub async fn list(&self) -> Result<Vec<PartResponse>, AppError> {
        let parts = self.repository.find_all().await?;
        Ok(parts.into_iter().map(PartResponse::from).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdatePartRequest,
    ) -> Result<ApiResponse<PartResponse>, AppError> {
        request.validate()?;

        let part = self
            .repository
            .update(
                id,
                request.name,
                request.description,
                request.quantity,
                request.min_quantity,
                request.price,
                request.location,
                request.compatible_vehicles,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            PartResponse::from(part),
            "Part updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        Ok(())
    }
}
