use uuid::Uuid;
use validator::Validate;

use crate::dto::status_dto::MaintenanceStatusResponse;
use crate::dto::vehicle_dto::{
    ControlActionRequest, CreateVehicleRequest, UpdateMaintenanceRequest, UpdateVehicleRequest,
    VehicleListResponse, VehicleResponse,
};
use crate::dto::ApiResponse;
use crate::models::maintenance::MaintenanceCategory;
use crate::models::vehicle::{Vehicle, STATUS_DISABLED, STATUS_ONLINE};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::editor_service::MaintenanceEditor;
use crate::services::maintenance_service;
use crate::services::tracking_service;
use crate::utils::errors::AppError;
use sqlx::PgPool;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let device_id = tracking_service::normalize_device_id(&request.device_id);

        // Verificar que el device id no esté ya registrado
        if self.repository.device_id_exists(&device_id).await? {
            return Err(AppError::Conflict(
                "A vehicle with this device id is already registered".to_string(),
            ));
        }

        let vehicle = self
            .repository
            .create(
                device_id,
                request.name,
                request.year,
                request.plate_number,
                request.driver_name,
                request.mileage.unwrap_or(0.0),
            )
            .await?;

        log::info!("🚐 Vehicle registered: {} ({})", vehicle.name, vehicle.device_id);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehicle created successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self.find_vehicle(id).await?;
        Ok(VehicleResponse::from(vehicle))
    }

    /// Listado de flota con la salud agregada embebida para los badges
    pub async fn list(&self) -> Result<Vec<VehicleListResponse>, AppError> {
        let vehicles = self.repository.find_all().await?;

        let response = vehicles
            .into_iter()
            .map(|vehicle| {
                let (_, health) =
                    maintenance_service::evaluate(&vehicle.maintenance_log(), vehicle.mileage);
                VehicleListResponse::build(vehicle, health.into())
            })
            .collect();

        Ok(response)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self
            .repository
            .update(
                id,
                request.name,
                request.year,
                request.plate_number,
                request.driver_name,
                request.mileage,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            "Vehicle updated successfully".to_string(),
        ))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id).await?;
        Ok(())
    }

    /// Salida completa del motor de mantenimiento para un vehículo
    pub async fn status(&self, id: Uuid) -> Result<MaintenanceStatusResponse, AppError> {
        let vehicle = self.find_vehicle(id).await?;

        let (statuses, health) =
            maintenance_service::evaluate(&vehicle.maintenance_log(), vehicle.mileage);

        Ok(MaintenanceStatusResponse::build(&vehicle, &statuses, health))
    }

    /// Registrar lecturas de servicio. La edición pasa por la sesión de dos
    /// estados: snapshot al entrar, commit del borrador al persistir.
    pub async fn update_maintenance(
        &self,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        let vehicle = self.find_vehicle(id).await?;

        let mut editor = MaintenanceEditor::new(vehicle.maintenance_log());
        editor.enter_edit();
        for category in MaintenanceCategory::ALL {
            if let Some(reading) = request.reading(category) {
                editor.set_last_change(category, Some(reading));
            }
        }
        let log = editor.commit();

        let updated = self.repository.update_maintenance_log(id, &log).await?;

        log::info!("🔧 Maintenance log updated for {}", updated.name);

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(updated),
            "Maintenance log updated successfully".to_string(),
        ))
    }

    /// Acción de control enable/disable sobre un vehículo
    pub async fn control(
        &self,
        id: Uuid,
        request: ControlActionRequest,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        // El vehículo tiene que existir antes de tocar el estado
        self.find_vehicle(id).await?;

        let status = match request.action.as_str() {
            "enable" => STATUS_ONLINE,
            "disable" => STATUS_DISABLED,
            other => {
                return Err(AppError::BadRequest(format!("Invalid action: {}", other)));
            }
        };

        let vehicle = self.repository.set_status(id, status).await?;

        Ok(ApiResponse::success_with_message(
            VehicleResponse::from(vehicle),
            format!("Vehicle status set to {}", status),
        ))
    }

    /// Puesta a cero del kilometraje diario de toda la flota
    pub async fn reset_daily_mileage(&self) -> Result<u64, AppError> {
        let updated = self.repository.reset_daily_mileage().await?;
        log::info!("🔄 Daily mileage reset for {} vehicles", updated);
        Ok(updated)
    }

    async fn find_vehicle(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))
    }
}
