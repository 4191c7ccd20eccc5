use chrono::{NaiveTime, TimeZone, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::tracking_dto::{GpsUpdateRequest, TrackPointResponse};
use crate::repositories::location_repository::LocationRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::tracking_service::{self, TrackerFrame};
use crate::utils::errors::AppError;
use crate::utils::validation::validate_coordinates;

pub struct TrackingController {
    vehicles: VehicleRepository,
    locations: LocationRepository,
}

impl TrackingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            locations: LocationRepository::new(pool),
        }
    }

    /// Posición reportada vía JSON; el timestamp es el de recepción
    pub async fn ingest_json(&self, request: GpsUpdateRequest) -> Result<(), AppError> {
        let frame = TrackerFrame {
            device_id: tracking_service::normalize_device_id(&request.device_id),
            latitude: request.latitude,
            longitude: request.longitude,
            speed: request.speed.unwrap_or(0.0),
            timestamp: Utc::now(),
        };

        self.ingest(frame).await
    }

    /// Paquete binario comprimido tal como lo emite el firmware del tracker
    pub async fn ingest_binary(&self, body: &[u8]) -> Result<(), AppError> {
        let frame = tracking_service::decode_frame(body)?;
        self.ingest(frame).await
    }

    async fn ingest(&self, frame: TrackerFrame) -> Result<(), AppError> {
        validate_coordinates(frame.latitude, frame.longitude)
            .map_err(|_| AppError::BadRequest("Coordinates out of range".to_string()))?;

        let vehicle = self
            .vehicles
            .find_by_device_id(&frame.device_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Vehicle not found: {}", frame.device_id))
            })?;

        // Último punto del día para medir la distancia recorrida
        let start_of_day = Utc.from_utc_datetime(
            &frame.timestamp.date_naive().and_time(NaiveTime::MIN),
        );
        let previous = self
            .locations
            .last_point_since(vehicle.id, start_of_day)
            .await?;

        // Todo paquete aceptado deja traza, también para vehículos deshabilitados
        self.locations
            .insert(
                vehicle.id,
                frame.latitude,
                frame.longitude,
                Some(frame.speed),
                frame.timestamp,
            )
            .await?;

        if vehicle.is_disabled() {
            log::info!(
                "🚫 {} is disabled, position logged without mileage accrual",
                vehicle.name
            );
            return Ok(());
        }

        let distance = previous
            .map(|point| {
                tracking_service::haversine_distance(
                    point.lat,
                    point.lng,
                    frame.latitude,
                    frame.longitude,
                )
            })
            .unwrap_or(0.0);

        self.vehicles
            .apply_position_update(
                vehicle.id,
                frame.latitude,
                frame.longitude,
                frame.speed,
                frame.timestamp,
                vehicle.mileage + distance,
                vehicle.daily_mileage + distance,
            )
            .await?;

        log::info!(
            "📍 {} at ({:.5}, {:.5}), {:.1} km/h, +{:.3} km",
            vehicle.name,
            frame.latitude,
            frame.longitude,
            frame.speed,
            distance
        );

        Ok(())
    }

    /// Traza reciente de un vehículo para pintar el recorrido en el mapa
    pub async fn track(
        &self,
        vehicle_id: Uuid,
        limit: i64,
    ) -> Result<Vec<TrackPointResponse>, AppError> {
        // El vehículo tiene que existir para distinguir 404 de traza vacía
        self.vehicles
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehicle not found".to_string()))?;

        let points = self.locations.recent_points(vehicle_id, limit).await?;
        Ok(points.into_iter().map(TrackPointResponse::from).collect())
    }
}
