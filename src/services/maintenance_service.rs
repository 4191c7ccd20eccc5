//! Motor de estado de mantenimiento
//!
//! Este módulo calcula, a partir del kilometraje actual de un vehículo y de
//! su registro de servicio, el estado por categoría (porcentaje de vida
//! restante, tier de severidad, kilómetros hasta el próximo servicio) y el
//! estado agregado de salud usado por el dashboard de flota.
//!
//! Las funciones son puras y deterministas: sin I/O, sin estado compartido,
//! se recalculan en cada request con el snapshot más reciente.

use crate::models::maintenance::{
    CategoryStatus, MaintenanceCategory, MaintenanceLog, Severity, VehicleHealth,
};

/// Umbrales de severidad sobre el porcentaje de vida restante, evaluados en
/// orden con `<=`: primero el que aplica gana
pub const CRITICAL_THRESHOLD: f64 = 25.0;
pub const WARNING_THRESHOLD: f64 = 50.0;
pub const ATTENTION_THRESHOLD: f64 = 75.0;

/// Bucket de severidad para un porcentaje ya calculado.
/// Los límites son inclusivos: 25.0 exacto todavía es crítico.
pub fn severity_for(percentage: f64) -> Severity {
    if percentage <= CRITICAL_THRESHOLD {
        Severity::Critical
    } else if percentage <= WARNING_THRESHOLD {
        Severity::Warning
    } else if percentage <= ATTENTION_THRESHOLD {
        Severity::Attention
    } else {
        Severity::Good
    }
}

/// Estado de una categoría a partir del último servicio registrado.
///
/// `last_change == None` produce el estado "No data": no es un error, los
/// vehículos recién dados de alta no tienen historial y el dashboard debe
/// seguir renderizando. Un odómetro inconsistente (`current_mileage <
/// last_change`) satura el porcentaje en 100, tampoco es un error: la
/// telemetría de odómetro es ruidosa.
pub fn category_status(
    last_change: Option<f64>,
    interval: f64,
    current_mileage: f64,
) -> CategoryStatus {
    let last_change = match last_change {
        Some(value) => value,
        None => {
            return CategoryStatus {
                percentage: 0.0,
                severity: Severity::NoData,
                remaining: 0.0,
            };
        }
    };

    let distance_since_change = current_mileage - last_change;
    let remaining_distance = interval - distance_since_change;
    let percentage = (remaining_distance / interval * 100.0).clamp(0.0, 100.0);

    CategoryStatus {
        percentage,
        severity: severity_for(percentage),
        remaining: remaining_distance.max(0.0),
    }
}

/// Estado de las 8 categorías en el orden canónico de `MaintenanceCategory::ALL`
pub fn category_statuses(log: &MaintenanceLog, current_mileage: f64) -> [CategoryStatus; 8] {
    MaintenanceCategory::ALL
        .map(|category| category_status(log.last_change(category), category.interval(), current_mileage))
}

/// Salud agregada del vehículo sobre el conjunto fijo de 8 categorías.
///
/// El promedio divide siempre entre 8: una categoría sin datos aporta su 0%
/// y arrastra el promedio hacia abajo en vez de quedar excluida de la media.
/// `has_critical` en cambio solo se activa con un ≤25% calculado de datos
/// reales de servicio, nunca por la ausencia de historial.
pub fn vehicle_health(statuses: &[CategoryStatus; 8]) -> VehicleHealth {
    let total: f64 = statuses.iter().map(|status| status.percentage).sum();
    let average_percentage = total / statuses.len() as f64;

    let has_critical = statuses
        .iter()
        .any(|status| status.severity != Severity::NoData && status.percentage <= CRITICAL_THRESHOLD);

    VehicleHealth {
        average_percentage,
        has_critical,
        severity: severity_for(average_percentage),
    }
}

/// Conveniencia para los handlers: estados por categoría + agregado en una pasada
pub fn evaluate(log: &MaintenanceLog, current_mileage: f64) -> ([CategoryStatus; 8], VehicleHealth) {
    let statuses = category_statuses(log, current_mileage);
    let health = vehicle_health(&statuses);
    (statuses, health)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_service_is_full_life() {
        // lastChange == currentMileage: 100%, remaining == interval, Good
        for category in MaintenanceCategory::ALL {
            let status = category_status(Some(42_000.0), category.interval(), 42_000.0);
            assert_eq!(status.percentage, 100.0);
            assert_eq!(status.remaining, category.interval());
            assert_eq!(status.severity, Severity::Good);
        }
    }

    #[test]
    fn test_exactly_due_is_critical_zero() {
        // currentMileage - lastChange == interval: 0%, remaining 0, Critical
        let status = category_status(Some(10_000.0), 10_000.0, 20_000.0);
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.remaining, 0.0);
        assert_eq!(status.severity, Severity::Critical);
    }

    #[test]
    fn test_overdue_clamps_to_zero() {
        let status = category_status(Some(0.0), 10_000.0, 35_000.0);
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.remaining, 0.0);
        assert_eq!(status.severity, Severity::Critical);
    }

    #[test]
    fn test_no_data_is_fixed_output() {
        // None produce exactamente el estado "No data" sin importar el resto
        for mileage in [0.0, 5_000.0, 250_000.0] {
            let status = category_status(None, 60_000.0, mileage);
            assert_eq!(status.percentage, 0.0);
            assert_eq!(status.remaining, 0.0);
            assert_eq!(status.severity, Severity::NoData);
            assert_eq!(status.label(), "No data");
            assert_eq!(status.color(), "rgb(75, 85, 99)");
        }
    }

    #[test]
    fn test_odometer_rollback_clamps_to_full() {
        // lastChange > currentMileage: dato inconsistente, se trata como fresco
        let status = category_status(Some(10_000.0), 10_000.0, 8_000.0);
        assert_eq!(status.percentage, 100.0);
        assert_eq!(status.severity, Severity::Good);
        // remaining conserva la distancia real calculada, solo se acota por abajo
        assert_eq!(status.remaining, 12_000.0);
    }

    #[test]
    fn test_idempotence() {
        let a = category_status(Some(7_321.0), 15_000.0, 19_876.5);
        let b = category_status(Some(7_321.0), 15_000.0, 19_876.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_percentage_monotonically_non_increasing_in_mileage() {
        let mut previous = f64::INFINITY;
        let mut mileage = 5_000.0;
        while mileage <= 25_000.0 {
            let status = category_status(Some(5_000.0), 10_000.0, mileage);
            assert!(
                status.percentage <= previous,
                "percentage subió de {} a {} en mileage {}",
                previous,
                status.percentage,
                mileage
            );
            previous = status.percentage;
            mileage += 137.0;
        }
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(severity_for(25.0), Severity::Critical);
        assert_eq!(severity_for(25.0001), Severity::Warning);
        assert_eq!(severity_for(50.0), Severity::Warning);
        assert_eq!(severity_for(50.0001), Severity::Attention);
        assert_eq!(severity_for(75.0), Severity::Attention);
        assert_eq!(severity_for(75.0001), Severity::Good);
        assert_eq!(severity_for(100.0), Severity::Good);
        assert_eq!(severity_for(0.0), Severity::Critical);
    }

    #[test]
    fn test_boundary_reached_through_engine() {
        // interval 10000, 7500 km recorridos desde el servicio: 25.0% exacto
        let status = category_status(Some(0.0), 10_000.0, 7_500.0);
        assert_eq!(status.percentage, 25.0);
        assert_eq!(status.severity, Severity::Critical);
    }

    #[test]
    fn test_scenario_half_worn_oil_is_warning() {
        // interval=10000, lastChange=5000, mileage=12000:
        // 7000 recorridos, remaining 3000, 30% -> Warning (30 > 25, <= 50)
        let status = category_status(Some(5_000.0), 10_000.0, 12_000.0);
        assert_eq!(status.remaining, 3_000.0);
        assert_eq!(status.percentage, 30.0);
        assert_eq!(status.severity, Severity::Warning);
    }

    #[test]
    fn test_scenario_brakes_due_at_interval_from_zero() {
        // Un servicio registrado en el odómetro 0 es dato válido, no "No data"
        let status = category_status(
            Some(0.0),
            MaintenanceCategory::Brakes.interval(),
            20_000.0,
        );
        assert_eq!(status.percentage, 0.0);
        assert_eq!(status.remaining, 0.0);
        assert_eq!(status.severity, Severity::Critical);

        let log = MaintenanceLog {
            brakes: Some(0.0),
            ..Default::default()
        };
        let (_, health) = evaluate(&log, 20_000.0);
        assert!(health.has_critical);
    }

    #[test]
    fn test_aggregate_average_divides_by_eight() {
        // 4 categorías al 100% y 4 sin datos: promedio 50, color Warning
        let log = MaintenanceLog {
            oil: Some(30_000.0),
            brakes: Some(30_000.0),
            timing_belt: Some(30_000.0),
            filter: Some(30_000.0),
            ..Default::default()
        };
        let (statuses, health) = evaluate(&log, 30_000.0);

        assert_eq!(health.average_percentage, 50.0);
        assert_eq!(health.severity, Severity::Warning);
        assert_eq!(health.color(), "rgb(249, 115, 22)");
        // los ceros provienen de "No data", no de un ≤25% calculado
        assert!(!health.has_critical);
        assert_eq!(
            statuses.iter().filter(|s| s.severity == Severity::NoData).count(),
            4
        );
    }

    #[test]
    fn test_aggregate_flags_real_critical_category() {
        let log = MaintenanceLog {
            oil: Some(0.0),
            brakes: Some(38_000.0),
            timing_belt: Some(38_000.0),
            filter: Some(38_000.0),
            clutch: Some(38_000.0),
            battery: Some(38_000.0),
            tires: Some(38_000.0),
            shock_absorbers: Some(38_000.0),
        };
        // aceite con 38000 km desde el servicio: muy vencido
        let (statuses, health) = evaluate(&log, 38_000.0);
        assert_eq!(statuses[0].percentage, 0.0);
        assert!(health.has_critical);
    }

    #[test]
    fn test_aggregate_never_resolves_to_no_data() {
        let (_, health) = evaluate(&MaintenanceLog::default(), 120_000.0);
        assert_eq!(health.average_percentage, 0.0);
        assert_eq!(health.severity, Severity::Critical);
        assert!(!health.has_critical);
    }

    #[test]
    fn test_aggregate_all_fresh_is_green() {
        let log = MaintenanceLog {
            oil: Some(50_000.0),
            brakes: Some(50_000.0),
            timing_belt: Some(50_000.0),
            filter: Some(50_000.0),
            clutch: Some(50_000.0),
            battery: Some(50_000.0),
            tires: Some(50_000.0),
            shock_absorbers: Some(50_000.0),
        };
        let (_, health) = evaluate(&log, 50_000.0);
        assert_eq!(health.average_percentage, 100.0);
        assert_eq!(health.severity, Severity::Good);
        assert!(!health.has_critical);
    }
}
