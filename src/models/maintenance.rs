//! Modelo de mantenimiento
//!
//! Este módulo contiene el conjunto cerrado de categorías de mantenimiento,
//! sus intervalos de servicio fijos y los tipos de estado que produce el
//! motor de mantenimiento.

use serde::{Deserialize, Serialize};

/// Categoría de mantenimiento - conjunto cerrado, una variante por elemento
/// con intervalo de servicio propio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceCategory {
    Oil,
    Brakes,
    TimingBelt,
    Filter,
    Clutch,
    Battery,
    Tires,
    ShockAbsorbers,
}

impl MaintenanceCategory {
    /// Orden canónico de las 8 categorías
    pub const ALL: [MaintenanceCategory; 8] = [
        MaintenanceCategory::Oil,
        MaintenanceCategory::Brakes,
        MaintenanceCategory::TimingBelt,
        MaintenanceCategory::Filter,
        MaintenanceCategory::Clutch,
        MaintenanceCategory::Battery,
        MaintenanceCategory::Tires,
        MaintenanceCategory::ShockAbsorbers,
    ];

    /// Intervalo de servicio fijo en kilómetros, constante para toda la flota
    pub const fn interval(&self) -> f64 {
        match self {
            MaintenanceCategory::Oil => 10_000.0,
            MaintenanceCategory::Brakes => 20_000.0,
            MaintenanceCategory::TimingBelt => 60_000.0,
            MaintenanceCategory::Filter => 15_000.0,
            MaintenanceCategory::Clutch => 80_000.0,
            MaintenanceCategory::Battery => 40_000.0,
            MaintenanceCategory::Tires => 30_000.0,
            MaintenanceCategory::ShockAbsorbers => 50_000.0,
        }
    }

    /// Clave estable usada en la API y en las columnas `last_<key>_change`
    pub const fn key(&self) -> &'static str {
        match self {
            MaintenanceCategory::Oil => "oil",
            MaintenanceCategory::Brakes => "brakes",
            MaintenanceCategory::TimingBelt => "timing_belt",
            MaintenanceCategory::Filter => "filter",
            MaintenanceCategory::Clutch => "clutch",
            MaintenanceCategory::Battery => "battery",
            MaintenanceCategory::Tires => "tires",
            MaintenanceCategory::ShockAbsorbers => "shock_absorbers",
        }
    }
}

/// Severidad del estado de una categoría, de mejor a peor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Good,
    Attention,
    Warning,
    Critical,
    NoData,
}

impl Severity {
    /// Color de presentación estable por tier. Contrato con el dashboard:
    /// las barras de progreso y badges se pintan con estos valores exactos.
    pub const fn color(&self) -> &'static str {
        match self {
            Severity::Good => "rgb(34, 197, 94)",
            Severity::Attention => "rgb(234, 179, 8)",
            Severity::Warning => "rgb(249, 115, 22)",
            Severity::Critical => "rgb(239, 68, 68)",
            Severity::NoData => "rgb(75, 85, 99)",
        }
    }

    /// Etiqueta de presentación del tier
    pub const fn label(&self) -> &'static str {
        match self {
            Severity::Good => "Good",
            Severity::Attention => "Attention",
            Severity::Warning => "Warning",
            Severity::Critical => "Critical",
            Severity::NoData => "No data",
        }
    }
}

/// Registro de servicio de un vehículo: lectura del odómetro en el último
/// servicio de cada categoría, `None` = nunca servida o desconocida.
///
/// Un campo con nombre por categoría: una clave ausente o sobrante es
/// irrepresentable, el agregado siempre recibe las 8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceLog {
    pub oil: Option<f64>,
    pub brakes: Option<f64>,
    pub timing_belt: Option<f64>,
    pub filter: Option<f64>,
    pub clutch: Option<f64>,
    pub battery: Option<f64>,
    pub tires: Option<f64>,
    pub shock_absorbers: Option<f64>,
}

impl MaintenanceLog {
    /// Lectura del último servicio de una categoría
    pub fn last_change(&self, category: MaintenanceCategory) -> Option<f64> {
        match category {
            MaintenanceCategory::Oil => self.oil,
            MaintenanceCategory::Brakes => self.brakes,
            MaintenanceCategory::TimingBelt => self.timing_belt,
            MaintenanceCategory::Filter => self.filter,
            MaintenanceCategory::Clutch => self.clutch,
            MaintenanceCategory::Battery => self.battery,
            MaintenanceCategory::Tires => self.tires,
            MaintenanceCategory::ShockAbsorbers => self.shock_absorbers,
        }
    }

    /// Registrar la lectura del último servicio de una categoría
    pub fn set_last_change(&mut self, category: MaintenanceCategory, value: Option<f64>) {
        match category {
            MaintenanceCategory::Oil => self.oil = value,
            MaintenanceCategory::Brakes => self.brakes = value,
            MaintenanceCategory::TimingBelt => self.timing_belt = value,
            MaintenanceCategory::Filter => self.filter = value,
            MaintenanceCategory::Clutch => self.clutch = value,
            MaintenanceCategory::Battery => self.battery = value,
            MaintenanceCategory::Tires => self.tires = value,
            MaintenanceCategory::ShockAbsorbers => self.shock_absorbers = value,
        }
    }
}

/// Estado calculado de una categoría: fracción de vida restante normalizada,
/// tier de severidad y kilómetros hasta el próximo servicio
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryStatus {
    pub percentage: f64,
    pub severity: Severity,
    pub remaining: f64,
}

impl CategoryStatus {
    pub fn color(&self) -> &'static str {
        self.severity.color()
    }

    pub fn label(&self) -> &'static str {
        self.severity.label()
    }
}

/// Estado agregado de salud de un vehículo, derivado de las 8 categorías
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleHealth {
    pub average_percentage: f64,
    pub has_critical: bool,
    /// Bucket de color del promedio - nunca `NoData`
    pub severity: Severity,
}

impl VehicleHealth {
    pub fn color(&self) -> &'static str {
        self.severity.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intervals_match_fleet_constants() {
        assert_eq!(MaintenanceCategory::Oil.interval(), 10_000.0);
        assert_eq!(MaintenanceCategory::Brakes.interval(), 20_000.0);
        assert_eq!(MaintenanceCategory::TimingBelt.interval(), 60_000.0);
        assert_eq!(MaintenanceCategory::Filter.interval(), 15_000.0);
        assert_eq!(MaintenanceCategory::Clutch.interval(), 80_000.0);
        assert_eq!(MaintenanceCategory::Battery.interval(), 40_000.0);
        assert_eq!(MaintenanceCategory::Tires.interval(), 30_000.0);
        assert_eq!(MaintenanceCategory::ShockAbsorbers.interval(), 50_000.0);
    }

    #[test]
    fn test_log_roundtrip_per_category() {
        let mut log = MaintenanceLog::default();
        for category in MaintenanceCategory::ALL {
            assert_eq!(log.last_change(category), None);
            log.set_last_change(category, Some(12_500.0));
            assert_eq!(log.last_change(category), Some(12_500.0));
        }
    }

    #[test]
    fn test_category_serializes_as_snake_case_key() {
        for category in MaintenanceCategory::ALL {
            let serialized = serde_json::to_string(&category).unwrap();
            assert_eq!(serialized, format!("\"{}\"", category.key()));
        }
    }

    #[test]
    fn test_severity_colors_are_stable() {
        assert_eq!(Severity::Critical.color(), "rgb(239, 68, 68)");
        assert_eq!(Severity::Warning.color(), "rgb(249, 115, 22)");
        assert_eq!(Severity::Attention.color(), "rgb(234, 179, 8)");
        assert_eq!(Severity::Good.color(), "rgb(34, 197, 94)");
        assert_eq!(Severity::NoData.color(), "rgb(75, 85, 99)");
    }
}
