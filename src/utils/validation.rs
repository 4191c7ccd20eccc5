//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! compartidas por los DTOs de la API.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

lazy_static! {
    /// Device ids tal como quedan tras la normalización del tracker:
    /// minúsculas, dígitos, guiones y guiones bajos
    static ref DEVICE_ID_RE: Regex = Regex::new(r"^[a-z0-9][a-z0-9_-]{1,31}$").unwrap();
}

/// Validar formato de device id de un tracker
pub fn validate_device_id(value: &str) -> Result<(), ValidationError> {
    if !DEVICE_ID_RE.is_match(value) {
        let mut error = ValidationError::new("device_id");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de matrícula de vehículo
pub fn validate_plate_number(value: &str) -> Result<(), ValidationError> {
    // Formato básico: XX-123-XX o similar
    let clean_plate = value.replace([' ', '-', '_'], "");
    if clean_plate.len() < 4 || clean_plate.len() > 10 {
        let mut error = ValidationError::new("plate_number");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

/// Validar que un valor sea no negativo
pub fn validate_non_negative<T: PartialOrd + std::fmt::Display + num_traits::Zero + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if value < T::zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_device_id() {
        assert!(validate_device_id("tracker01").is_ok());
        assert!(validate_device_id("fleet_07-a").is_ok());
        assert!(validate_device_id("").is_err());
        assert!(validate_device_id("UPPER").is_err());
        assert!(validate_device_id("-leading").is_err());
        assert!(validate_device_id(&"a".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_plate_number() {
        assert!(validate_plate_number("AB-123-CD").is_ok());
        assert!(validate_plate_number("M AB 1234").is_ok());
        assert!(validate_plate_number("A").is_err());
        assert!(validate_plate_number("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_not_empty() {
        assert!(validate_not_empty("x").is_ok());
        assert!(validate_not_empty("   ").is_err());
    }

    #[test]
    fn test_validate_coordinates() {
        assert!(validate_coordinates(45.0, -75.0).is_ok());
        assert!(validate_coordinates(91.0, -75.0).is_err());
        assert!(validate_coordinates(45.0, -181.0).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(12.5).is_ok());
        assert!(validate_non_negative(-0.1).is_err());
    }
}
