//! Servicio de tracking GPS
//!
//! Decodificación del paquete binario de los trackers y cálculo de distancia
//! recorrida entre posiciones para acumular kilometraje.
//!
//! Formato de frame (40 bytes tras inflar zlib):
//! `device_id[16] | lat f64 LE | lng f64 LE | speed f32 LE | timestamp u32 LE`

use std::io::Read;

use chrono::{DateTime, Utc};
use flate2::read::ZlibDecoder;

use crate::utils::errors::AppError;

/// Radio terrestre en kilómetros para la fórmula de haversine
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Longitud del frame binario descomprimido
pub const FRAME_LEN: usize = 40;

/// Posición decodificada de un paquete de tracker
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerFrame {
    pub device_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed: f64,
    pub timestamp: DateTime<Utc>,
}

/// Distancia en kilómetros entre dos coordenadas (fórmula de haversine)
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Normalizar el device id tal como lo emiten los trackers: NULs de relleno
/// fuera, minúsculas y sin el prefijo `b-` del firmware
pub fn normalize_device_id(raw: &str) -> String {
    raw.trim_matches('\0').to_lowercase().replace("b-", "")
}

/// Decodificar un paquete binario comprimido con zlib
pub fn decode_frame(raw: &[u8]) -> Result<TrackerFrame, AppError> {
    let mut decoder = ZlibDecoder::new(raw);
    let mut data = Vec::new();
    decoder
        .read_to_end(&mut data)
        .map_err(|e| AppError::BadRequest(format!("Invalid zlib payload: {}", e)))?;

    if data.len() < FRAME_LEN {
        return Err(AppError::BadRequest(format!(
            "Tracker frame too short: {} bytes, expected {}",
            data.len(),
            FRAME_LEN
        )));
    }

    let device_raw = std::str::from_utf8(&data[0..16])
        .map_err(|_| AppError::BadRequest("Device id is not valid UTF-8".to_string()))?;
    let device_id = normalize_device_id(device_raw);
    if device_id.is_empty() {
        return Err(AppError::BadRequest("Empty device id in tracker frame".to_string()));
    }

    let latitude = f64::from_le_bytes(read_array(&data, 16)?);
    let longitude = f64::from_le_bytes(read_array(&data, 24)?);
    let speed = f32::from_le_bytes(read_array(&data, 32)?) as f64;
    let unix_ts = u32::from_le_bytes(read_array(&data, 36)?);

    let timestamp = DateTime::from_timestamp(unix_ts as i64, 0)
        .ok_or_else(|| AppError::BadRequest("Invalid timestamp in tracker frame".to_string()))?;

    Ok(TrackerFrame {
        device_id,
        latitude,
        longitude,
        speed,
        timestamp,
    })
}

fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N], AppError> {
    data.get(offset..offset + N)
        .and_then(|slice| slice.try_into().ok())
        .ok_or_else(|| AppError::BadRequest("Truncated tracker frame".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn build_frame(device: &str, lat: f64, lng: f64, speed: f32, ts: u32) -> Vec<u8> {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..device.len()].copy_from_slice(device.as_bytes());
        frame[16..24].copy_from_slice(&lat.to_le_bytes());
        frame[24..32].copy_from_slice(&lng.to_le_bytes());
        frame[32..36].copy_from_slice(&speed.to_le_bytes());
        frame[36..40].copy_from_slice(&ts.to_le_bytes());

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&frame).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_frame_extracts_fields() {
        let raw = build_frame("B-Tracker01", 52.52, 13.405, 43.5, 1_700_000_000);
        let frame = decode_frame(&raw).unwrap();

        assert_eq!(frame.device_id, "tracker01");
        assert_eq!(frame.latitude, 52.52);
        assert_eq!(frame.longitude, 13.405);
        assert!((frame.speed - 43.5).abs() < 1e-6);
        assert_eq!(frame.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_decode_rejects_garbage_payload() {
        let err = decode_frame(&[0x00, 0x01, 0x02]).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_decode_rejects_short_frame() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0u8; 24]).unwrap();
        let raw = encoder.finish().unwrap();

        let err = decode_frame(&raw).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_decode_rejects_blank_device_id() {
        let raw = build_frame("", 48.0, 11.0, 0.0, 1_700_000_000);
        let err = decode_frame(&raw).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_haversine_known_distance() {
        // Berlín -> Múnich, ~504 km en línea recta
        let distance = haversine_distance(52.5200, 13.4050, 48.1351, 11.5820);
        assert!((distance - 504.0).abs() < 5.0, "distance = {}", distance);
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_distance(50.0, 8.0, 50.0, 8.0), 0.0);
    }

    #[test]
    fn test_normalize_device_id() {
        assert_eq!(normalize_device_id("B-FLEET07\0\0\0"), "fleet07");
        assert_eq!(normalize_device_id("tracker01"), "tracker01");
    }
}
