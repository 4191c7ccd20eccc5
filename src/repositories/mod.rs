//! Repositorios de persistencia
//!
//! Una capa por tabla; los controllers componen sobre ellas.

pub mod location_repository;
pub mod part_repository;
pub mod vehicle_repository;
