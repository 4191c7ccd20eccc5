//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL, más los tipos del motor de mantenimiento.

pub mod location;
pub mod maintenance;
pub mod part;
pub mod vehicle;
