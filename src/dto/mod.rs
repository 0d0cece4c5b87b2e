//! DTOs de respuesta
//!
//! Proyecciones de las entidades que la API devuelve en listados y detalles.

pub mod company_dto;
pub mod vehicle_dto;
