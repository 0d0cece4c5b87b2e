//! Servicios de negocio
//!
//! Reglas de negocio y proyección a DTOs sobre los repositorios.

pub mod auth_service;
pub mod capacity;
pub mod company_service;
pub mod vehicle_service;

pub use auth_service::AuthService;
pub use company_service::CompanyService;
pub use vehicle_service::VehicleService;
