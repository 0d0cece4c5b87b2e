//! Repositorios de persistencia
//!
//! Cada entidad expone un trait de acceso a datos con una implementación
//! PostgreSQL (sqlx) y otra en memoria usada por los tests.

pub mod company_repository;
pub mod memory;
pub mod user_repository;
pub mod vehicle_repository;

pub use company_repository::{CompanyRepository, PgCompanyRepository};
pub use memory::InMemoryStore;
pub use user_repository::{PgUserRepository, UserRepository};
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
