//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Se construye una sola vez al arrancar.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::{
    CompanyRepository, PgCompanyRepository, PgUserRepository, PgVehicleRepository,
    UserRepository, VehicleRepository,
};
use crate::services::{AuthService, CompanyService, VehicleService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub auth: Arc<AuthService>,
    pub companies: Arc<CompanyService>,
    pub vehicles: Arc<VehicleService>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        users: Arc<dyn UserRepository>,
        companies: Arc<dyn CompanyRepository>,
        vehicles: Arc<dyn VehicleRepository>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(users, config.bcrypt_cost)),
            companies: Arc::new(CompanyService::new(companies.clone(), vehicles.clone())),
            vehicles: Arc::new(VehicleService::new(vehicles, companies)),
            config: Arc::new(config),
        }
    }

    /// Estado respaldado por PostgreSQL
    pub fn with_pool(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self::new(
            config,
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgCompanyRepository::new(pool.clone())),
            Arc::new(PgVehicleRepository::new(pool)),
        )
    }
}
