//! API de registro de estacionamientos
//!
//! Empresas con lugares para autos y motos, y los vehículos que ingresan y
//! salen de ellas. Toda request pasa por autenticación Basic contra la tabla users.

pub mod config;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
