//! Router HTTP
//!
//! Arma las rutas de empresas, vehículos y documentación detrás del
//! middleware de autenticación Basic.

pub mod company_routes;
pub mod docs_routes;
pub mod vehicle_routes;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{basic_auth_middleware, cors_layer};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .nest("/companies", company_routes::create_company_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/v3/api-docs", docs_routes::create_docs_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
