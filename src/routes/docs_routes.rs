//! Descripción de la API
//!
//! Servida bajo `/v3/api-docs`, uno de los prefijos exentos de autenticación.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

/// Tabla de rutas expuestas: (método, ruta, descripción)
pub const ROUTES: &[(&str, &str, &str)] = &[
    ("POST", "/companies", "Crear empresa"),
    ("GET", "/companies", "Listar empresas (page, size, sort)"),
    ("GET", "/companies/:id", "Obtener empresa"),
    ("GET", "/companies/:id/historic", "Historial de vehículos de la empresa"),
    ("GET", "/companies/:id/parking", "Vehículos estacionados en la empresa"),
    ("PUT", "/companies/:id", "Actualizar empresa"),
    ("DELETE", "/companies/:id", "Eliminar empresa"),
    ("POST", "/vehicles", "Ingresar vehículo"),
    ("GET", "/vehicles", "Listar vehículos"),
    ("GET", "/vehicles/:id", "Obtener vehículo"),
    ("GET", "/vehicles/findByPlate", "Buscar vehículo por patente (plate)"),
    ("PUT", "/vehicles/:id", "Actualizar vehículo"),
    ("POST", "/vehicles/:id/departure", "Registrar salida del vehículo"),
    ("DELETE", "/vehicles/:id", "Eliminar vehículo"),
];

pub fn create_docs_router() -> Router<AppState> {
    Router::new().route("/", get(api_docs))
}

async fn api_docs() -> Json<Value> {
    let paths: Vec<Value> = ROUTES
        .iter()
        .map(|(method, path, summary)| {
            json!({ "method": method, "path": path, "summary": summary })
        })
        .collect();

    Json(json!({
        "title": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "security": "HTTP Basic (email:password)",
        "paths": paths,
    }))
}
