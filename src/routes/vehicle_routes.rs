use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::dto::vehicle_dto::{VehicleDetails, VehicleListItem};
use crate::middleware::AuthenticatedUser;
use crate::models::{Vehicle, VehicleRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/findByPlate", get(find_by_plate))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/departure", post(register_departure))
}

#[derive(Debug, Deserialize)]
struct PlateQuery {
    plate: String,
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<VehicleRequest>,
) -> Result<(StatusCode, Json<Vehicle>), AppError> {
    let vehicle = state.vehicles.create(request).await?;
    tracing::debug!("Ingreso {} registrado por {}", vehicle.plate, user.email);
    Ok((StatusCode::CREATED, Json(vehicle)))
}

async fn list_vehicles(
    State(state): State<AppState>,
) -> Result<Json<Vec<VehicleListItem>>, AppError> {
    Ok(Json(state.vehicles.find_all().await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<VehicleDetails>, AppError> {
    Ok(Json(state.vehicles.find_by_id(id).await?))
}

async fn find_by_plate(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PlateQuery>,
) -> Result<Json<VehicleDetails>, AppError> {
    Ok(Json(state.vehicles.find_by_plate(&query.plate).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<VehicleRequest>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(state.vehicles.update(id, request).await?))
}

async fn register_departure(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    Ok(Json(state.vehicles.depart(id).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.vehicles.delete(id).await?;
    tracing::info!("🗑️ Vehículo {} eliminado por {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
