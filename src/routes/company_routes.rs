use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::dto::company_dto::CompanySummary;
use crate::dto::vehicle_dto::VehicleSummary;
use crate::models::{Company, CompanyRequest};
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{ApiJson, ApiPath, ApiQuery};
use crate::utils::pagination::{Page, PageQuery, PageRequest};

pub fn create_company_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_companies).post(create_company))
        .route(
            "/:id",
            get(get_company).put(update_company).delete(delete_company),
        )
        .route("/:id/historic", get(get_historic))
        .route("/:id/parking", get(get_parking))
}

async fn create_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    let company = state.companies.create(request).await?;
    tracing::debug!("Empresa {} creada por {}", company.id, user.email);
    Ok((StatusCode::CREATED, Json(company)))
}

async fn list_companies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> Result<Json<Page<CompanySummary>>, AppError> {
    let request = PageRequest::try_from(query)?;
    let page = state.companies.find_page(request).await?;
    Ok(Json(page))
}

async fn get_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.companies.find_by_id(id).await?))
}

async fn get_historic(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<VehicleSummary>>, AppError> {
    Ok(Json(state.companies.historic(id).await?))
}

async fn get_parking(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Vec<VehicleSummary>>, AppError> {
    Ok(Json(state.companies.parking(id).await?))
}

async fn update_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CompanyRequest>,
) -> Result<Json<Company>, AppError> {
    Ok(Json(state.companies.update(id, request).await?))
}

async fn delete_company(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.companies.delete(id).await?;
    tracing::info!("🗑️ Empresa {} eliminada por {}", id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
