use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::company_dto::CompanySummary;
use crate::dto::vehicle_dto::VehicleSummary;
use crate::models::{Company, CompanyRequest};
use crate::repositories::{CompanyRepository, VehicleRepository};
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl CompanyService {
    pub fn new(companies: Arc<dyn CompanyRepository>, vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { companies, vehicles }
    }

    pub async fn create(&self, request: CompanyRequest) -> AppResult<Company> {
        request.validate()?;

        let company = self.companies.create(&Company::new(request)).await?;
        tracing::info!("🏢 Empresa creada: {} ({})", company.name, company.id);
        Ok(company)
    }

    /// Listado paginado con lugares totales y ocupados de cada empresa
    pub async fn find_page(&self, request: PageRequest) -> AppResult<Page<CompanySummary>> {
        let page = self.companies.find_page(request).await?;

        let mut content = Vec::with_capacity(page.content.len());
        for company in &page.content {
            let occupied = self.vehicles.count_parked(company.id, None).await?;
            content.push(CompanySummary::from_company(company, occupied));
        }

        Ok(Page {
            content,
            page: page.page,
            size: page.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))
    }

    /// Todos los vehículos que pasaron por la empresa
    pub async fn historic(&self, id: Uuid) -> AppResult<Vec<VehicleSummary>> {
        self.vehicles_of(id, false).await
    }

    /// Vehículos que siguen estacionados en la empresa
    pub async fn parking(&self, id: Uuid) -> AppResult<Vec<VehicleSummary>> {
        self.vehicles_of(id, true).await
    }

    async fn vehicles_of(&self, id: Uuid, parked_only: bool) -> AppResult<Vec<VehicleSummary>> {
        let company = self.find_by_id(id).await?;
        let vehicles = self.vehicles.find_by_company(company.id, parked_only).await?;
        Ok(vehicles.into_iter().map(VehicleSummary::from).collect())
    }

    pub async fn update(&self, id: Uuid, request: CompanyRequest) -> AppResult<Company> {
        request.validate()?;

        let mut company = self.find_by_id(id).await?;
        company.apply(request);
        self.companies.update(&company).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.companies.delete(id).await?;
        tracing::info!("🗑️ Empresa eliminada: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Vehicle, VehicleRequest, VehicleType};
    use crate::repositories::InMemoryStore;
    use crate::utils::errors::AppError;
    use crate::utils::pagination::SortDirection;

    fn request(name: &str, cnpj: &str) -> CompanyRequest {
        CompanyRequest {
            name: name.to_string(),
            cnpj: cnpj.to_string(),
            address: "Av. Paulista, 1000".to_string(),
            phone: "11999990000".to_string(),
            spaces_for_cars: 10,
            spaces_for_motorcycles: 5,
        }
    }

    fn setup() -> (Arc<InMemoryStore>, CompanyService) {
        let store = Arc::new(InMemoryStore::new());
        let service = CompanyService::new(store.clone(), store.clone());
        (store, service)
    }

    #[tokio::test]
    async fn test_find_page_sorted_by_name() {
        let (_, service) = setup();
        for (i, name) in ["Charlie", "Alpha", "Bravo"].iter().enumerate() {
            service.create(request(name, &format!("cnpj-{}", i))).await.unwrap();
        }

        let asc = service
            .find_page(PageRequest::new(0, 2, SortDirection::Asc).unwrap())
            .await
            .unwrap();
        let names: Vec<_> = asc.content.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Bravo"]);
        assert_eq!(asc.total_elements, 3);
        assert_eq!(asc.total_pages, 2);

        let desc = service
            .find_page(PageRequest::new(0, 10, SortDirection::Desc).unwrap())
            .await
            .unwrap();
        assert_eq!(desc.content[0].name, "Charlie");
        assert_eq!(desc.content[0].all_spaces, 15);
    }

    #[tokio::test]
    async fn test_duplicate_cnpj_conflict() {
        let (_, service) = setup();
        service.create(request("Alpha", "same")).await.unwrap();
        let result = service.create(request("Beta", "same")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let (_, service) = setup();
        let mut bad = request("Alpha", "1");
        bad.spaces_for_cars = -1;
        assert!(matches!(service.create(bad).await, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_historic_and_parking() {
        let (store, service) = setup();
        let company = service.create(request("Alpha", "1")).await.unwrap();

        for plate in ["AAA1111", "BBB2222"] {
            let vehicle = Vehicle::new(VehicleRequest {
                brand: "Fiat".to_string(),
                model: "Uno".to_string(),
                color: "Red".to_string(),
                plate: plate.to_string(),
                vehicle_type: VehicleType::Car,
                company_id: company.id,
            });
            store.admit(&vehicle).await.unwrap();
        }

        let mut left = VehicleRepository::find_by_plate(store.as_ref(), "AAA1111")
            .await
            .unwrap()
            .unwrap();
        left.depart(chrono::Utc::now());
        VehicleRepository::update(store.as_ref(), &left).await.unwrap();

        assert_eq!(service.historic(company.id).await.unwrap().len(), 2);
        let parked = service.parking(company.id).await.unwrap();
        assert_eq!(parked.len(), 1);
        assert_eq!(parked[0].plate, "BBB2222");

        let page = service
            .find_page(PageRequest::new(0, 10, SortDirection::Asc).unwrap())
            .await
            .unwrap();
        assert_eq!(page.content[0].occupied_spaces, 1);
    }

    #[tokio::test]
    async fn test_missing_company() {
        let (_, service) = setup();
        let id = Uuid::new_v4();
        assert!(matches!(service.historic(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.parking(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            service.update(id, request("X", "x")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_, service) = setup();
        let company = service.create(request("Alpha", "1")).await.unwrap();

        let mut changed = request("Alpha Parking", "1");
        changed.spaces_for_cars = 3;
        let updated = service.update(company.id, changed).await.unwrap();
        assert_eq!(updated.id, company.id);
        assert_eq!(updated.name, "Alpha Parking");
        assert_eq!(updated.spaces_for_cars, 3);

        service.delete(company.id).await.unwrap();
        assert!(matches!(
            service.find_by_id(company.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_with_taken_cnpj_keeps_record() {
        let (_, service) = setup();
        service.create(request("Alpha", "111")).await.unwrap();
        let bravo = service.create(request("Bravo", "222")).await.unwrap();

        let result = service.update(bravo.id, request("Bravo Renamed", "111")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));

        let stored = service.find_by_id(bravo.id).await.unwrap();
        assert_eq!(stored, bravo);
    }
}
