use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{VehicleDetails, VehicleListItem};
use crate::models::{Company, Vehicle, VehicleRequest};
use crate::repositories::{CompanyRepository, VehicleRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleService {
    vehicles: Arc<dyn VehicleRepository>,
    companies: Arc<dyn CompanyRepository>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn VehicleRepository>, companies: Arc<dyn CompanyRepository>) -> Self {
        Self { vehicles, companies }
    }

    /// Ingresa un vehículo al estacionamiento de su empresa.
    ///
    /// Falla con `NotFound` si la empresa no existe, `CapacityExceeded` si no
    /// hay lugar para el tipo y `Conflict` si la patente ya está registrada.
    pub async fn create(&self, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let vehicle = self.vehicles.admit(&Vehicle::new(request)).await?;
        tracing::info!(
            "🚗 Vehículo {} ingresado en empresa {}",
            vehicle.plate,
            vehicle.company_id
        );
        Ok(vehicle)
    }

    pub async fn find_all(&self) -> AppResult<Vec<VehicleListItem>> {
        let vehicles = self.vehicles.find_all().await?;

        let mut companies: HashMap<Uuid, Company> = HashMap::new();
        let mut items = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            if !companies.contains_key(&vehicle.company_id) {
                let company = self.company(vehicle.company_id).await?;
                companies.insert(company.id, company);
            }
            if let Some(company) = companies.get(&vehicle.company_id) {
                items.push(VehicleListItem::new(vehicle, company));
            }
        }

        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<VehicleDetails> {
        let vehicle = self.vehicle(id).await?;
        self.details(vehicle).await
    }

    pub async fn find_by_plate(&self, plate: &str) -> AppResult<VehicleDetails> {
        let vehicle = self
            .vehicles
            .find_by_plate(plate)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle not found. Plate: {}", plate)))?;
        self.details(vehicle).await
    }

    /// Reemplaza marca, modelo, color, patente, tipo y empresa
    pub async fn update(&self, id: Uuid, request: VehicleRequest) -> AppResult<Vehicle> {
        request.validate()?;

        let mut vehicle = self.vehicle(id).await?;
        if request.company_id != vehicle.company_id {
            self.company(request.company_id).await?;
        }
        vehicle.apply(request);
        self.vehicles.update(&vehicle).await
    }

    /// Registra la salida y libera el lugar
    pub async fn depart(&self, id: Uuid) -> AppResult<Vehicle> {
        let mut vehicle = self.vehicle(id).await?;
        if vehicle.leave {
            return Err(AppError::Conflict(format!(
                "Vehicle already left the parking. Id: {}",
                id
            )));
        }

        vehicle.depart(Utc::now());
        let vehicle = self.vehicles.update(&vehicle).await?;
        tracing::info!("🅿️ Vehículo {} salió de empresa {}", vehicle.plate, vehicle.company_id);
        Ok(vehicle)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.vehicles.delete(id).await
    }

    async fn vehicle(&self, id: Uuid) -> AppResult<Vehicle> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn company(&self, id: Uuid) -> AppResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Company", &id.to_string()))
    }

    async fn details(&self, vehicle: Vehicle) -> AppResult<VehicleDetails> {
        let company = self.company(vehicle.company_id).await?;
        Ok(VehicleDetails::new(vehicle, &company))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CompanyRequest, VehicleType};
    use crate::repositories::InMemoryStore;

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: VehicleService,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let service = VehicleService::new(store.clone(), store.clone());
            Self { store, service }
        }

        async fn company(&self, cars: i32, motorcycles: i32) -> Company {
            let company = Company::new(CompanyRequest {
                name: "Estacionamento Centro".to_string(),
                cnpj: Uuid::new_v4().to_string(),
                address: "Rua B, 20".to_string(),
                phone: "1130001000".to_string(),
                spaces_for_cars: cars,
                spaces_for_motorcycles: motorcycles,
            });
            CompanyRepository::create(self.store.as_ref(), &company)
                .await
                .unwrap()
        }
    }

    fn vehicle(company_id: Uuid, plate: &str, vehicle_type: VehicleType) -> VehicleRequest {
        VehicleRequest {
            brand: "Honda".to_string(),
            model: "CG 160".to_string(),
            color: "Black".to_string(),
            plate: plate.to_string(),
            vehicle_type,
            company_id,
        }
    }

    #[tokio::test]
    async fn test_second_car_exceeds_capacity() {
        let fx = Fixture::new();
        let company = fx.company(1, 0).await;

        let first = fx
            .service
            .create(vehicle(company.id, "CAR0001", VehicleType::Car))
            .await
            .unwrap();
        assert!(!first.leave);
        assert!(first.departure_date.is_none());

        let second = fx
            .service
            .create(vehicle(company.id, "CAR0002", VehicleType::Car))
            .await;
        assert!(matches!(second, Err(AppError::CapacityExceeded(_))));
        assert_eq!(fx.store.vehicle_count().await, 1);
    }

    #[tokio::test]
    async fn test_departure_frees_motorcycle_space() {
        let fx = Fixture::new();
        let company = fx.company(0, 2).await;

        let first = fx
            .service
            .create(vehicle(company.id, "MOTO001", VehicleType::Motorcycle))
            .await
            .unwrap();
        fx.service
            .create(vehicle(company.id, "MOTO002", VehicleType::Motorcycle))
            .await
            .unwrap();
        assert!(matches!(
            fx.service
                .create(vehicle(company.id, "MOTO003", VehicleType::Motorcycle))
                .await,
            Err(AppError::CapacityExceeded(_))
        ));

        let departed = fx.service.depart(first.id).await.unwrap();
        assert!(departed.leave);
        assert!(departed.departure_date.is_some());
        assert_eq!(
            fx.store
                .count_parked(company.id, Some(VehicleType::Motorcycle))
                .await
                .unwrap(),
            1
        );

        fx.service
            .create(vehicle(company.id, "MOTO003", VehicleType::Motorcycle))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_plate_leaves_store_unchanged() {
        let fx = Fixture::new();
        let company = fx.company(5, 5).await;

        fx.service
            .create(vehicle(company.id, "ABC1D23", VehicleType::Car))
            .await
            .unwrap();
        let result = fx
            .service
            .create(vehicle(company.id, "ABC1D23", VehicleType::Motorcycle))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(fx.store.vehicle_count().await, 1);
        let stored = fx.service.find_by_plate("ABC1D23").await.unwrap();
        assert_eq!(stored.vehicle_type, VehicleType::Car);
    }

    #[tokio::test]
    async fn test_unknown_company() {
        let fx = Fixture::new();
        let result = fx
            .service
            .create(vehicle(Uuid::new_v4(), "ZZZ9999", VehicleType::Car))
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_depart_twice_conflicts() {
        let fx = Fixture::new();
        let company = fx.company(1, 0).await;
        let car = fx
            .service
            .create(vehicle(company.id, "CAR0001", VehicleType::Car))
            .await
            .unwrap();

        fx.service.depart(car.id).await.unwrap();
        assert!(matches!(
            fx.service.depart(car.id).await,
            Err(AppError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_parking_state() {
        let fx = Fixture::new();
        let company = fx.company(2, 0).await;
        let other = fx.company(2, 0).await;
        let car = fx
            .service
            .create(vehicle(company.id, "CAR0001", VehicleType::Car))
            .await
            .unwrap();

        let mut request = vehicle(other.id, "CAR0009", VehicleType::Car);
        request.color = "White".to_string();
        let updated = fx.service.update(car.id, request).await.unwrap();

        assert_eq!(updated.id, car.id);
        assert_eq!(updated.company_id, other.id);
        assert_eq!(updated.plate, "CAR0009");
        assert_eq!(updated.entry_date, car.entry_date);
        assert!(!updated.leave);

        let details = fx.service.find_by_id(car.id).await.unwrap();
        assert_eq!(details.company.id, other.id);
        assert_eq!(details.color, "White");
    }

    #[tokio::test]
    async fn test_find_all_and_delete() {
        let fx = Fixture::new();
        let company = fx.company(3, 0).await;
        let car = fx
            .service
            .create(vehicle(company.id, "CAR0001", VehicleType::Car))
            .await
            .unwrap();

        let all = fx.service.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].company.name, company.name);

        fx.service.delete(car.id).await.unwrap();
        assert!(matches!(
            fx.service.find_by_id(car.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            fx.service.delete(car.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
