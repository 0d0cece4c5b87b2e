//! Almacén en memoria
//!
//! Implementa los tres repositorios sobre mapas protegidos por un único
//! `RwLock`, con las mismas reglas de unicidad y borrado en cascada que el
//! schema PostgreSQL. Lo usan los tests de servicios y de la API.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CompanyRepository, UserRepository, VehicleRepository};
use crate::models::{Company, User, Vehicle, VehicleType};
use crate::services::capacity;
use crate::utils::errors::{not_found_error, save_conflict_error, AppResult};
use crate::utils::pagination::{Page, PageRequest, SortDirection};

#[derive(Default)]
struct Tables {
    users: HashMap<String, User>,
    companies: HashMap<Uuid, Company>,
    vehicles: HashMap<Uuid, Vehicle>,
}

impl Tables {
    fn count_parked(&self, company_id: Uuid, vehicle_type: Option<VehicleType>) -> i64 {
        self.vehicles
            .values()
            .filter(|v| v.company_id == company_id && v.is_parked())
            .filter(|v| vehicle_type.map_or(true, |t| v.vehicle_type == t))
            .count() as i64
    }

    fn plate_taken(&self, plate: &str, except: Option<Uuid>) -> bool {
        self.vehicles
            .values()
            .any(|v| v.plate == plate && Some(v.id) != except)
    }

    fn cnpj_taken(&self, cnpj: &str, except: Option<Uuid>) -> bool {
        self.companies
            .values()
            .any(|c| c.cnpj == cnpj && Some(c.id) != except)
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    user_lookups: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cantidad de consultas por email hechas al almacén de credenciales
    pub fn user_lookups(&self) -> usize {
        self.user_lookups.load(Ordering::SeqCst)
    }

    pub async fn vehicle_count(&self) -> usize {
        self.tables.read().await.vehicles.len()
    }
}

fn sorted_by_entry(mut vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
    vehicles.sort_by(|a, b| a.entry_date.cmp(&b.entry_date).then(a.id.cmp(&b.id)));
    vehicles
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.user_lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables.read().await.users.get(email).cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.email) {
            return Err(save_conflict_error("User"));
        }
        tables.users.insert(user.email.clone(), user.clone());
        Ok(user.clone())
    }
}

#[async_trait]
impl CompanyRepository for InMemoryStore {
    async fn create(&self, company: &Company) -> AppResult<Company> {
        let mut tables = self.tables.write().await;
        if tables.cnpj_taken(&company.cnpj, None) {
            return Err(save_conflict_error("Company"));
        }
        tables.companies.insert(company.id, company.clone());
        Ok(company.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn find_page(&self, request: PageRequest) -> AppResult<Page<Company>> {
        let tables = self.tables.read().await;
        let mut companies: Vec<Company> = tables.companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        if request.direction == SortDirection::Desc {
            companies.reverse();
        }

        let total = companies.len() as u64;
        let content = companies
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.limit() as usize)
            .collect();

        Ok(Page::new(content, request, total))
    }

    async fn update(&self, company: &Company) -> AppResult<Company> {
        let mut tables = self.tables.write().await;
        if !tables.companies.contains_key(&company.id) {
            return Err(not_found_error("Company", &company.id.to_string()));
        }
        if tables.cnpj_taken(&company.cnpj, Some(company.id)) {
            return Err(save_conflict_error("Company"));
        }
        tables.companies.insert(company.id, company.clone());
        Ok(company.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.companies.remove(&id).is_none() {
            return Err(not_found_error("Company", &id.to_string()));
        }
        tables.vehicles.retain(|_, v| v.company_id != id);
        Ok(())
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn admit(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        // El write lock cubre verificación e inserción
        let mut tables = self.tables.write().await;

        let company = tables
            .companies
            .get(&vehicle.company_id)
            .ok_or_else(|| not_found_error("Company", &vehicle.company_id.to_string()))?;

        let occupied = tables.count_parked(company.id, Some(vehicle.vehicle_type));
        capacity::check_admission(company, vehicle.vehicle_type, occupied)?;

        if tables.plate_taken(&vehicle.plate, None) {
            return Err(save_conflict_error("Vehicle"));
        }

        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(sorted_by_entry(tables.vehicles.values().cloned().collect()))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.tables.read().await.vehicles.get(&id).cloned())
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let tables = self.tables.read().await;
        Ok(tables.vehicles.values().find(|v| v.plate == plate).cloned())
    }

    async fn find_by_company(&self, company_id: Uuid, parked_only: bool) -> AppResult<Vec<Vehicle>> {
        let tables = self.tables.read().await;
        let vehicles = tables
            .vehicles
            .values()
            .filter(|v| v.company_id == company_id)
            .filter(|v| !parked_only || v.is_parked())
            .cloned()
            .collect();
        Ok(sorted_by_entry(vehicles))
    }

    async fn count_parked(&self, company_id: Uuid, vehicle_type: Option<VehicleType>) -> AppResult<i64> {
        Ok(self.tables.read().await.count_parked(company_id, vehicle_type))
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tables = self.tables.write().await;
        if !tables.vehicles.contains_key(&vehicle.id) {
            return Err(not_found_error("Vehicle", &vehicle.id.to_string()));
        }
        if !tables.companies.contains_key(&vehicle.company_id) {
            return Err(not_found_error("Company", &vehicle.company_id.to_string()));
        }
        if tables.plate_taken(&vehicle.plate, Some(vehicle.id)) {
            return Err(save_conflict_error("Vehicle"));
        }
        tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.vehicles.remove(&id).is_none() {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        Ok(())
    }
}
