use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::company_dto::CompanyRef;
use crate::models::{Company, Vehicle, VehicleType};

// Item del listado general de vehículos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleListItem {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub company: CompanyRef,
}

impl VehicleListItem {
    pub fn new(vehicle: Vehicle, company: &Company) -> Self {
        Self {
            id: vehicle.id,
            model: vehicle.model,
            plate: vehicle.plate,
            vehicle_type: vehicle.vehicle_type,
            company: CompanyRef::from(company),
        }
    }
}

// Detalle completo de un vehículo (búsqueda por id o por patente)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleDetails {
    pub id: Uuid,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub plate: String,
    pub leave: bool,
    pub entry_date: DateTime<Utc>,
    pub departure_date: Option<DateTime<Utc>>,
    pub vehicle_type: VehicleType,
    pub company: CompanyRef,
}

impl VehicleDetails {
    pub fn new(vehicle: Vehicle, company: &Company) -> Self {
        Self {
            id: vehicle.id,
            brand: vehicle.brand,
            model: vehicle.model,
            color: vehicle.color,
            plate: vehicle.plate,
            leave: vehicle.leave,
            entry_date: vehicle.entry_date,
            departure_date: vehicle.departure_date,
            vehicle_type: vehicle.vehicle_type,
            company: CompanyRef::from(company),
        }
    }
}

// Vehículo sin datos de empresa, para el historial y la ocupación de una empresa
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleSummary {
    pub id: Uuid,
    pub model: String,
    pub plate: String,
    pub vehicle_type: VehicleType,
}

impl From<Vehicle> for VehicleSummary {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            model: vehicle.model,
            plate: vehicle.plate,
            vehicle_type: vehicle.vehicle_type,
        }
    }
}
