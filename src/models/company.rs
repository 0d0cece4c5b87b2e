//! Modelo de Company
//!
//! Este módulo contiene el struct Company y el request usado para crearla
//! y reemplazarla. Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Company principal - mapea exactamente a la tabla companies
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub cnpj: String,
    pub address: String,
    pub phone: String,
    pub spaces_for_cars: i32,
    pub spaces_for_motorcycles: i32,
    pub created_at: DateTime<Utc>,
}

impl Company {
    pub fn new(request: CompanyRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: request.name,
            cnpj: request.cnpj,
            address: request.address,
            phone: request.phone,
            spaces_for_cars: request.spaces_for_cars,
            spaces_for_motorcycles: request.spaces_for_motorcycles,
            created_at: Utc::now(),
        }
    }

    /// Reemplaza los datos editables conservando id y fecha de alta
    pub fn apply(&mut self, request: CompanyRequest) {
        self.name = request.name;
        self.cnpj = request.cnpj;
        self.address = request.address;
        self.phone = request.phone;
        self.spaces_for_cars = request.spaces_for_cars;
        self.spaces_for_motorcycles = request.spaces_for_motorcycles;
    }

    pub fn all_spaces(&self) -> i64 {
        i64::from(self.spaces_for_cars) + i64::from(self.spaces_for_motorcycles)
    }
}

/// Request para crear o reemplazar una company
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub cnpj: String,

    #[validate(length(min = 1, max = 500))]
    pub address: String,

    #[validate(length(min = 1, max = 32))]
    pub phone: String,

    #[validate(range(min = 0))]
    pub spaces_for_cars: i32,

    #[validate(range(min = 0))]
    pub spaces_for_motorcycles: i32,
}
