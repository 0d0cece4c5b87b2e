//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su request de alta/edición.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;
use validator::Validate;

/// Tipo de vehículo - mapea al ENUM vehicle_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    Car,
    Motorcycle,
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub company_id: Uuid,
    pub brand: String,
    pub model: String,
    pub color: String,
    pub plate: String,
    pub vehicle_type: VehicleType,
    pub entry_date: DateTime<Utc>,
    pub departure_date: Option<DateTime<Utc>>,
    #[sqlx(rename = "has_left")]
    pub leave: bool,
}

impl Vehicle {
    /// Vehículo recién ingresado al estacionamiento
    pub fn new(request: VehicleRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: request.company_id,
            brand: request.brand,
            model: request.model,
            color: request.color,
            plate: request.plate,
            vehicle_type: request.vehicle_type,
            entry_date: Utc::now(),
            departure_date: None,
            leave: false,
        }
    }

    /// Reemplaza los datos editables; entrada y salida no se tocan
    pub fn apply(&mut self, request: VehicleRequest) {
        self.company_id = request.company_id;
        self.brand = request.brand;
        self.model = request.model;
        self.color = request.color;
        self.plate = request.plate;
        self.vehicle_type = request.vehicle_type;
    }

    /// Registra la salida del vehículo
    pub fn depart(&mut self, at: DateTime<Utc>) {
        self.leave = true;
        self.departure_date = Some(at);
    }

    pub fn is_parked(&self) -> bool {
        !self.leave
    }
}

/// Request para crear o reemplazar un vehículo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1, max = 50))]
    pub color: String,

    #[validate(length(min = 1, max = 20))]
    pub plate: String,

    pub vehicle_type: VehicleType,

    pub company_id: Uuid,
}
