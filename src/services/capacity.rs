//! Regla de capacidad del estacionamiento
//!
//! Un vehículo sólo ingresa si los lugares ocupados de su tipo son
//! estrictamente menos que los configurados por la empresa.

use crate::models::{Company, VehicleType};
use crate::utils::errors::{AppError, AppResult};

/// Lugares configurados para un tipo de vehículo
pub fn spaces_for(company: &Company, vehicle_type: VehicleType) -> i64 {
    match vehicle_type {
        VehicleType::Car => i64::from(company.spaces_for_cars),
        VehicleType::Motorcycle => i64::from(company.spaces_for_motorcycles),
    }
}

/// `occupied` es la cantidad de vehículos del tipo que siguen estacionados (`leave == false`)
pub fn can_admit(company: &Company, vehicle_type: VehicleType, occupied: i64) -> bool {
    occupied < spaces_for(company, vehicle_type)
}

/// Igual que [`can_admit`] pero falla con `CapacityExceeded`
pub fn check_admission(company: &Company, vehicle_type: VehicleType, occupied: i64) -> AppResult<()> {
    if can_admit(company, vehicle_type, occupied) {
        return Ok(());
    }

    let message = match vehicle_type {
        VehicleType::Car => "Car does not save, parking's company is full!",
        VehicleType::Motorcycle => "Motorcycle does not save, parking's company is full!",
    };
    tracing::info!(
        "🚫 Empresa {} sin lugares para {:?} ({}/{})",
        company.id,
        vehicle_type,
        occupied,
        spaces_for(company, vehicle_type)
    );
    Err(AppError::CapacityExceeded(message.to_string()))
}
