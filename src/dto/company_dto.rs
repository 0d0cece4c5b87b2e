use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Company;

// Resumen de empresa para el listado paginado
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanySummary {
    pub id: Uuid,
    pub name: String,
    pub all_spaces: i64,
    pub occupied_spaces: i64,
}

impl CompanySummary {
    pub fn from_company(company: &Company, occupied_spaces: i64) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
            all_spaces: company.all_spaces(),
            occupied_spaces,
        }
    }
}

// Referencia mínima a la empresa dentro de un vehículo
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRef {
    pub id: Uuid,
    pub name: String,
}

impl From<&Company> for CompanyRef {
    fn from(company: &Company) -> Self {
        Self {
            id: company.id,
            name: company.name.clone(),
        }
    }
}
