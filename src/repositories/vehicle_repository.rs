use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Company, Vehicle, VehicleType};
use crate::services::capacity;
use crate::utils::errors::{map_unique_violation, not_found_error, AppResult};

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Ingresa un vehículo si su empresa tiene lugar para el tipo.
    ///
    /// Verificación de capacidad e inserción se ejecutan como una unidad:
    /// dos ingresos concurrentes a la misma empresa no pueden superar la capacidad.
    async fn admit(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn find_all(&self) -> AppResult<Vec<Vehicle>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>>;

    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>>;

    /// Vehículos de una empresa; con `parked_only` sólo los que no salieron
    async fn find_by_company(&self, company_id: Uuid, parked_only: bool) -> AppResult<Vec<Vehicle>>;

    /// Vehículos estacionados de una empresa, opcionalmente filtrados por tipo
    async fn count_parked(&self, company_id: Uuid, vehicle_type: Option<VehicleType>) -> AppResult<i64>;

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgVehicleRepository {
    pool: PgPool,
}

impl PgVehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn admit(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let mut tx = self.pool.begin().await?;

        // Bloquear la fila de la empresa serializa los ingresos concurrentes
        let company = sqlx::query_as::<_, Company>(
            "SELECT * FROM companies WHERE id = $1 FOR UPDATE",
        )
        .bind(vehicle.company_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found_error("Company", &vehicle.company_id.to_string()))?;

        let (occupied,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM vehicles
            WHERE company_id = $1 AND vehicle_type = $2 AND has_left = FALSE
            "#,
        )
        .bind(company.id)
        .bind(vehicle.vehicle_type)
        .fetch_one(&mut *tx)
        .await?;

        capacity::check_admission(&company, vehicle.vehicle_type, occupied)?;

        let saved = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, company_id, brand, model, color, plate,
                vehicle_type, entry_date, departure_date, has_left
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.company_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(&vehicle.plate)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.entry_date)
        .bind(vehicle.departure_date)
        .bind(vehicle.leave)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, "Vehicle"))?;

        tx.commit().await?;

        Ok(saved)
    }

    async fn find_all(&self) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles ORDER BY entry_date, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_plate(&self, plate: &str) -> AppResult<Option<Vehicle>> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE plate = $1")
            .bind(plate)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    async fn find_by_company(&self, company_id: Uuid, parked_only: bool) -> AppResult<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE company_id = $1 AND ($2 = FALSE OR has_left = FALSE)
            ORDER BY entry_date, id
            "#,
        )
        .bind(company_id)
        .bind(parked_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    async fn count_parked(&self, company_id: Uuid, vehicle_type: Option<VehicleType>) -> AppResult<i64> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM vehicles
            WHERE company_id = $1 AND has_left = FALSE
              AND ($2::vehicle_type IS NULL OR vehicle_type = $2)
            "#,
        )
        .bind(company_id)
        .bind(vehicle_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn update(&self, vehicle: &Vehicle) -> AppResult<Vehicle> {
        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET company_id = $2, brand = $3, model = $4, color = $5, plate = $6,
                vehicle_type = $7, departure_date = $8, has_left = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(vehicle.id)
        .bind(vehicle.company_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(&vehicle.color)
        .bind(&vehicle.plate)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.departure_date)
        .bind(vehicle.leave)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Vehicle"))?
        .ok_or_else(|| not_found_error("Vehicle", &vehicle.id.to_string()))?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }

        Ok(())
    }
}
