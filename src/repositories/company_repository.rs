use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Company;
use crate::utils::errors::{map_unique_violation, not_found_error, AppResult};
use crate::utils::pagination::{Page, PageRequest};

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn create(&self, company: &Company) -> AppResult<Company>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>>;

    /// Página de empresas ordenada por nombre
    async fn find_page(&self, request: PageRequest) -> AppResult<Page<Company>>;

    async fn update(&self, company: &Company) -> AppResult<Company>;

    /// Borra la empresa junto con sus vehículos
    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn create(&self, company: &Company) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                id, name, cnpj, address, phone,
                spaces_for_cars, spaces_for_motorcycles, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.cnpj)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(company.spaces_for_cars)
        .bind(company.spaces_for_motorcycles)
        .bind(company.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Company"))?;

        Ok(result)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Company>> {
        let result = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    async fn find_page(&self, request: PageRequest) -> AppResult<Page<Company>> {
        // La dirección sale de un enum, nunca del query string
        let sql = format!(
            "SELECT * FROM companies ORDER BY name {dir}, id {dir} LIMIT $1 OFFSET $2",
            dir = request.direction.as_sql()
        );

        let companies = sqlx::query_as::<_, Company>(&sql)
            .bind(request.limit())
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies")
            .fetch_one(&self.pool)
            .await?;

        Ok(Page::new(companies, request, total.max(0) as u64))
    }

    async fn update(&self, company: &Company) -> AppResult<Company> {
        let result = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = $2, cnpj = $3, address = $4, phone = $5,
                spaces_for_cars = $6, spaces_for_motorcycles = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.cnpj)
        .bind(&company.address)
        .bind(&company.phone)
        .bind(company.spaces_for_cars)
        .bind(company.spaces_for_motorcycles)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Company"))?
        .ok_or_else(|| not_found_error("Company", &company.id.to_string()))?;

        Ok(result)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Company", &id.to_string()));
        }

        Ok(())
    }
}
