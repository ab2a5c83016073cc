//! PostgreSQL-backed `CompanyRepository`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CompanyPersistenceError, CompanyRepository};
use crate::domain::{Company, CompanyId, Page, PageRequest, VisibilityFilter};

use super::diesel_basic_error_mapping::DieselFailure;
use super::models::{CompanyRow, NewCompanyRow};
use super::pool::DbPool;
use super::schema::companies;
use super::visibility::{Scope, from_sql_count, to_sql_bigint};

/// Diesel implementation of [`CompanyRepository`].
#[derive(Clone)]
pub struct DieselCompanyRepository {
    pool: DbPool,
}

impl DieselCompanyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<DieselFailure>) -> CompanyPersistenceError {
    match failure.into() {
        DieselFailure::Connection(message) => CompanyPersistenceError::connection(message),
        DieselFailure::UniqueViolation => CompanyPersistenceError::duplicate_name(),
        DieselFailure::ForeignKeyViolation => {
            CompanyPersistenceError::query("unexpected foreign key violation")
        }
        DieselFailure::Query(message) => CompanyPersistenceError::query(message),
    }
}

fn scoped(scope: Scope) -> companies::BoxedQuery<'static, Pg> {
    let query = companies::table.into_boxed();
    match scope {
        Scope::Tenant(id) => query.filter(companies::id.eq(id)),
        Scope::All | Scope::Nothing => query,
    }
}

#[async_trait]
impl CompanyRepository for DieselCompanyRepository {
    async fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(companies::table)
            .values(NewCompanyRow::from(company))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn find_by_id(
        &self,
        id: &CompanyId,
        filter: &VisibilityFilter,
    ) -> Result<Option<Company>, CompanyPersistenceError> {
        let scope = Scope::from(filter);
        if scope == Scope::Nothing {
            return Ok(None);
        }
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<CompanyRow> = scoped(scope)
            .filter(companies::id.eq(*id.as_uuid()))
            .select(CompanyRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        Ok(row.map(Company::from))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, CompanyPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::select(diesel::dsl::exists(
            companies::table.filter(companies::name.eq(name)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_failure)
    }

    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<Company>, CompanyPersistenceError> {
        let scope = Scope::from(filter);
        if scope == Scope::Nothing {
            return Ok(Page::new(Vec::new(), page, 0));
        }
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let total: i64 = scoped(scope)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        let rows: Vec<CompanyRow> = scoped(scope)
            .select(CompanyRow::as_select())
            .order_by((companies::name.asc(), companies::id.asc()))
            .offset(to_sql_bigint(page.offset()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(Page::new(
            rows.into_iter().map(Company::from).collect(),
            page,
            from_sql_count(total),
        ))
    }
}
