//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Page, PageRequest, User, UserId, VisibilityFilter};

use super::diesel_basic_error_mapping::DieselFailure;
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;
use super::visibility::{Scope, from_sql_count, to_sql_bigint};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<DieselFailure>) -> UserPersistenceError {
    match failure.into() {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate_email(),
        DieselFailure::ForeignKeyViolation => UserPersistenceError::unknown_company(),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    User::try_from(row).map_err(|message| {
        warn!(%message, "unreadable user row");
        UserPersistenceError::query(message)
    })
}

fn scoped(scope: Scope) -> users::BoxedQuery<'static, Pg> {
    let query = users::table.into_boxed();
    match scope {
        Scope::Tenant(id) => query.filter(users::company_id.eq(id)),
        Scope::All | Scope::Nothing => query,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_failure)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        filter: &VisibilityFilter,
    ) -> Result<Option<User>, UserPersistenceError> {
        let scope = Scope::from(filter);
        if scope == Scope::Nothing {
            return Ok(None);
        }
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<UserRow> = scoped(scope)
            .filter(users::id.eq(*id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_failure)?;
        row.map(row_to_user).transpose()
    }

    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError> {
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
        let rows: Vec<UserRow> = scoped(scope)
            .select(UserRow::as_select())
            .order_by((users::name.asc(), users::email.asc()))
            .offset(to_sql_bigint(page.offset()))
            .limit(i64::from(page.limit()))
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        let items = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, page, from_sql_count(total)))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let removed = diesel::delete(users::table.filter(users::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(removed > 0)
    }
}
