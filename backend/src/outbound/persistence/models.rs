//! Diesel row structs. Internal to the persistence adapter.

use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{Company, CompanyId, NewUserRecord, PasswordHash, Role, User, UserId};

use super::schema::{companies, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = companies)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CompanyRow {
    pub id: Uuid,
    pub name: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self::new(CompanyId::from_uuid(row.id), row.name)
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = companies)]
pub(crate) struct NewCompanyRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

impl<'a> From<&'a Company> for NewCompanyRow<'a> {
    fn from(company: &'a Company) -> Self {
        Self {
            id: *company.id().as_uuid(),
            name: company.name(),
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub company_id: Option<Uuid>,
    pub password_hash: String,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role: Role = row
            .role
            .parse()
            .map_err(|err| format!("user {}: {err}", row.id))?;
        Ok(Self::new(
            UserId::from_uuid(row.id),
            NewUserRecord {
                name: row.name,
                email: row.email,
                role,
                company: row.company_id.map(CompanyId::from_uuid),
                password_hash: PasswordHash::new(row.password_hash),
            },
        ))
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub company_id: Option<Uuid>,
    pub password_hash: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name(),
            email: user.email(),
            role: user.role().as_str(),
            company_id: user.company().map(|id| *id.as_uuid()),
            password_hash: user.password_hash().as_str(),
        }
    }
}
