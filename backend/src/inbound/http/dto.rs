//! Request and response bodies for the directory API.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::domain::{
    AccessToken, Company, CompanyInput, Error, Page, PageRequest, Role, User, UserInput,
};

/// `?page=N` on collection routes.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; defaults to 1.
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = Error;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        match query.page {
            None => Ok(Self::first()),
            Some(page) => Self::new(page).map_err(|err| Error::invalid_request(err.to_string())),
        }
    }
}

/// Body of `POST /api/companies`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateCompanyRequest {
    /// Unique company name, 5 to 100 characters.
    #[schema(example = "Acme Corp")]
    pub name: Option<String>,
}

impl From<CreateCompanyRequest> for CompanyInput {
    fn from(body: CreateCompanyRequest) -> Self {
        Self { name: body.name }
    }
}

/// Body of `POST /api/users`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "jane@doe.com")]
    pub email: Option<String>,
    #[schema(example = "ROLE_USER")]
    pub role: Option<String>,
    /// Plaintext password; hashed before storage and never returned.
    #[schema(example = "123456")]
    pub plain_password: Option<String>,
    /// Company id, bare or as `/api/companies/{id}`.
    #[schema(example = "/api/companies/7d0c3a4e-8f0b-4a43-9d1c-2b0f6c1d9e10")]
    pub company: Option<String>,
}

impl From<CreateUserRequest> for UserInput {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            name: body.name,
            email: body.email,
            role: body.role,
            plain_password: body.plain_password.map(Zeroizing::new),
            company: body.company,
        }
    }
}

/// Body of `POST /api/login`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "jane@doe.com")]
    pub email: String,
    #[schema(example = "123456")]
    pub password: String,
}

/// Successful login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
}

impl From<AccessToken> for TokenResponse {
    fn from(token: AccessToken) -> Self {
        Self {
            token: token.into_inner(),
        }
    }
}

/// A company as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CompanyResponse {
    #[schema(example = "7d0c3a4e-8f0b-4a43-9d1c-2b0f6c1d9e10")]
    pub id: Uuid,
    #[schema(example = "Acme Corp")]
    pub name: String,
}

impl From<Company> for CompanyResponse {
    fn from(company: Company) -> Self {
        Self {
            id: *company.id().as_uuid(),
            name: company.name().to_owned(),
        }
    }
}

/// A user as returned by the API; password material is never included.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = "jane@doe.com")]
    pub email: String,
    #[schema(value_type = String, example = "ROLE_USER")]
    pub role: Role,
    /// Company id; `null` for super admins.
    pub company: Option<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: *user.id().as_uuid(),
            name: user.name().to_owned(),
            email: user.email().to_owned(),
            role: user.role(),
            company: user.company().map(|id| *id.as_uuid()),
        }
    }
}

/// One page of companies.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPage {
    pub items: Vec<CompanyResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl From<Page<Company>> for CompanyPage {
    fn from(page: Page<Company>) -> Self {
        let page = page.map(CompanyResponse::from);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        }
    }
}

/// One page of users.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub items: Vec<UserResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl From<Page<User>> for UserPage {
    fn from(page: Page<User>) -> Self {
        let page = page.map(UserResponse::from);
        Self {
            items: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
        }
    }
}
