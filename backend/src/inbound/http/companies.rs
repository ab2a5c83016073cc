//! Company endpoints.
//!
//! ```text
//! GET  /api/companies?page=1
//! GET  /api/companies/{id}
//! POST /api/companies {"name":"Acme Corp"}
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{CompanyId, Error, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::dto::{CompanyPage, CompanyResponse, CreateCompanyRequest, PageQuery};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn parse_company_id(raw: &str) -> ApiResult<CompanyId> {
    raw.parse()
        .map_err(|_| Error::not_found("Company not found."))
}

/// List companies, ordered by name.
#[utoipa::path(
    get,
    path = "/api/companies",
    params(PageQuery),
    responses(
        (status = 200, description = "Companies", body = CompanyPage),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
    ),
    tags = ["companies"],
    operation_id = "listCompanies"
)]
#[get("/companies")]
pub async fn list_companies(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<CompanyPage>> {
    let page = PageRequest::try_from(query.into_inner())?;
    let companies = state
        .companies
        .list_companies(Some(caller.caller()), page)
        .await?;
    Ok(web::Json(companies.into()))
}

/// Fetch one company.
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(("id" = String, Path, description = "Company id")),
    responses(
        (status = 200, description = "Company", body = CompanyResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such company", body = ErrorSchema),
    ),
    tags = ["companies"],
    operation_id = "getCompany"
)]
#[get("/companies/{id}")]
pub async fn get_company(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<CompanyResponse>> {
    let id = parse_company_id(&path)?;
    let company = state.companies.get_company(Some(caller.caller()), &id).await?;
    Ok(web::Json(company.into()))
}

/// Create a company. Super admins only.
#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 201, description = "Company created", body = CompanyResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Access denied", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["companies"],
    operation_id = "createCompany"
)]
#[post("/companies")]
pub async fn create_company(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateCompanyRequest>,
) -> ApiResult<HttpResponse> {
    let company = state
        .companies_command
        .create_company(Some(caller.caller()), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(CompanyResponse::from(company)))
}
