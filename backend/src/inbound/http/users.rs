//! User endpoints.
//!
//! ```text
//! GET    /api/users?page=1
//! GET    /api/users/{id}
//! POST   /api/users {"name":"Jane Doe","email":"jane@doe.com","role":"ROLE_USER",
//!                    "plainPassword":"123456","company":"/api/companies/{id}"}
//! DELETE /api/users/{id}
//! ```
//!
//! Reads are scoped to the caller's company unless the caller is a super
//! admin; a user outside that scope answers 404.

use actix_web::{HttpResponse, delete, get, post, web};

use crate::domain::access_policy::can_delete_user;
use crate::domain::{Error, PageRequest, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::AuthenticatedCaller;
use crate::inbound::http::dto::{CreateUserRequest, PageQuery, UserPage, UserResponse};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn parse_user_id(raw: &str) -> ApiResult<UserId> {
    raw.parse().map_err(|_| Error::not_found("User not found."))
}

/// List users visible to the caller, ordered by name then email.
#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = UserPage),
        (status = 400, description = "Invalid page", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<UserPage>> {
    let page = PageRequest::try_from(query.into_inner())?;
    let users = state.users.list_users(Some(caller.caller()), page).await?;
    Ok(web::Json(users.into()))
}

/// Fetch one visible user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 404, description = "No such user, or outside the caller's company", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(Some(caller.caller()), &id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user.
///
/// Super admins may create any user; company admins only plain users in
/// their own company.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body", body = ErrorSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Access denied", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let user = state
        .users_command
        .create_user(Some(caller.caller()), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Delete a user. Super admins only.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 403, description = "Access denied", body = ErrorSchema),
        (status = 404, description = "No such user", body = ErrorSchema),
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedCaller,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    // Deny before parsing so a non-admin learns nothing about the id.
    let caller = caller.caller();
    if !can_delete_user(Some(caller)) {
        return Err(Error::access_denied());
    }
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(Some(caller), &id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
