//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `/api` plus the health probes.
//! Error bodies are described through the wrappers in
//! [`crate::inbound::http::schemas`] so domain types stay free of utoipa.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::dto::{
    CompanyPage, CompanyResponse, CreateCompanyRequest, CreateUserRequest, LoginRequest,
    TokenResponse, UserPage, UserResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ViolationSchema};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Adds the bearer token scheme issued by `POST /api/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Tenant directory API",
        description = "Companies and their users, scoped per tenant and authenticated with bearer tokens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearerAuth" = [])),
    paths(
        crate::inbound::http::login::login,
        crate::inbound::http::companies::list_companies,
        crate::inbound::http::companies::get_company,
        crate::inbound::http::companies::create_company,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CompanyPage,
        CompanyResponse,
        CreateCompanyRequest,
        CreateUserRequest,
        LoginRequest,
        TokenResponse,
        UserPage,
        UserResponse,
        ErrorSchema,
        ErrorCodeSchema,
        ViolationSchema,
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "companies", description = "Tenant companies"),
        (name = "users", description = "Users scoped to their company"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/login")]
    #[case("/api/companies")]
    #[case("/api/companies/{id}")]
    #[case("/api/users")]
    #[case("/api/users/{id}")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[test]
    fn user_response_has_no_password_field() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get("UserResponse").expect("UserResponse schema");

        assert_object_schema_has_field(user, "email");
        assert_object_schema_has_field(user, "company");
        match user {
            RefOr::T(Schema::Object(obj)) => {
                assert!(!obj.properties.contains_key("plainPassword"));
                assert!(!obj.properties.contains_key("password"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_is_registered_under_its_wire_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }
}
