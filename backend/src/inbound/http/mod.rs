//! HTTP inbound adapter exposing the directory REST API.

pub mod auth;
pub mod companies;
pub mod dto;
pub mod error;
pub mod health;
pub mod login;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope and extractor error handling.
///
/// Callers must also register `web::Data<HttpState>`.
///
/// ```
/// use actix_web::App;
/// use tenant_directory::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(
            web::scope("/api")
                .service(login::login)
                .service(companies::list_companies)
                .service(companies::get_company)
                .service(companies::create_company)
                .service(users::list_users)
                .service(users::get_user)
                .service(users::create_user)
                .service(users::delete_user),
        );
}
