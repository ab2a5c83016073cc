//! Bearer-token authentication for resource routes.
//!
//! [`AuthenticatedCaller`] is an extractor: adding it to a handler signature
//! makes the route require `Authorization: Bearer <token>`. The caller is
//! resolved through [`LoginService::resolve_caller`] on every request.
//!
//! [`LoginService::resolve_caller`]: crate::domain::ports::LoginService::resolve_caller

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Caller, Error};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";
const MISSING_TOKEN: &str = "Missing bearer token.";

/// Caller behind a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub Caller);

impl AuthenticatedCaller {
    /// Borrow the caller.
    #[must_use]
    pub const fn caller(&self) -> &Caller {
        &self.0
    }
}

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))?;
    raw.strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| Error::unauthorized(MISSING_TOKEN))
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let token = bearer_token(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = token?;
            state.login.resolve_caller(&token).await.map(Self)
        })
    }
}
