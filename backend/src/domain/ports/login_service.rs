//! Driving port for authentication.
//!
//! Inbound adapters exchange credentials for a token and tokens for a
//! [`Caller`] without knowing how users, hashes or tokens are stored.

use async_trait::async_trait;

use crate::domain::{AccessToken, Caller, Error, LoginCredentials};

/// Authentication use-cases.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a bearer token.
    ///
    /// Unknown email and wrong password both fail with the same
    /// `unauthorized` error.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error>;

    /// Verify a bearer token and load the caller it belongs to.
    ///
    /// The caller is read from the store on each call, so deleted users and
    /// role changes take effect immediately.
    async fn resolve_caller(&self, token: &str) -> Result<Caller, Error>;
}
