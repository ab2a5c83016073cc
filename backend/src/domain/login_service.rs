//! Password login and bearer-token caller resolution.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccessToken, LoginService, PasswordHasher, TokenError, TokenService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Caller, Error, LoginCredentials, PasswordHash, VisibilityFilter};

/// Message for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
const INVALID_TOKEN: &str = "Invalid or expired token.";

/// Well-formed Argon2id hash, at the default costs, that no password matches.
///
/// Logins for unknown emails are verified against it so they cost the same
/// as a wrong password.
pub const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$XJG/jN6W51jvdhecmpncmA$7DqkV8oBDYABpxBWakdIduKWOsW/024d2kja80VMHG0";

/// [`LoginService`] backed by the user store.
pub struct DirectoryLoginService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> DirectoryLoginService<U, H, T> {
    /// Wire the service.
    pub const fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user store unavailable during authentication");
            Error::service_unavailable("user store unavailable")
        }
        other => Error::internal(format!("user lookup failed: {other}")),
    }
}

impl<U, H, T> DirectoryLoginService<U, H, T>
where
    H: PasswordHasher + 'static,
{
    /// Verify on the blocking pool; Argon2 is too slow for a worker thread.
    async fn verify_password(&self, plain: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(plain.as_str(), &hash))
            .await
            .map_err(|err| Error::internal(format!("password verification aborted: {err}")))?
            .map_err(|err| Error::internal(format!("password verification failed: {err}")))
    }
}

#[async_trait]
impl<U, H, T> LoginService for DirectoryLoginService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<AccessToken, Error> {
        let found = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;

        let Some(user) = found else {
            // Result ignored: the hash only equalises timing.
            let _ = self
                .verify_password(credentials.password(), PasswordHash::new(DUMMY_HASH))
                .await;
            debug!("login for unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password(), user.password_hash().clone())
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "login with wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        self.tokens
            .issue(user.id())
            .map_err(|err| Error::internal(format!("token issue failed: {err}")))
    }

    async fn resolve_caller(&self, token: &str) -> Result<Caller, Error> {
        let user_id = self.tokens.verify(token).map_err(|err| match err {
            TokenError::Invalid { message } => {
                debug!(%message, "bearer token rejected");
                Error::unauthorized(INVALID_TOKEN)
            }
            TokenError::Issue { message } => Error::internal(message),
        })?;

        let user = self
            .users
            .find_by_id(&user_id, &VisibilityFilter::Unrestricted)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                debug!(%user_id, "token subject no longer exists");
                Error::unauthorized(INVALID_TOKEN)
            })?;
        Ok(Caller::from_user(&user))
    }
}
