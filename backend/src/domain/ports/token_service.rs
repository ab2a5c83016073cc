//! Driven port for bearer access tokens.

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Token issuing and verification failures.
    pub enum TokenError {
        /// The token is malformed, forged, expired or from another issuer.
        Invalid { message: String } => "access token rejected: {message}",
        /// Signing a new token failed.
        Issue { message: String } => "access token could not be issued: {message}",
    }
}

/// Signed bearer token handed out at login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the encoded token.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Issues tokens for users and maps presented tokens back to their subject.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token whose subject is `user`.
    ///
    /// # Errors
    /// [`TokenError::Issue`] when signing fails.
    fn issue(&self, user: &UserId) -> Result<AccessToken, TokenError>;

    /// Check signature, expiry and issuer, returning the subject.
    ///
    /// # Errors
    /// [`TokenError::Invalid`] for any token that does not check out.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
