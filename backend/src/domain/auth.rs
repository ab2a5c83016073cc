//! Login payload primitives.
//!
//! Handlers turn raw JSON strings into [`LoginCredentials`] before calling the
//! login port, so blank input is rejected without touching the store.

use thiserror::Error;
use zeroize::Zeroizing;

/// Login payload rejected before authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was missing or empty.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Email and password presented at login.
///
/// The email is trimmed; the password is kept verbatim and wiped on drop.
///
/// ```
/// use tenant_directory::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" jane@acme.com ", "123456").expect("valid");
/// assert_eq!(creds.email(), "jane@acme.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw inputs.
    ///
    /// # Errors
    /// [`LoginValidationError`] when either part is blank.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: email.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look the account up.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext password to verify against the stored hash.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
