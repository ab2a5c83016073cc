//! Driven port for one-way password hashing.

use crate::domain::{PasswordHash, UserDraft};

use super::define_port_error;

define_port_error! {
    /// Hashing backend failures.
    pub enum PasswordHasherError {
        /// Producing a hash failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Password hashing algorithm.
///
/// Implementations salt every hash, so hashing the same plaintext twice gives
/// different output that both verify.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plain` for the account described by `owner`.
    ///
    /// # Errors
    /// [`PasswordHasherError::Hashing`] when the backend fails.
    fn hash(&self, plain: &str, owner: &UserDraft) -> Result<PasswordHash, PasswordHasherError>;

    /// Whether `plain` matches `hash`.
    ///
    /// # Errors
    /// [`PasswordHasherError::MalformedHash`] when `hash` cannot be decoded.
    fn verify(&self, plain: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
