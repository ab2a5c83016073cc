//! Credential manager: turns plaintext passwords into stored hashes.
//!
//! [`prepare_for_persist`] is the only place plaintext meets the hasher. It
//! runs after validation and authorization and before the store sees the
//! user, and calling it twice is harmless.

use std::fmt;

use tracing::debug;

use super::ports::{PasswordHasher, PasswordHasherError};
use super::user::UserDraft;

/// One-way password hash in PHC string form.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A draft reached the store boundary without prepared credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UnpreparedCredentials {
    /// The plaintext password is still attached.
    #[error("plain password has not been cleared")]
    PlainPasswordPresent,
    /// No hash was computed.
    #[error("password hash is missing")]
    MissingHash,
}

/// Hash and clear the draft's plaintext password.
///
/// A draft without plaintext is left untouched, so a second call is a
/// no-op.
///
/// # Errors
/// Propagates hasher failures; the plaintext is dropped either way.
pub fn prepare_for_persist(
    draft: &mut UserDraft,
    hasher: &dyn PasswordHasher,
) -> Result<(), PasswordHasherError> {
    let Some(plain) = draft.take_plain_password() else {
        debug!("credentials already prepared");
        return Ok(());
    };
    let hash = hasher.hash(plain.as_str(), draft)?;
    draft.set_password_hash(hash);
    Ok(())
}
