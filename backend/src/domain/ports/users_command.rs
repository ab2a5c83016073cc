//! Driving port for user writes.

use async_trait::async_trait;

use crate::domain::{Caller, Error, User, UserId, UserInput};

/// User write use-cases.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Validate, authorize, hash credentials and store a new user.
    async fn create_user(&self, caller: Option<&Caller>, input: UserInput)
    -> Result<User, Error>;

    /// Remove a user. Denied callers get `forbidden` even for unknown ids.
    async fn delete_user(&self, caller: Option<&Caller>, id: &UserId) -> Result<(), Error>;
}
