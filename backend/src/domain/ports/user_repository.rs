//! Driven port for user storage.
use async_trait::async_trait;

use crate::domain::{Page, PageRequest, User, UserId, VisibilityFilter};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user store adapters.
    pub enum UserPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed.
        Query { message: String } => "user store query failed: {message}",
        /// Another user already uses this email.
        DuplicateEmail => "user email already exists",
        /// The referenced company does not exist.
        UnknownCompany => "user references a missing company",
    }
}

/// User persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user with an already hashed password.
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user when it exists and passes `filter`.
    async fn find_by_id(
        &self,
        id: &UserId,
        filter: &VisibilityFilter,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email, ignoring tenancy.
    ///
    /// Used by login and uniqueness checks, never by caller-facing reads.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// One page of visible users ordered by name then email.
    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError>;

    /// Remove a user; `false` when nothing matched.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
