//! Driving port for user reads.
//!
//! Results are already narrowed to the caller's tenant; a user outside it is
//! reported exactly like a missing one.

use async_trait::async_trait;

use crate::domain::{Caller, Error, Page, PageRequest, User, UserId};

/// User read use-cases.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// One page of users visible to `caller`.
    async fn list_users(
        &self,
        caller: Option<&Caller>,
        page: PageRequest,
    ) -> Result<Page<User>, Error>;

    /// A single visible user, or `not_found`.
    async fn get_user(&self, caller: Option<&Caller>, id: &UserId) -> Result<User, Error>;
}
