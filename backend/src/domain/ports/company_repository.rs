//! Driven port for company storage.

use async_trait::async_trait;

use crate::domain::{Company, CompanyId, Page, PageRequest, VisibilityFilter};

use super::define_port_error;

define_port_error! {
    /// Failures raised by company store adapters.
    pub enum CompanyPersistenceError {
        /// The store could not be reached.
        Connection { message: String } => "company store connection failed: {message}",
        /// A query or mutation failed.
        Query { message: String } => "company store query failed: {message}",
        /// Another company already uses this name.
        DuplicateName => "company name already exists",
    }
}

/// Company persistence.
///
/// Reads take the [`VisibilityFilter`] produced by the access policy and
/// apply it inside the query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Store a new company.
    ///
    /// Name uniqueness is checked atomically with the write; a clash yields
    /// [`CompanyPersistenceError::DuplicateName`].
    async fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError>;

    /// Fetch a company when it exists and passes `filter`.
    async fn find_by_id(
        &self,
        id: &CompanyId,
        filter: &VisibilityFilter,
    ) -> Result<Option<Company>, CompanyPersistenceError>;

    /// Whether any company uses exactly `name`.
    async fn exists_by_name(&self, name: &str) -> Result<bool, CompanyPersistenceError>;

    /// One page of visible companies ordered by name.
    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<Company>, CompanyPersistenceError>;
}
