//! Driving port for company reads.

use async_trait::async_trait;

use crate::domain::{Caller, Company, CompanyId, Error, Page, PageRequest};

/// Company read use-cases.
#[async_trait]
pub trait CompaniesQuery: Send + Sync {
    /// One page of companies visible to `caller`.
    async fn list_companies(
        &self,
        caller: Option<&Caller>,
        page: PageRequest,
    ) -> Result<Page<Company>, Error>;

    /// A single visible company, or `not_found`.
    async fn get_company(&self, caller: Option<&Caller>, id: &CompanyId)
    -> Result<Company, Error>;
}
