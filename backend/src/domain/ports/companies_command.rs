//! Driving port for company writes.

use async_trait::async_trait;

use crate::domain::{Caller, Company, CompanyInput, Error};

/// Company write use-cases.
#[async_trait]
pub trait CompaniesCommand: Send + Sync {
    /// Validate, authorize and store a new company.
    ///
    /// Validation failures are reported before authorization.
    async fn create_company(
        &self,
        caller: Option<&Caller>,
        input: CompanyInput,
    ) -> Result<Company, Error>;
}
