//! Company and user directory use-cases.
//!
//! Every write follows the same order: gather store facts, validate, ask the
//! access policy, prepare credentials, store. Nothing is written until all of
//! these have passed. Reads hand the policy's [`VisibilityFilter`] to the
//! repository, so rows outside the caller's tenant never leave the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::access_policy::{
    can_create_company, can_create_user, can_delete_user, visibility_filter_for_companies,
    visibility_filter_for_users,
};
use crate::domain::credentials::prepare_for_persist;
use crate::domain::ports::{
    CompaniesCommand, CompaniesQuery, CompanyPersistenceError, CompanyRepository, PasswordHasher,
    UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::validation::{
    CompanyFacts, UserFacts, Violation, parse_company_reference, validate_new_company,
    validate_new_user,
};
use crate::domain::{
    Caller, Company, CompanyId, CompanyInput, Error, NewUserRecord, Page, PageRequest, User,
    UserId, UserInput, VisibilityFilter,
};

const COMPANY_NOT_FOUND: &str = "Company not found.";
const USER_NOT_FOUND: &str = "User not found.";

/// Directory service implementing the company and user driving ports.
pub struct DirectoryService<C, U, H> {
    companies: Arc<C>,
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<C, U, H> Clone for DirectoryService<C, U, H> {
    fn clone(&self) -> Self {
        Self {
            companies: Arc::clone(&self.companies),
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<C, U, H> DirectoryService<C, U, H> {
    /// Wire the service to its stores and hasher.
    pub const fn new(companies: Arc<C>, users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            companies,
            users,
            hasher,
        }
    }
}

fn map_company_error(error: CompanyPersistenceError) -> Error {
    match error {
        CompanyPersistenceError::Connection { message } => {
            warn!(%message, "company store unavailable");
            Error::service_unavailable(format!("company store unavailable: {message}"))
        }
        CompanyPersistenceError::Query { message } => {
            Error::internal(format!("company store error: {message}"))
        }
        CompanyPersistenceError::DuplicateName => {
            Error::validation_failed(vec![Violation::company_name_taken()])
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user store unavailable");
            Error::service_unavailable(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user store error: {message}"))
        }
        UserPersistenceError::DuplicateEmail => {
            Error::validation_failed(vec![Violation::email_taken()])
        }
        UserPersistenceError::UnknownCompany => {
            Error::validation_failed(vec![Violation::unknown_company()])
        }
    }
}

fn denied(operation: &'static str, caller: Option<&Caller>) -> Error {
    debug!(
        operation,
        caller = ?caller.map(Caller::user_id),
        role = ?caller.map(Caller::role),
        "access policy denied request"
    );
    Error::access_denied()
}

impl<C, U, H> DirectoryService<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    async fn company_facts(&self, input: &CompanyInput) -> Result<CompanyFacts, Error> {
        let name_taken = match input.name.as_deref() {
            Some(name) if !name.is_empty() => self
                .companies
                .exists_by_name(name)
                .await
                .map_err(map_company_error)?,
            _ => false,
        };
        Ok(CompanyFacts { name_taken })
    }

    async fn user_facts(&self, input: &UserInput) -> Result<UserFacts, Error> {
        let email_taken = match input.email.as_deref() {
            Some(email) if !email.is_empty() => self
                .users
                .find_by_email(email)
                .await
                .map_err(map_user_error)?
                .is_some(),
            _ => false,
        };
        let company_exists = match input.company.as_deref().and_then(parse_company_reference) {
            Some(id) => self
                .companies
                .find_by_id(&id, &VisibilityFilter::Unrestricted)
                .await
                .map_err(map_company_error)?
                .is_some(),
            None => false,
        };
        Ok(UserFacts {
            email_taken,
            company_exists,
        })
    }
}

#[async_trait]
impl<C, U, H> CompaniesQuery for DirectoryService<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    async fn list_companies(
        &self,
        caller: Option<&Caller>,
        page: PageRequest,
    ) -> Result<Page<Company>, Error> {
        let filter = visibility_filter_for_companies(caller);
        self.companies
            .list(&filter, page)
            .await
            .map_err(map_company_error)
    }

    async fn get_company(
        &self,
        caller: Option<&Caller>,
        id: &CompanyId,
    ) -> Result<Company, Error> {
        let filter = visibility_filter_for_companies(caller);
        self.companies
            .find_by_id(id, &filter)
            .await
            .map_err(map_company_error)?
            .ok_or_else(|| Error::not_found(COMPANY_NOT_FOUND))
    }
}

#[async_trait]
impl<C, U, H> CompaniesCommand for DirectoryService<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    async fn create_company(
        &self,
        caller: Option<&Caller>,
        input: CompanyInput,
    ) -> Result<Company, Error> {
        let facts = self.company_facts(&input).await?;
        let draft = validate_new_company(&input, facts).map_err(Error::validation_failed)?;
        if !can_create_company(caller) {
            return Err(denied("create_company", caller));
        }

        let company = draft.into_company();
        self.companies
            .insert(&company)
            .await
            .map_err(map_company_error)?;
        info!(company_id = %company.id(), name = company.name(), "company created");
        Ok(company)
    }
}

#[async_trait]
impl<C, U, H> UsersQuery for DirectoryService<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher,
{
    async fn list_users(
        &self,
        caller: Option<&Caller>,
        page: PageRequest,
    ) -> Result<Page<User>, Error> {
        let filter = visibility_filter_for_users(caller);
        self.users
            .list(&filter, page)
            .await
            .map_err(map_user_error)
    }

    async fn get_user(&self, caller: Option<&Caller>, id: &UserId) -> Result<User, Error> {
        let filter = visibility_filter_for_users(caller);
        self.users
            .find_by_id(id, &filter)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<C, U, H> UsersCommand for DirectoryService<C, U, H>
where
    C: CompanyRepository,
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn create_user(&self, caller: Option<&Caller>, input: UserInput) -> Result<User, Error> {
        let facts = self.user_facts(&input).await?;
        let mut draft = validate_new_user(input, facts).map_err(Error::validation_failed)?;
        if !can_create_user(caller, &draft) {
            return Err(denied("create_user", caller));
        }

        // Argon2 is CPU-bound; keep it off the async workers.
        let hasher = Arc::clone(&self.hasher);
        let draft = tokio::task::spawn_blocking(move || {
            prepare_for_persist(&mut draft, &*hasher).map(|()| draft)
        })
        .await
        .map_err(|err| Error::internal(format!("credential preparation aborted: {err}")))?
        .map_err(|err| Error::internal(format!("credential preparation failed: {err}")))?;
        let record = NewUserRecord::try_from(draft)
            .map_err(|err| Error::internal(format!("credentials not prepared: {err}")))?;
        let user = User::new(UserId::random(), record);

        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(
            user_id = %user.id(),
            role = %user.role(),
            company_id = ?user.company().map(ToString::to_string),
            "user created"
        );
        Ok(user)
    }

    async fn delete_user(&self, caller: Option<&Caller>, id: &UserId) -> Result<(), Error> {
        if !can_delete_user(caller) {
            return Err(denied("delete_user", caller));
        }
        let removed = self.users.delete(id).await.map_err(map_user_error)?;
        if !removed {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
