//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! tests can assemble it over the memory store.

use std::sync::Arc;

use crate::domain::ports::{
    CompaniesCommand, CompaniesQuery, LoginService, UsersCommand, UsersQuery,
};

/// Port bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub companies: Arc<dyn CompaniesQuery>,
    pub companies_command: Arc<dyn CompaniesCommand>,
    pub users: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
}

impl HttpState {
    /// Build state from a login service and one service implementing every
    /// directory port.
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use tenant_directory::domain::{DirectoryLoginService, DirectoryService};
    /// use tenant_directory::inbound::http::state::HttpState;
    /// use tenant_directory::outbound::memory::MemoryDirectoryStore;
    /// use tenant_directory::outbound::security::{Argon2PasswordHasher, JwtTokenService};
    ///
    /// let store = Arc::new(MemoryDirectoryStore::default());
    /// let hasher = Arc::new(Argon2PasswordHasher::default());
    /// let tokens = Arc::new(JwtTokenService::new(b"secret", "tenant-directory", 3600));
    /// let directory = Arc::new(DirectoryService::new(store.clone(), store.clone(), hasher.clone()));
    /// let login = Arc::new(DirectoryLoginService::new(store, hasher, tokens));
    /// let state = HttpState::from_directory(login, directory);
    /// ```
    pub fn from_directory<S>(login: Arc<dyn LoginService>, directory: Arc<S>) -> Self
    where
        S: CompaniesQuery + CompaniesCommand + UsersQuery + UsersCommand + 'static,
    {
        Self {
            login,
            companies: directory.clone(),
            companies_command: directory.clone(),
            users: directory.clone(),
            users_command: directory,
        }
    }
}
