//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use tenant_directory::domain::ports::{CompanyRepository, UserRepository};
use tenant_directory::domain::{DirectoryLoginService, DirectoryService};
use tenant_directory::inbound::http::state::HttpState;
use tenant_directory::outbound::memory::MemoryDirectoryStore;
use tenant_directory::outbound::persistence::{DieselCompanyRepository, DieselUserRepository};
use tenant_directory::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::ServerConfig;

fn wire<C, U>(
    companies: Arc<C>,
    users: Arc<U>,
    hasher: Arc<Argon2PasswordHasher>,
    tokens: Arc<JwtTokenService>,
) -> HttpState
where
    C: CompanyRepository + 'static,
    U: UserRepository + 'static,
{
    let directory = Arc::new(DirectoryService::new(
        companies,
        Arc::clone(&users),
        Arc::clone(&hasher),
    ));
    let login = Arc::new(DirectoryLoginService::new(users, hasher, tokens));
    HttpState::from_directory(login, directory)
}

/// Diesel repositories when a pool is configured, the memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let hasher = Arc::clone(&config.hasher);
    let tokens = Arc::clone(&config.tokens);
    match &config.db_pool {
        Some(pool) => wire(
            Arc::new(DieselCompanyRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
            hasher,
            tokens,
        ),
        None => {
            let store = Arc::new(MemoryDirectoryStore::new());
            wire(Arc::clone(&store), store, hasher, tokens)
        }
    }
}
