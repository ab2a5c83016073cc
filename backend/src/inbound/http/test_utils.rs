//! Test harness for the HTTP adapters.
//!
//! Builds the real services over the in-memory store with cheap Argon2
//! parameters, and offers helpers to seed tenants and mint bearer tokens.

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, web};
use zeroize::Zeroizing;

use crate::domain::ports::{CompaniesCommand, TokenService, UsersCommand};
use crate::domain::{
    Caller, Company, CompanyInput, DirectoryLoginService, DirectoryService, Role, User, UserId,
    UserInput,
};
use crate::outbound::memory::MemoryDirectoryStore;
use crate::outbound::security::{Argon2PasswordHasher, JwtTokenService};

use super::configure;
use super::state::HttpState;

/// Password given to every seeded user.
pub const TEST_PASSWORD: &str = "123456";

type Directory = DirectoryService<MemoryDirectoryStore, MemoryDirectoryStore, Argon2PasswordHasher>;

/// Services wired over one shared memory store.
pub struct TestDirectory {
    pub state: HttpState,
    directory: Arc<Directory>,
    tokens: Arc<JwtTokenService>,
    seeder: Caller,
}

impl TestDirectory {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDirectoryStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::with_costs(8, 1, 1).expect("cheap params"));
        let tokens = Arc::new(JwtTokenService::new(b"test-secret", "tenant-directory", 3600));
        let directory = Arc::new(DirectoryService::new(
            store.clone(),
            store.clone(),
            hasher.clone(),
        ));
        let login = Arc::new(DirectoryLoginService::new(store, hasher, tokens.clone()));
        Self {
            state: HttpState::from_directory(login, directory.clone()),
            directory,
            tokens,
            seeder: Caller::new(UserId::random(), Role::SuperAdmin, None),
        }
    }

    /// Create a company directly through the service.
    pub async fn company(&self, name: &str) -> Company {
        self.directory
            .create_company(
                Some(&self.seeder),
                CompanyInput {
                    name: Some(name.to_owned()),
                },
            )
            .await
            .expect("seed company")
    }

    /// Create a user with [`TEST_PASSWORD`].
    pub async fn user(
        &self,
        name: &str,
        email: &str,
        role: Role,
        company: Option<&Company>,
    ) -> User {
        self.directory
            .create_user(
                Some(&self.seeder),
                UserInput {
                    name: Some(name.to_owned()),
                    email: Some(email.to_owned()),
                    role: Some(role.as_str().to_owned()),
                    plain_password: Some(Zeroizing::new(TEST_PASSWORD.to_owned())),
                    company: company.map(|company| company.id().to_string()),
                },
            )
            .await
            .expect("seed user")
    }

    /// `Authorization` header carrying a fresh token for `user`.
    pub fn bearer(&self, user: &User) -> (header::HeaderName, String) {
        let token = self.tokens.issue(user.id()).expect("token issued");
        (header::AUTHORIZATION, format!("Bearer {}", token.as_str()))
    }

    /// Application with every API route mounted.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.state.clone()))
            .configure(configure)
    }
}

impl Default for TestDirectory {
    fn default() -> Self {
        Self::new()
    }
}
