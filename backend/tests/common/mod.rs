//! Shared harness for directory integration tests.
//!
//! Wires the real services over the in-memory store and mounts the API the
//! way the binary does, minus the network listener.

#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::Arc;

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use serde_json::json;
use zeroize::Zeroizing;

use tenant_directory::Trace;
use tenant_directory::domain::ports::UsersCommand;
use tenant_directory::domain::{
    Caller, DirectoryLoginService, DirectoryService, Role, User, UserId, UserInput,
};
use tenant_directory::inbound::http::configure;
use tenant_directory::inbound::http::state::HttpState;
use tenant_directory::outbound::memory::MemoryDirectoryStore;
use tenant_directory::outbound::security::{Argon2PasswordHasher, JwtTokenService};

pub const PASSWORD: &str = "123456";

pub type Directory =
    DirectoryService<MemoryDirectoryStore, MemoryDirectoryStore, Argon2PasswordHasher>;

pub struct Harness {
    pub state: HttpState,
    pub directory: Arc<Directory>,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDirectoryStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::with_costs(8, 1, 1).expect("cheap params"));
        let tokens = Arc::new(JwtTokenService::new(
            b"integration-secret",
            "tenant-directory",
            300,
        ));
        let directory = Arc::new(DirectoryService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&hasher),
        ));
        let login = Arc::new(DirectoryLoginService::new(store, hasher, tokens));
        Self {
            state: HttpState::from_directory(login, Arc::clone(&directory)),
            directory,
        }
    }

    /// Create the first super admin outside the API, as an operator would.
    pub async fn bootstrap_super_admin(&self, email: &str) -> User {
        let system = Caller::new(UserId::random(), Role::SuperAdmin, None);
        self.directory
            .create_user(
                Some(&system),
                UserInput {
                    name: Some("Root Admin".to_owned()),
                    email: Some(email.to_owned()),
                    role: Some(Role::SuperAdmin.as_str().to_owned()),
                    plain_password: Some(Zeroizing::new(PASSWORD.to_owned())),
                    company: None,
                },
            )
            .await
            .expect("bootstrap super admin")
    }

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
            .wrap(Trace)
            .configure(configure)
    }
}

pub fn login_request(email: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}
