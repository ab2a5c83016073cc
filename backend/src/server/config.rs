//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use tenant_directory::outbound::persistence::DbPool;
use tenant_directory::outbound::security::{Argon2PasswordHasher, JwtTokenService};

/// Everything needed to assemble the adapters behind the HTTP surface.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: Arc<JwtTokenService>,
    pub(crate) hasher: Arc<Argon2PasswordHasher>,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: JwtTokenService) -> Self {
        Self {
            bind_addr,
            tokens: Arc::new(tokens),
            hasher: Arc::new(Argon2PasswordHasher::default()),
            db_pool: None,
        }
    }

    /// Store data in Postgres instead of memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[cfg_attr(not(test), expect(dead_code, reason = "cheap hashing for tests only"))]
    #[must_use]
    pub fn with_hasher(mut self, hasher: Argon2PasswordHasher) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }
}
