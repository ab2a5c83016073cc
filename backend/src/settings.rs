//! Process configuration loaded via OrthoConfig.

use std::fmt;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;
const DEFAULT_TOKEN_ISSUER: &str = "tenant-directory";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const EPHEMERAL_SECRET_LEN: usize = 32;

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("DIRECTORY_JWT_SECRET must be set")]
    MissingJwtSecret,
}

/// Server, database and token settings.
#[derive(Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    pub bind_addr: Option<String>,
    /// Postgres URL; without one the process keeps data in memory.
    pub database_url: Option<String>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    pub token_ttl_secs: Option<u64>,
    pub token_issuer: Option<String>,
    pub pool_max_size: Option<u32>,
}

impl fmt::Debug for DirectorySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectorySettings")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("token_issuer", &self.token_issuer)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

impl DirectorySettings {
    /// Socket address to listen on.
    ///
    /// # Errors
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.is_empty())
    }

    /// Signing secret bytes.
    ///
    /// When no secret is configured and `allow_ephemeral` is set, a random
    /// secret is generated; tokens then die with the process.
    ///
    /// # Errors
    /// [`SettingsError::MissingJwtSecret`] when no secret is configured and
    /// ephemeral secrets are not allowed.
    pub fn jwt_secret(&self, allow_ephemeral: bool) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        match self.jwt_secret.as_deref().filter(|secret| !secret.is_empty()) {
            Some(secret) => Ok(Zeroizing::new(secret.as_bytes().to_vec())),
            None if allow_ephemeral => {
                let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
                rand::thread_rng().fill(bytes.as_mut_slice());
                Ok(Zeroizing::new(bytes))
            }
            None => Err(SettingsError::MissingJwtSecret),
        }
    }

    pub fn token_ttl_secs(&self) -> u64 {
        self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS)
    }

    pub fn token_issuer(&self) -> &str {
        self.token_issuer.as_deref().unwrap_or(DEFAULT_TOKEN_ISSUER)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}
