//! Directory roles.
//!
//! The directory knows exactly three roles. Their wire spelling carries the
//! `ROLE_` prefix used by the login token consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role held by a directory user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Member of a single company.
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrator scoped to a single company.
    #[serde(rename = "ROLE_COMPANY_ADMIN")]
    CompanyAdmin,
    /// Administrator of the whole directory; never attached to a company.
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

/// Raised when a string does not name one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 3] = [Self::User, Self::CompanyAdmin, Self::SuperAdmin];

    /// Wire spelling of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::CompanyAdmin => "ROLE_COMPANY_ADMIN",
            Self::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }

    /// Whether users holding this role must belong to a company.
    ///
    /// ```
    /// use tenant_directory::domain::Role;
    ///
    /// assert!(Role::CompanyAdmin.requires_company());
    /// assert!(!Role::SuperAdmin.requires_company());
    /// ```
    #[must_use]
    pub const fn requires_company(self) -> bool {
        match self {
            Self::User | Self::CompanyAdmin => true,
            Self::SuperAdmin => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| UnknownRole(value.to_owned()))
    }
}
