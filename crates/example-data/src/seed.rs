//! Generated record types.

use serde::{Deserialize, Serialize};

/// Role of a generated user, using the directory's wire names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleSeed {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_COMPANY_ADMIN")]
    CompanyAdmin,
    #[serde(rename = "ROLE_SUPER_ADMIN")]
    SuperAdmin,
}

impl RoleSeed {
    /// Wire name, e.g. `ROLE_USER`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::CompanyAdmin => "ROLE_COMPANY_ADMIN",
            Self::SuperAdmin => "ROLE_SUPER_ADMIN",
        }
    }
}

/// A generated company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleCompanySeed {
    pub name: String,
}

/// A generated user.
///
/// `company` indexes into [`ExampleDirectory::companies`]; it is `None`
/// exactly for [`RoleSeed::SuperAdmin`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleUserSeed {
    pub name: String,
    pub email: String,
    pub role: RoleSeed,
    pub company: Option<usize>,
}

/// Everything one plan produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleDirectory {
    pub companies: Vec<ExampleCompanySeed>,
    pub users: Vec<ExampleUserSeed>,
}
