//! Authenticated caller identity handed to policy decisions.

use super::company::CompanyId;
use super::role::Role;
use super::user::{User, UserId};

/// Who is asking: the user behind a verified token, reduced to what the
/// access policy needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    user_id: UserId,
    role: Role,
    company: Option<CompanyId>,
}

impl Caller {
    /// Build a caller from its parts.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role, company: Option<CompanyId>) -> Self {
        Self {
            user_id,
            role,
            company,
        }
    }

    /// Identity of a stored user.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self::new(*user.id(), user.role(), user.company().copied())
    }

    /// Identifier of the calling user.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Role of the calling user.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Company of the calling user, absent for super admins.
    #[must_use]
    pub const fn company(&self) -> Option<&CompanyId> {
        self.company.as_ref()
    }
}
