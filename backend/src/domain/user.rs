//! User data model.
//!
//! Three shapes cover a user's life: [`UserInput`] is what a caller sent,
//! [`UserDraft`] is input that passed validation and still carries the
//! plaintext password, and [`NewUserRecord`] is what the store accepts once
//! credentials were prepared. [`User`] is the persisted entity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::company::CompanyId;
use super::credentials::{PasswordHash, UnpreparedCredentials};
use super::role::Role;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Raw user creation input, straight from the caller.
///
/// Every field is optional so validation can report each missing one.
#[derive(Default)]
pub struct UserInput {
    /// Requested display name.
    pub name: Option<String>,
    /// Requested login email.
    pub email: Option<String>,
    /// Requested role in its wire spelling.
    pub role: Option<String>,
    /// Plaintext password; wiped from memory on drop.
    pub plain_password: Option<Zeroizing<String>>,
    /// Identifier of the company the user joins.
    pub company: Option<String>,
}

impl fmt::Debug for UserInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserInput")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("plain_password", &self.plain_password.as_ref().map(|_| "***"))
            .field("company", &self.company)
            .finish()
    }
}

/// User creation input that passed validation.
///
/// ## Invariants
/// - `company` is present exactly when `role` requires one.
pub struct UserDraft {
    name: String,
    email: String,
    role: Role,
    company: Option<CompanyId>,
    plain_password: Option<Zeroizing<String>>,
    password_hash: Option<PasswordHash>,
}

impl UserDraft {
    pub(crate) const fn new(
        name: String,
        email: String,
        role: Role,
        company: Option<CompanyId>,
        plain_password: Zeroizing<String>,
    ) -> Self {
        Self {
            name,
            email,
            role,
            company,
            plain_password: Some(plain_password),
            password_hash: None,
        }
    }

    /// Validated display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Validated email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Company the user will belong to.
    #[must_use]
    pub const fn company(&self) -> Option<&CompanyId> {
        self.company.as_ref()
    }

    /// Whether the plaintext password is still held.
    #[must_use]
    pub const fn has_plain_password(&self) -> bool {
        self.plain_password.is_some()
    }

    /// Hash computed by the credential manager, once it ran.
    #[must_use]
    pub const fn password_hash(&self) -> Option<&PasswordHash> {
        self.password_hash.as_ref()
    }

    pub(crate) fn take_plain_password(&mut self) -> Option<Zeroizing<String>> {
        self.plain_password.take()
    }

    pub(crate) fn set_password_hash(&mut self, hash: PasswordHash) {
        self.password_hash = Some(hash);
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("company", &self.company)
            .field("has_plain_password", &self.has_plain_password())
            .field("password_hash", &self.password_hash)
            .finish()
    }
}

/// User data accepted by the store: validated, with credentials prepared.
///
/// There is no plaintext password field, so a record can never carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Assigned role.
    pub role: Role,
    /// Company membership.
    pub company: Option<CompanyId>,
    /// One-way password hash.
    pub password_hash: PasswordHash,
}

impl TryFrom<UserDraft> for NewUserRecord {
    type Error = UnpreparedCredentials;

    fn try_from(draft: UserDraft) -> Result<Self, Self::Error> {
        if draft.plain_password.is_some() {
            return Err(UnpreparedCredentials::PlainPasswordPresent);
        }
        let password_hash = draft
            .password_hash
            .ok_or(UnpreparedCredentials::MissingHash)?;
        Ok(Self {
            name: draft.name,
            email: draft.email,
            role: draft.role,
            company: draft.company,
            password_hash,
        })
    }
}

/// Directory user as persisted.
///
/// The password hash stays inside the domain; adapters that render users
/// must not expose it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    record: NewUserRecord,
}

impl User {
    /// Attach an identifier to a prepared record.
    #[must_use]
    pub const fn new(id: UserId, record: NewUserRecord) -> Self {
        Self { id, record }
    }

    /// User identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.record.name.as_str()
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.record.email.as_str()
    }

    /// Assigned role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.record.role
    }

    /// Company membership, absent for super admins.
    #[must_use]
    pub const fn company(&self) -> Option<&CompanyId> {
        self.record.company.as_ref()
    }

    /// Stored password hash.
    #[must_use]
    pub const fn password_hash(&self) -> &PasswordHash {
        &self.record.password_hash
    }
}
