//! Company data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable company identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(Uuid);

impl CompanyId {
    /// Generate a new random [`CompanyId`].
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

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CompanyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Tenant owning a partition of the directory's users.
///
/// ## Invariants
/// - `name` passed company validation when the company was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: CompanyId,
    name: String,
}

impl Company {
    /// Assemble a company from trusted parts.
    pub fn new(id: CompanyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Company identifier.
    #[must_use]
    pub const fn id(&self) -> &CompanyId {
        &self.id
    }

    /// Unique company name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Raw company creation input, straight from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyInput {
    /// Requested company name.
    pub name: Option<String>,
}

/// Company creation input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyDraft {
    name: String,
}

impl CompanyDraft {
    pub(crate) const fn new(name: String) -> Self {
        Self { name }
    }

    /// Validated company name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Turn the draft into a company with a freshly generated identifier.
    #[must_use]
    pub fn into_company(self) -> Company {
        Company::new(CompanyId::random(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_id_round_trips_through_strings() {
        let id = CompanyId::random();
        let parsed: CompanyId = id.to_string().parse().expect("parse company id");
        assert_eq!(parsed, id);
    }

    #[test]
    fn company_id_rejects_garbage() {
        assert!("acme".parse::<CompanyId>().is_err());
    }

    #[test]
    fn company_id_serialises_as_plain_string() {
        let id = CompanyId::from_uuid(Uuid::nil());
        let json = serde_json::to_value(id).expect("serialise id");
        assert_eq!(json, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn draft_generates_distinct_ids() {
        let first = CompanyDraft::new("Acme Corp".to_owned()).into_company();
        let second = CompanyDraft::new("Acme Corp".to_owned()).into_company();
        assert_ne!(first.id(), second.id());
        assert_eq!(first.name(), "Acme Corp");
    }
}
