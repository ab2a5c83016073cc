//! Translate a [`VisibilityFilter`] into a SQL predicate shape.

use uuid::Uuid;

use crate::domain::VisibilityFilter;

/// Row scope for a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    All,
    Tenant(Uuid),
    /// A scoped caller without a company; the query can be skipped.
    Nothing,
}

impl From<&VisibilityFilter> for Scope {
    fn from(filter: &VisibilityFilter) -> Self {
        match filter {
            VisibilityFilter::Unrestricted => Self::All,
            VisibilityFilter::SameCompany(Some(company)) => Self::Tenant(*company.as_uuid()),
            VisibilityFilter::SameCompany(None) => Self::Nothing,
        }
    }
}

/// Clamp unsigned pagination values into Postgres `BIGINT`.
pub(crate) fn to_sql_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `COUNT(*)` is never negative.
pub(crate) fn from_sql_count(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}
