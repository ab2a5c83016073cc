//! Tenancy access policy.
//!
//! Pure decisions over the caller's identity. Reads get a
//! [`VisibilityFilter`] that the store applies to its query; writes get a
//! yes/no answer that the service turns into `403`. A row hidden by the
//! filter is reported as missing, never as forbidden.
//!
//! Every rule matches [`Role::SuperAdmin`] first and then the narrower roles
//! explicitly; there is no implied role hierarchy.

use super::caller::Caller;
use super::company::{Company, CompanyId};
use super::role::Role;
use super::user::{User, UserDraft};

/// Row filter applied by the store when reading companies or users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityFilter {
    /// Every row is visible.
    Unrestricted,
    /// Only rows belonging to the given company are visible.
    ///
    /// `None` never matches: equality against an absent company does not
    /// hold, so a scoped caller without a company sees nothing.
    SameCompany(Option<CompanyId>),
}

impl VisibilityFilter {
    /// Whether a row owned by `tenant` passes the filter.
    ///
    /// ```
    /// use tenant_directory::domain::{CompanyId, VisibilityFilter};
    ///
    /// let acme = CompanyId::random();
    /// let filter = VisibilityFilter::SameCompany(Some(acme));
    /// assert!(filter.permits_tenant(Some(&acme)));
    /// assert!(!filter.permits_tenant(None));
    /// ```
    #[must_use]
    pub fn permits_tenant(&self, tenant: Option<&CompanyId>) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::SameCompany(Some(company)) => tenant == Some(company),
            Self::SameCompany(None) => false,
        }
    }

    /// Whether `user` passes the filter.
    #[must_use]
    pub fn permits_user(&self, user: &User) -> bool {
        self.permits_tenant(user.company())
    }

    /// Whether `company` passes the filter; a company is its own tenant.
    #[must_use]
    pub fn permits_company(&self, company: &Company) -> bool {
        self.permits_tenant(Some(company.id()))
    }
}

/// Every caller sees every company.
#[must_use]
pub const fn visibility_filter_for_companies(_caller: Option<&Caller>) -> VisibilityFilter {
    VisibilityFilter::Unrestricted
}

/// Super admins see all users; everybody else sees their own company.
///
/// Without a caller (system context) no filter applies.
#[must_use]
pub fn visibility_filter_for_users(caller: Option<&Caller>) -> VisibilityFilter {
    let Some(caller) = caller else {
        return VisibilityFilter::Unrestricted;
    };
    match caller.role() {
        Role::SuperAdmin => VisibilityFilter::Unrestricted,
        Role::CompanyAdmin | Role::User => VisibilityFilter::SameCompany(caller.company().copied()),
    }
}

/// Only super admins create companies.
#[must_use]
pub fn can_create_company(caller: Option<&Caller>) -> bool {
    match caller.map(Caller::role) {
        Some(Role::SuperAdmin) => true,
        Some(Role::CompanyAdmin | Role::User) | None => false,
    }
}

/// Super admins create anyone; company admins create plain users in their
/// own company.
#[must_use]
pub fn can_create_user(caller: Option<&Caller>, draft: &UserDraft) -> bool {
    let Some(caller) = caller else {
        return false;
    };
    match caller.role() {
        Role::SuperAdmin => true,
        Role::CompanyAdmin => {
            draft.role() == Role::User
                && caller.company().is_some()
                && draft.company() == caller.company()
        }
        Role::User => false,
    }
}

/// Only super admins delete users.
#[must_use]
pub fn can_delete_user(caller: Option<&Caller>) -> bool {
    match caller.map(Caller::role) {
        Some(Role::SuperAdmin) => true,
        Some(Role::CompanyAdmin | Role::User) | None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::credentials::PasswordHash;
    use crate::domain::{NewUserRecord, UserId};
    use rstest::{fixture, rstest};
    use zeroize::Zeroizing;

    struct Tenants {
        acme: CompanyId,
        globex: CompanyId,
    }

    #[fixture]
    fn tenants() -> Tenants {
        Tenants {
            acme: CompanyId::random(),
            globex: CompanyId::random(),
        }
    }

    fn caller(role: Role, company: Option<CompanyId>) -> Caller {
        Caller::new(UserId::random(), role, company)
    }

    fn draft(role: Role, company: Option<CompanyId>) -> UserDraft {
        UserDraft::new(
            "Jane Doe".to_owned(),
            "jane@doe.com".to_owned(),
            role,
            company,
            Zeroizing::new("123456".to_owned()),
        )
    }

    fn user(company: Option<CompanyId>) -> User {
        User::new(
            UserId::random(),
            NewUserRecord {
                name: "Jane Doe".to_owned(),
                email: "jane@doe.com".to_owned(),
                role: if company.is_some() {
                    Role::User
                } else {
                    Role::SuperAdmin
                },
                company,
                password_hash: PasswordHash::new("hash"),
            },
        )
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Role::User))]
    #[case(Some(Role::CompanyAdmin))]
    #[case(Some(Role::SuperAdmin))]
    fn companies_are_always_visible(tenants: Tenants, #[case] role: Option<Role>) {
        let caller = role.map(|role| caller(role, Some(tenants.acme)));
        assert_eq!(
            visibility_filter_for_companies(caller.as_ref()),
            VisibilityFilter::Unrestricted
        );
    }

    #[rstest]
    fn super_admin_sees_every_user(tenants: Tenants) {
        let filter = visibility_filter_for_users(Some(&caller(Role::SuperAdmin, None)));
        assert_eq!(filter, VisibilityFilter::Unrestricted);
        assert!(filter.permits_user(&user(Some(tenants.acme))));
        assert!(filter.permits_user(&user(None)));
    }

    #[rstest]
    #[case(Role::User)]
    #[case(Role::CompanyAdmin)]
    fn members_see_only_their_company(tenants: Tenants, #[case] role: Role) {
        let filter = visibility_filter_for_users(Some(&caller(role, Some(tenants.acme))));
        assert_eq!(filter, VisibilityFilter::SameCompany(Some(tenants.acme)));
        assert!(filter.permits_user(&user(Some(tenants.acme))));
        assert!(!filter.permits_user(&user(Some(tenants.globex))));
        assert!(!filter.permits_user(&user(None)));
    }

    #[test]
    fn anonymous_context_is_unfiltered() {
        assert_eq!(
            visibility_filter_for_users(None),
            VisibilityFilter::Unrestricted
        );
    }

    #[rstest]
    fn scoped_filter_without_company_matches_nothing(tenants: Tenants) {
        let filter = visibility_filter_for_users(Some(&caller(Role::User, None)));
        assert_eq!(filter, VisibilityFilter::SameCompany(None));
        assert!(!filter.permits_user(&user(Some(tenants.acme))));
        assert!(!filter.permits_user(&user(None)));
    }

    #[rstest]
    fn company_filter_uses_company_id(tenants: Tenants) {
        let filter = VisibilityFilter::SameCompany(Some(tenants.acme));
        assert!(filter.permits_company(&Company::new(tenants.acme, "Acme Corp")));
        assert!(!filter.permits_company(&Company::new(tenants.globex, "Globex Inc")));
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(Role::User), false)]
    #[case(Some(Role::CompanyAdmin), false)]
    #[case(Some(Role::SuperAdmin), true)]
    fn only_super_admin_creates_companies(
        tenants: Tenants,
        #[case] role: Option<Role>,
        #[case] expected: bool,
    ) {
        let caller = role.map(|role| caller(role, Some(tenants.acme)));
        assert_eq!(can_create_company(caller.as_ref()), expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(Role::User), false)]
    #[case(Some(Role::CompanyAdmin), false)]
    #[case(Some(Role::SuperAdmin), true)]
    fn only_super_admin_deletes_users(
        tenants: Tenants,
        #[case] role: Option<Role>,
        #[case] expected: bool,
    ) {
        let caller = role.map(|role| caller(role, Some(tenants.acme)));
        assert_eq!(can_delete_user(caller.as_ref()), expected);
    }

    #[rstest]
    fn company_admin_creates_user_in_own_company(tenants: Tenants) {
        let admin = caller(Role::CompanyAdmin, Some(tenants.acme));
        assert!(can_create_user(
            Some(&admin),
            &draft(Role::User, Some(tenants.acme))
        ));
    }

    #[rstest]
    #[case(Role::CompanyAdmin, true)]
    #[case(Role::User, false)]
    fn company_admin_denied_admins_and_other_tenants(
        tenants: Tenants,
        #[case] target: Role,
        #[case] same_company: bool,
    ) {
        let admin = caller(Role::CompanyAdmin, Some(tenants.acme));
        let company = if same_company {
            tenants.acme
        } else {
            tenants.globex
        };
        assert!(!can_create_user(Some(&admin), &draft(target, Some(company))));
    }

    #[rstest]
    fn company_admin_cannot_create_super_admin(tenants: Tenants) {
        let admin = caller(Role::CompanyAdmin, Some(tenants.acme));
        assert!(!can_create_user(Some(&admin), &draft(Role::SuperAdmin, None)));
    }

    #[rstest]
    fn company_admin_without_company_creates_nobody() {
        let admin = caller(Role::CompanyAdmin, None);
        assert!(!can_create_user(Some(&admin), &draft(Role::User, None)));
    }

    #[rstest]
    #[case(Role::User, true)]
    #[case(Role::CompanyAdmin, true)]
    #[case(Role::SuperAdmin, false)]
    fn super_admin_creates_any_consistent_user(
        tenants: Tenants,
        #[case] target: Role,
        #[case] with_company: bool,
    ) {
        let root = caller(Role::SuperAdmin, None);
        let company = with_company.then_some(tenants.globex);
        assert!(can_create_user(Some(&root), &draft(target, company)));
    }

    #[rstest]
    #[case(Role::User)]
    #[case(Role::CompanyAdmin)]
    #[case(Role::SuperAdmin)]
    fn plain_user_creates_nobody(tenants: Tenants, #[case] target: Role) {
        let member = caller(Role::User, Some(tenants.acme));
        let company = target.requires_company().then_some(tenants.acme);
        assert!(!can_create_user(Some(&member), &draft(target, company)));
    }

    #[rstest]
    fn anonymous_caller_creates_nobody(tenants: Tenants) {
        assert!(!can_create_user(None, &draft(Role::User, Some(tenants.acme))));
    }
}
