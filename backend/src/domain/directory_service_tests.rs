//! Tests for the directory service.

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ports::{MockCompanyRepository, MockPasswordHasher, MockUserRepository};
use crate::domain::{ErrorCode, PasswordHash, Role};

type TestService = DirectoryService<MockCompanyRepository, MockUserRepository, MockPasswordHasher>;

struct Mocks {
    companies: MockCompanyRepository,
    users: MockUserRepository,
    hasher: MockPasswordHasher,
}

impl Mocks {
    fn into_service(self) -> TestService {
        DirectoryService::new(
            Arc::new(self.companies),
            Arc::new(self.users),
            Arc::new(self.hasher),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        companies: MockCompanyRepository::new(),
        users: MockUserRepository::new(),
        hasher: MockPasswordHasher::new(),
    }
}

#[fixture]
fn acme() -> Company {
    Company::new(CompanyId::random(), "Acme Corp")
}

fn caller(role: Role, company: Option<&Company>) -> Caller {
    Caller::new(UserId::random(), role, company.map(|c| *c.id()))
}

fn company_input(name: &str) -> CompanyInput {
    CompanyInput {
        name: Some(name.to_owned()),
    }
}

fn user_input(role: &str, company: Option<&Company>) -> UserInput {
    UserInput {
        name: Some("Jane Doe".to_owned()),
        email: Some("jane@doe.com".to_owned()),
        role: Some(role.to_owned()),
        plain_password: Some(Zeroizing::new("123456".to_owned())),
        company: company.map(|c| format!("/api/companies/{}", c.id())),
    }
}

fn stored_user(company: &Company) -> User {
    User::new(
        UserId::random(),
        NewUserRecord {
            name: "Jane Doe".to_owned(),
            email: "jane@doe.com".to_owned(),
            role: Role::User,
            company: Some(*company.id()),
            password_hash: PasswordHash::new("$argon2id$stub"),
        },
    )
}

fn expect_company_lookup(mocks: &mut Mocks, company: &Company) {
    let found = company.clone();
    mocks
        .companies
        .expect_find_by_id()
        .withf(|_, filter| *filter == VisibilityFilter::Unrestricted)
        .times(1)
        .return_once(move |_, _| Ok(Some(found)));
}

fn expect_email_free(mocks: &mut Mocks) {
    mocks
        .users
        .expect_find_by_email()
        .withf(|email| email.to_string() == "jane@doe.com")
        .times(1)
        .return_once(|_| Ok(None));
}

#[rstest]
#[tokio::test]
async fn invalid_company_is_rejected_before_authorization(mut mocks: Mocks, acme: Company) {
    mocks
        .companies
        .expect_exists_by_name()
        .times(1)
        .return_once(|_| Ok(false));
    mocks.companies.expect_insert().never();
    let member = caller(Role::User, Some(&acme));

    let err = mocks
        .into_service()
        .create_company(Some(&member), company_input("Acme"))
        .await
        .expect_err("name too short");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.details(),
        Some(&json!({"violations": [{
            "field": "name",
            "message": "This value is too short. It should have 5 characters or more.",
            "code": "too_short",
        }]}))
    );
}

#[rstest]
#[case(Role::User)]
#[case(Role::CompanyAdmin)]
#[tokio::test]
async fn only_super_admin_creates_companies(
    mut mocks: Mocks,
    acme: Company,
    #[case] role: Role,
) {
    mocks
        .companies
        .expect_exists_by_name()
        .return_once(|_| Ok(false));
    mocks.companies.expect_insert().never();
    let member = caller(role, Some(&acme));

    let err = mocks
        .into_service()
        .create_company(Some(&member), company_input("Globex Inc"))
        .await
        .expect_err("denied");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "Access Denied.");
}

#[rstest]
#[tokio::test]
async fn super_admin_creates_company(mut mocks: Mocks) {
    mocks
        .companies
        .expect_exists_by_name()
        .withf(|name| name.to_string() == "Acme Corp")
        .return_once(|_| Ok(false));
    mocks
        .companies
        .expect_insert()
        .withf(|company| company.name() == "Acme Corp")
        .times(1)
        .return_once(|_| Ok(()));
    let root = caller(Role::SuperAdmin, None);

    let company = mocks
        .into_service()
        .create_company(Some(&root), company_input("Acme Corp"))
        .await
        .expect("company created");

    assert_eq!(company.name(), "Acme Corp");
}

#[rstest]
#[tokio::test]
async fn existing_company_name_is_not_unique(mut mocks: Mocks) {
    mocks
        .companies
        .expect_exists_by_name()
        .return_once(|_| Ok(true));
    let root = caller(Role::SuperAdmin, None);

    let err = mocks
        .into_service()
        .create_company(Some(&root), company_input("Acme Corp"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.details().and_then(|d| d.pointer("/violations/0/code")),
        Some(&json!("not_unique"))
    );
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_company_reports_violation(mut mocks: Mocks) {
    mocks
        .companies
        .expect_exists_by_name()
        .return_once(|_| Ok(false));
    mocks
        .companies
        .expect_insert()
        .return_once(|_| Err(CompanyPersistenceError::duplicate_name()));
    let root = caller(Role::SuperAdmin, None);

    let err = mocks
        .into_service()
        .create_company(Some(&root), company_input("Acme Corp"))
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.details().and_then(|d| d.pointer("/violations/0/message")),
        Some(&json!("This company already exists!"))
    );
}

#[rstest]
#[tokio::test]
async fn company_admin_creates_user_with_hashed_password(mut mocks: Mocks, acme: Company) {
    expect_email_free(&mut mocks);
    expect_company_lookup(&mut mocks, &acme);
    mocks
        .hasher
        .expect_hash()
        .withf(|plain, _| plain.to_string() == "123456")
        .times(1)
        .return_once(|_, _| Ok(PasswordHash::new("$argon2id$hashed")));
    let acme_id = *acme.id();
    mocks
        .users
        .expect_insert()
        .withf(move |user| {
            user.password_hash().as_str() == "$argon2id$hashed"
                && user.company() == Some(&acme_id)
                && user.role() == Role::User
        })
        .times(1)
        .return_once(|_| Ok(()));
    let admin = caller(Role::CompanyAdmin, Some(&acme));

    let user = mocks
        .into_service()
        .create_user(Some(&admin), user_input("ROLE_USER", Some(&acme)))
        .await
        .expect("user created");

    assert_eq!(user.email(), "jane@doe.com");
    assert_eq!(user.company(), Some(acme.id()));
}

#[rstest]
#[case("ROLE_COMPANY_ADMIN")]
#[case("ROLE_USER")]
#[tokio::test]
async fn company_admin_denied_outside_own_scope(
    mut mocks: Mocks,
    acme: Company,
    #[case] role: &str,
) {
    let globex = Company::new(CompanyId::random(), "Globex Inc");
    // Admins may not be created at all; plain users only in the admin's company.
    let target = if role == "ROLE_USER" { &globex } else { &acme };
    expect_email_free(&mut mocks);
    expect_company_lookup(&mut mocks, target);
    mocks.hasher.expect_hash().never();
    mocks.users.expect_insert().never();
    let admin = caller(Role::CompanyAdmin, Some(&acme));

    let err = mocks
        .into_service()
        .create_user(Some(&admin), user_input(role, Some(target)))
        .await
        .expect_err("denied");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn super_admin_with_company_is_a_validation_error(mut mocks: Mocks, acme: Company) {
    expect_email_free(&mut mocks);
    expect_company_lookup(&mut mocks, &acme);
    mocks.users.expect_insert().never();
    let root = caller(Role::SuperAdmin, None);

    let err = mocks
        .into_service()
        .create_user(Some(&root), user_input("ROLE_SUPER_ADMIN", Some(&acme)))
        .await
        .expect_err("invariant violated");

    assert_eq!(err.code(), ErrorCode::ValidationFailed);
    assert_eq!(
        err.details().and_then(|d| d.pointer("/violations/0/field")),
        Some(&json!("company"))
    );
}

#[rstest]
#[tokio::test]
async fn missing_company_reference_skips_lookup(mut mocks: Mocks) {
    expect_email_free(&mut mocks);
    mocks.companies.expect_find_by_id().never();
    let root = caller(Role::SuperAdmin, None);

    let err = mocks
        .into_service()
        .create_user(Some(&root), user_input("ROLE_USER", None))
        .await
        .expect_err("company required");

    assert_eq!(
        err.details().and_then(|d| d.pointer("/violations/0/code")),
        Some(&json!("company_required"))
    );
}

#[rstest]
#[tokio::test]
async fn racing_duplicate_email_reports_violation(mut mocks: Mocks, acme: Company) {
    expect_email_free(&mut mocks);
    expect_company_lookup(&mut mocks, &acme);
    mocks
        .hasher
        .expect_hash()
        .return_once(|_, _| Ok(PasswordHash::new("$argon2id$hashed")));
    mocks
        .users
        .expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_email()));
    let root = caller(Role::SuperAdmin, None);

    let err = mocks
        .into_service()
        .create_user(Some(&root), user_input("ROLE_USER", Some(&acme)))
        .await
        .expect_err("duplicate email");

    assert_eq!(
        err.details().and_then(|d| d.pointer("/violations/0/message")),
        Some(&json!("This email already exists!"))
    );
}

#[rstest]
#[tokio::test]
async fn members_list_only_their_tenant(mut mocks: Mocks, acme: Company) {
    let scoped = VisibilityFilter::SameCompany(Some(*acme.id()));
    let user = stored_user(&acme);
    mocks
        .users
        .expect_list()
        .withf(move |filter, page| *filter == scoped && page.page() == 1)
        .times(1)
        .return_once(move |_, page| Ok(Page::new(vec![user], page, 1)));
    let member = caller(Role::User, Some(&acme));

    let page = mocks
        .into_service()
        .list_users(Some(&member), PageRequest::first())
        .await
        .expect("listed");

    assert_eq!(page.total, 1);
    assert_eq!(page.items.len(), 1);
}

#[rstest]
#[tokio::test]
async fn invisible_user_reads_as_not_found(mut mocks: Mocks, acme: Company) {
    mocks
        .users
        .expect_find_by_id()
        .return_once(|_, _| Ok(None));
    let admin = caller(Role::CompanyAdmin, Some(&acme));

    let err = mocks
        .into_service()
        .get_user(Some(&admin), &UserId::random())
        .await
        .expect_err("hidden");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn companies_are_listed_without_filter(mut mocks: Mocks, acme: Company) {
    mocks
        .companies
        .expect_list()
        .withf(|filter, _| *filter == VisibilityFilter::Unrestricted)
        .return_once(move |_, page| Ok(Page::new(vec![acme], page, 1)));
    let member = caller(Role::User, None);

    let page = mocks
        .into_service()
        .list_companies(Some(&member), PageRequest::first())
        .await
        .expect("listed");

    assert_eq!(page.items.len(), 1);
}

#[rstest]
#[case(Role::User)]
#[case(Role::CompanyAdmin)]
#[tokio::test]
async fn only_super_admin_deletes(mut mocks: Mocks, acme: Company, #[case] role: Role) {
    mocks.users.expect_delete().never();
    let member = caller(role, Some(&acme));

    let err = mocks
        .into_service()
        .delete_user(Some(&member), &UserId::random())
        .await
        .expect_err("denied");

    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn super_admin_delete_reports_missing_users(
    mut mocks: Mocks,
    #[case] removed: bool,
    #[case] expected: Option<ErrorCode>,
) {
    mocks
        .users
        .expect_delete()
        .times(1)
        .return_once(move |_| Ok(removed));
    let root = caller(Role::SuperAdmin, None);

    let result = mocks
        .into_service()
        .delete_user(Some(&root), &UserId::random())
        .await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[tokio::test]
async fn store_outage_is_service_unavailable(mut mocks: Mocks) {
    mocks
        .companies
        .expect_list()
        .return_once(|_, _| Err(CompanyPersistenceError::connection("refused")));

    let err = mocks
        .into_service()
        .list_companies(None, PageRequest::first())
        .await
        .expect_err("store down");

    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}
