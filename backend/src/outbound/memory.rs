//! In-process store backing both repository ports.
//!
//! Used when no database URL is configured and throughout the HTTP tests.
//! A single mutex guards companies and users together so uniqueness and
//! foreign-key checks are atomic with the write, matching the constraints the
//! PostgreSQL schema enforces.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CompanyPersistenceError, CompanyRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Company, CompanyId, Page, PageRequest, User, UserId, VisibilityFilter};

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<CompanyId, Company>,
    users: HashMap<UserId, User>,
}

/// Memory-backed implementation of [`CompanyRepository`] and
/// [`UserRepository`].
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    tables: Mutex<Tables>,
}

const POISONED: &str = "memory store lock poisoned";

impl MemoryDirectoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables.lock().map_err(|_| POISONED.to_owned())
    }
}

fn paginate<T: Clone>(mut rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as u64;
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let limit = page.limit() as usize;
    let items = if offset >= rows.len() {
        Vec::new()
    } else {
        rows.drain(offset..).take(limit).collect()
    };
    Page::new(items, page, total)
}

#[async_trait]
impl CompanyRepository for MemoryDirectoryStore {
    async fn insert(&self, company: &Company) -> Result<(), CompanyPersistenceError> {
        let mut tables = self.lock().map_err(CompanyPersistenceError::query)?;
        if tables
            .companies
            .values()
            .any(|existing| existing.name() == company.name())
        {
            return Err(CompanyPersistenceError::duplicate_name());
        }
        tables.companies.insert(*company.id(), company.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &CompanyId,
        filter: &VisibilityFilter,
    ) -> Result<Option<Company>, CompanyPersistenceError> {
        let tables = self.lock().map_err(CompanyPersistenceError::query)?;
        Ok(tables
            .companies
            .get(id)
            .filter(|company| filter.permits_company(company))
            .cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, CompanyPersistenceError> {
        let tables = self.lock().map_err(CompanyPersistenceError::query)?;
        Ok(tables.companies.values().any(|company| company.name() == name))
    }

    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<Company>, CompanyPersistenceError> {
        let tables = self.lock().map_err(CompanyPersistenceError::query)?;
        let mut rows: Vec<Company> = tables
            .companies
            .values()
            .filter(|company| filter.permits_company(company))
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.id().as_uuid().cmp(b.id().as_uuid()))
        });
        Ok(paginate(rows, page))
    }
}

#[async_trait]
impl UserRepository for MemoryDirectoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        if tables
            .users
            .values()
            .any(|existing| existing.email() == user.email())
        {
            return Err(UserPersistenceError::duplicate_email());
        }
        if let Some(company) = user.company() {
            if !tables.companies.contains_key(company) {
                return Err(UserPersistenceError::unknown_company());
            }
        }
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &UserId,
        filter: &VisibilityFilter,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .get(id)
            .filter(|user| filter.permits_user(user))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn list(
        &self,
        filter: &VisibilityFilter,
        page: PageRequest,
    ) -> Result<Page<User>, UserPersistenceError> {
        let tables = self.lock().map_err(UserPersistenceError::query)?;
        let mut rows: Vec<User> = tables
            .users
            .values()
            .filter(|user| filter.permits_user(user))
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.email().cmp(b.email())));
        Ok(paginate(rows, page))
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::UsersCommand;
    use crate::domain::{
        Caller, DirectoryService, ErrorCode, NewUserRecord, PasswordHash, Role, UserInput,
    };
    use crate::outbound::security::Argon2PasswordHasher;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use zeroize::Zeroizing;

    #[fixture]
    fn store() -> MemoryDirectoryStore {
        MemoryDirectoryStore::new()
    }

    fn user(name: &str, email: &str, company: Option<CompanyId>) -> User {
        User::new(
            UserId::random(),
            NewUserRecord {
                name: name.to_owned(),
                email: email.to_owned(),
                role: if company.is_some() {
                    Role::User
                } else {
                    Role::SuperAdmin
                },
                company,
                password_hash: PasswordHash::new("$argon2id$stub"),
            },
        )
    }

    async fn company(store: &MemoryDirectoryStore, name: &str) -> Company {
        let company = Company::new(CompanyId::random(), name);
        CompanyRepository::insert(store, &company)
            .await
            .expect("insert company");
        company
    }

    #[rstest]
    #[tokio::test]
    async fn company_names_are_unique(store: MemoryDirectoryStore) {
        company(&store, "Acme Corp").await;
        let err = CompanyRepository::insert(&store, &Company::new(CompanyId::random(), "Acme Corp"))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err, CompanyPersistenceError::DuplicateName);
        assert!(store.exists_by_name("Acme Corp").await.expect("lookup"));
        assert!(!store.exists_by_name("acme corp").await.expect("lookup"));
    }

    #[rstest]
    #[tokio::test]
    async fn user_insert_checks_email_and_company(store: MemoryDirectoryStore) {
        let acme = company(&store, "Acme Corp").await;
        UserRepository::insert(&store, &user("Jane", "jane@acme.com", Some(*acme.id())))
            .await
            .expect("insert user");

        let duplicate = UserRepository::insert(&store, &user("Other", "jane@acme.com", None))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(duplicate, UserPersistenceError::DuplicateEmail);

        let dangling = UserRepository::insert(
            &store,
            &user("Ghost", "ghost@acme.com", Some(CompanyId::random())),
        )
        .await
        .expect_err("unknown company rejected");
        assert_eq!(dangling, UserPersistenceError::UnknownCompany);
    }

    #[rstest]
    #[tokio::test]
    async fn list_filters_by_tenant_and_orders_by_name_then_email(store: MemoryDirectoryStore) {
        let acme = company(&store, "Acme Corp").await;
        let globex = company(&store, "Globex Inc").await;
        for (name, email, tenant) in [
            ("Zed", "zed@acme.com", acme.id()),
            ("Amy", "amy2@acme.com", acme.id()),
            ("Amy", "amy1@acme.com", acme.id()),
            ("Bob", "bob@globex.com", globex.id()),
        ] {
            UserRepository::insert(&store, &user(name, email, Some(*tenant)))
                .await
                .expect("insert user");
        }

        let page = UserRepository::list(
            &store,
            &VisibilityFilter::SameCompany(Some(*acme.id())),
            PageRequest::first(),
        )
        .await
        .expect("list");

        let emails: Vec<&str> = page.items.iter().map(User::email).collect();
        assert_eq!(emails, ["amy1@acme.com", "amy2@acme.com", "zed@acme.com"]);
        assert_eq!(page.total, 3);

        let nothing = UserRepository::list(
            &store,
            &VisibilityFilter::SameCompany(None),
            PageRequest::first(),
        )
        .await
        .expect("list");
        assert!(nothing.items.is_empty());
        assert_eq!(nothing.total, 0);
    }

    #[rstest]
    #[tokio::test]
    async fn hidden_rows_are_absent(store: MemoryDirectoryStore) {
        let acme = company(&store, "Acme Corp").await;
        let globex = company(&store, "Globex Inc").await;
        let bob = user("Bob", "bob@globex.com", Some(*globex.id()));
        UserRepository::insert(&store, &bob).await.expect("insert");

        let scoped = VisibilityFilter::SameCompany(Some(*acme.id()));
        assert!(
            UserRepository::find_by_id(&store, bob.id(), &scoped)
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(
            CompanyRepository::find_by_id(&store, globex.id(), &scoped)
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(
            UserRepository::find_by_id(&store, bob.id(), &VisibilityFilter::Unrestricted)
                .await
                .expect("lookup")
                .is_some()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn pages_past_the_end_are_empty(store: MemoryDirectoryStore) {
        for index in 0..31 {
            company(&store, &format!("Company {index:02}")).await;
        }

        let first = CompanyRepository::list(&store, &VisibilityFilter::Unrestricted, PageRequest::first())
            .await
            .expect("list");
        assert_eq!(first.items.len(), 30);
        assert_eq!(first.total, 31);

        let second = CompanyRepository::list(
            &store,
            &VisibilityFilter::Unrestricted,
            PageRequest::new(2).expect("page"),
        )
        .await
        .expect("list");
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].name(), "Company 30");

        let beyond = CompanyRepository::list(
            &store,
            &VisibilityFilter::Unrestricted,
            PageRequest::new(9).expect("page"),
        )
        .await
        .expect("list");
        assert!(beyond.items.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_a_row_went(store: MemoryDirectoryStore) {
        let jane = user("Jane", "jane@example.com", None);
        UserRepository::insert(&store, &jane).await.expect("insert");

        assert!(store.delete(jane.id()).await.expect("delete"));
        assert!(!store.delete(jane.id()).await.expect("delete"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_creates_with_one_email_yield_one_user() {
        let store = Arc::new(MemoryDirectoryStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::with_costs(8, 1, 1).expect("cheap params"));
        let service = DirectoryService::new(Arc::clone(&store), Arc::clone(&store), hasher);
        let root = Caller::new(UserId::random(), Role::SuperAdmin, None);
        let input = || UserInput {
            name: Some("Jane Doe".to_owned()),
            email: Some("jane@doe.com".to_owned()),
            role: Some("ROLE_SUPER_ADMIN".to_owned()),
            plain_password: Some(Zeroizing::new("123456".to_owned())),
            company: None,
        };

        let (first, second) = tokio::join!(
            service.create_user(Some(&root), input()),
            service.create_user(Some(&root), input()),
        );

        let (created, rejected): (Vec<_>, Vec<_>) =
            [first, second].into_iter().partition(Result::is_ok);
        assert_eq!(created.len(), 1);
        let err = rejected
            .into_iter()
            .next()
            .and_then(Result::err)
            .expect("one create rejected");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(
            err.details().and_then(|d| d.pointer("/violations/0/code")),
            Some(&json!("not_unique"))
        );

        let users = UserRepository::list(
            &*store,
            &VisibilityFilter::Unrestricted,
            PageRequest::first(),
        )
        .await
        .expect("list");
        assert_eq!(users.total, 1);
    }
}
