//! Domain model, policy and use-cases for the tenant directory.
//!
//! Nothing here knows about HTTP or SQL. Inbound adapters call the driving
//! ports in [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`Company`], [`User`], [`Role`] and their identifiers.
//! - [`access_policy`]: visibility filters and create/delete decisions.
//! - [`validation`]: one-pass field validation returning every violation.
//! - [`credentials::prepare_for_persist`]: plaintext to hash before storage.
//! - [`DirectoryService`] and [`DirectoryLoginService`]: the use-cases.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod access_policy;
pub mod auth;
pub mod caller;
pub mod company;
pub mod credentials;
mod directory_service;
pub mod error;
mod login_service;
pub mod pagination;
pub mod ports;
pub mod role;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::access_policy::VisibilityFilter;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::caller::Caller;
pub use self::company::{Company, CompanyDraft, CompanyId, CompanyInput};
pub use self::credentials::{PasswordHash, UnpreparedCredentials, prepare_for_persist};
pub use self::directory_service::DirectoryService;
pub use self::error::{
    ACCESS_DENIED_MESSAGE, Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER,
};
pub use self::login_service::{DUMMY_HASH, DirectoryLoginService, INVALID_CREDENTIALS};
pub use self::pagination::{InvalidPage, PAGE_SIZE, Page, PageRequest};
pub use self::ports::AccessToken;
pub use self::role::{Role, UnknownRole};
pub use self::trace_id::TraceId;
pub use self::user::{NewUserRecord, User, UserDraft, UserId, UserInput};
pub use self::validation::{Violation, ViolationCode};
