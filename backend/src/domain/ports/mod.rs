//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`, [`LoginService`]) are called by
//! inbound adapters. Driven ports (repositories, [`PasswordHasher`],
//! [`TokenService`]) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod companies_command;
mod companies_query;
mod company_repository;
mod login_service;
mod password_hasher;
mod token_service;
mod user_repository;
mod users_command;
mod users_query;

pub use companies_command::CompaniesCommand;
pub use companies_query::CompaniesQuery;
#[cfg(test)]
pub use company_repository::MockCompanyRepository;
pub use company_repository::{CompanyPersistenceError, CompanyRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{AccessToken, TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
