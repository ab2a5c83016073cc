//! PostgreSQL adapters using Diesel with `diesel-async` and `bb8` pooling.
//!
//! Row structs and table definitions stay private; repositories translate
//! them to domain types and classify database errors into the port error
//! enums. Visibility filters become `WHERE company_id = $1` clauses.
//!
//! ```no_run
//! use tenant_directory::outbound::persistence::{
//!     DbPool, DieselCompanyRepository, DieselUserRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> color_eyre::Result<()> {
//! let url = "postgres://localhost/directory";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let companies = DieselCompanyRepository::new(pool.clone());
//! let users = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_company_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod visibility;

pub use diesel_company_repository::DieselCompanyRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
