//! Deterministic example companies and users.
//!
//! The generator knows nothing about the backend's domain types; it produces
//! plain records whose names and emails already satisfy the directory's
//! validation rules, and the backend feeds them through its normal create
//! path.
//!
//! ```
//! use example_data::{GenerationPlan, RoleSeed, generate_directory};
//!
//! let plan = GenerationPlan::new(42, 2, 3);
//! let directory = generate_directory(&plan).expect("generation succeeds");
//!
//! assert_eq!(directory.companies.len(), 2);
//! // Three per company plus one super admin.
//! assert_eq!(directory.users.len(), 7);
//! assert_eq!(
//!     directory.users.iter().filter(|u| u.role == RoleSeed::SuperAdmin).count(),
//!     1
//! );
//! ```

mod error;
mod generator;
mod seed;
mod validation;

pub use error::GenerationError;
pub use generator::{GenerationPlan, generate_directory};
pub use seed::{ExampleCompanySeed, ExampleDirectory, ExampleUserSeed, RoleSeed};
pub use validation::{
    COMPANY_NAME_MAX, COMPANY_NAME_MIN, USER_NAME_MAX, USER_NAME_MIN, is_valid_company_name,
    is_valid_user_name,
};
