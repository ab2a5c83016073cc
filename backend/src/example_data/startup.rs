//! Startup seeding through the directory's own create path.
//!
//! Records go through validation and password hashing exactly as API
//! requests do, acting as a synthetic super admin. A company whose name is
//! already taken is skipped together with its users, so a restart against a
//! persistent store does not duplicate anything.

use example_data::{ExampleUserSeed, GenerationError, GenerationPlan, generate_directory};
use thiserror::Error;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{CompaniesCommand, UsersCommand};
use crate::domain::{Caller, Company, Error, ErrorCode, Role, UserId, UserInput};
use crate::example_data::config::ExampleDataSettings;

/// Seeding failures.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    #[error("example data could not be stored: {0}")]
    Directory(#[from] Error),
}

/// Counts from one seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub companies_created: usize,
    pub users_created: usize,
    /// Records skipped because their name or email already existed.
    pub skipped: usize,
}

fn is_duplicate(error: &Error) -> bool {
    error.code() == ErrorCode::ValidationFailed
        && error
            .details()
            .and_then(|details| details.get("violations"))
            .and_then(|violations| violations.as_array())
            .is_some_and(|violations| {
                violations
                    .iter()
                    .any(|v| v.get("code").and_then(|code| code.as_str()) == Some("not_unique"))
            })
}

fn user_input(seed: &ExampleUserSeed, company: Option<&Company>, password: &str) -> UserInput {
    UserInput {
        name: Some(seed.name.clone()),
        email: Some(seed.email.clone()),
        role: Some(seed.role.as_str().to_owned()),
        plain_password: Some(Zeroizing::new(password.to_owned())),
        company: company.map(|company| company.id().to_string()),
    }
}

/// Seed the directory when enabled.
///
/// # Errors
/// [`StartupSeedingError`] when generation fails or a record is rejected for
/// any reason other than already existing.
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    companies: &dyn CompaniesCommand,
    users: &dyn UsersCommand,
) -> Result<Option<SeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let plan = GenerationPlan::new(
        settings.seed(),
        settings.company_count(),
        settings.users_per_company(),
    );
    let directory = generate_directory(&plan)?;
    let seeder = Caller::new(UserId::random(), Role::SuperAdmin, None);
    let mut outcome = SeedOutcome::default();

    let mut created = Vec::with_capacity(directory.companies.len());
    for seed in &directory.companies {
        let input = crate::domain::CompanyInput {
            name: Some(seed.name.clone()),
        };
        match companies.create_company(Some(&seeder), input).await {
            Ok(company) => {
                outcome.companies_created += 1;
                created.push(Some(company));
            }
            Err(err) if is_duplicate(&err) => {
                debug!(name = %seed.name, "example company exists; skipping");
                outcome.skipped += 1;
                created.push(None);
            }
            Err(err) => return Err(err.into()),
        }
    }

    for seed in &directory.users {
        let company = match seed.company {
            Some(index) => match created.get(index).and_then(Option::as_ref) {
                Some(company) => Some(company),
                None => {
                    outcome.skipped += 1;
                    continue;
                }
            },
            None => None,
        };
        let input = user_input(seed, company, settings.password());
        match users.create_user(Some(&seeder), input).await {
            Ok(_) => outcome.users_created += 1,
            Err(err) if is_duplicate(&err) => {
                debug!(email = %seed.email, "example user exists; skipping");
                outcome.skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    info!(
        seed = plan.seed,
        companies = outcome.companies_created,
        users = outcome.users_created,
        skipped = outcome.skipped,
        "example data seeding applied"
    );
    Ok(Some(outcome))
}
