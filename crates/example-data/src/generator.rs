//! Deterministic directory generation.
//!
//! One [`ChaCha8Rng`] seeded from the plan drives every draw, so the same
//! plan always yields the same companies and users.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::company::raw::CompanyName;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::seed::{ExampleCompanySeed, ExampleDirectory, ExampleUserSeed, RoleSeed};
use crate::validation::{is_valid_company_name, is_valid_user_name};

const MAX_NAME_ATTEMPTS: usize = 100;

const EMAIL_DOMAIN: &str = "example.com";

/// Size and seed of a generated directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    pub seed: u64,
    pub company_count: usize,
    /// Users per company, the first of whom is the company admin.
    pub users_per_company: usize,
}

impl GenerationPlan {
    #[must_use]
    pub const fn new(seed: u64, company_count: usize, users_per_company: usize) -> Self {
        Self {
            seed,
            company_count,
            users_per_company,
        }
    }
}

/// Generate companies, their users, and one super admin.
///
/// Company names are unique; emails are unique across the directory.
///
/// # Errors
/// [`GenerationError`] when the faker cannot produce a valid or unused name
/// within the retry budget.
pub fn generate_directory(plan: &GenerationPlan) -> Result<ExampleDirectory, GenerationError> {
    let mut rng = ChaCha8Rng::seed_from_u64(plan.seed);
    let mut taken = HashSet::new();
    let mut directory = ExampleDirectory::default();

    for _ in 0..plan.company_count {
        let name = generate_company_name(&mut rng, &mut taken)?;
        directory.companies.push(ExampleCompanySeed { name });
    }

    for company in 0..plan.company_count {
        let domain = company_domain(&directory.companies, company);
        for slot in 0..plan.users_per_company {
            let role = if slot == 0 {
                RoleSeed::CompanyAdmin
            } else {
                RoleSeed::User
            };
            let index = directory.users.len();
            directory
                .users
                .push(generate_user(&mut rng, role, Some(company), index, &domain)?);
        }
    }

    let index = directory.users.len();
    directory.users.push(generate_user(
        &mut rng,
        RoleSeed::SuperAdmin,
        None,
        index,
        EMAIL_DOMAIN,
    )?);

    Ok(directory)
}

fn generate_company_name(
    rng: &mut ChaCha8Rng,
    taken: &mut HashSet<String>,
) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let candidate: String = CompanyName(EN).fake_with_rng(rng);
        if is_valid_company_name(&candidate) && taken.insert(candidate.clone()) {
            return Ok(candidate);
        }
    }
    Err(GenerationError::CompanyNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_user(
    rng: &mut ChaCha8Rng,
    role: RoleSeed,
    company: Option<usize>,
    index: usize,
    domain: &str,
) -> Result<ExampleUserSeed, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let name = format!("{first} {last}");
        if is_valid_user_name(&name) {
            // The index keeps emails unique when the faker repeats a name.
            let email = format!("{}.{}.{index}@{domain}", slug(&first), slug(&last));
            return Ok(ExampleUserSeed {
                name,
                email,
                role,
                company,
            });
        }
    }
    Err(GenerationError::UserNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Lowercase ASCII alphanumerics only; `x` when nothing survives.
fn slug(raw: &str) -> String {
    let slug: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .take(40)
        .collect();
    if slug.is_empty() { "x".to_owned() } else { slug }
}

fn company_domain(companies: &[ExampleCompanySeed], index: usize) -> String {
    let name = companies.get(index).map_or("", |company| company.name.as_str());
    format!("{}.{EMAIL_DOMAIN}", slug(name))
}
