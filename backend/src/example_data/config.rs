//! Example data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_SEED: u64 = 42;
const DEFAULT_COMPANY_COUNT: usize = 3;
const DEFAULT_USERS_PER_COMPANY: usize = 3;
const DEFAULT_PASSWORD: &str = "123456";

/// Controls example data seeding at startup.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed the store on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// RNG seed; the same seed always yields the same directory.
    pub seed: Option<u64>,
    pub company_count: Option<usize>,
    /// Users per company, including its admin.
    pub users_per_company: Option<usize>,
    /// Password given to every generated account.
    pub password: Option<String>,
}

impl ExampleDataSettings {
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    #[must_use]
    pub fn company_count(&self) -> usize {
        self.company_count.unwrap_or(DEFAULT_COMPANY_COUNT)
    }

    #[must_use]
    pub fn users_per_company(&self) -> usize {
        self.users_per_company.unwrap_or(DEFAULT_USERS_PER_COMPANY)
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or(DEFAULT_PASSWORD)
    }
}
