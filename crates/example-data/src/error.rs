//! Generation failures.

use thiserror::Error;

/// Errors raised while generating example data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No valid user name came out of the faker within the retry budget.
    #[error("failed to generate valid user name after {max_attempts} attempts")]
    UserNameGenerationFailed {
        /// Attempts made.
        max_attempts: usize,
    },

    /// No unused, valid company name came out of the faker within the retry
    /// budget.
    #[error("failed to generate unique company name after {max_attempts} attempts")]
    CompanyNameGenerationFailed {
        /// Attempts made.
        max_attempts: usize,
    },
}
