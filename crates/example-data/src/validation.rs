//! Name rules mirroring the directory's validators, so generated records
//! never fail on import.
//!
//! - Company names: 5 to 100 characters.
//! - User names: 3 to 100 characters, an ASCII uppercase first character,
//!   and a final character that is a letter or whitespace.

pub const COMPANY_NAME_MIN: usize = 5;
pub const COMPANY_NAME_MAX: usize = 100;
pub const USER_NAME_MIN: usize = 3;
pub const USER_NAME_MAX: usize = 100;

/// ```
/// use example_data::is_valid_company_name;
///
/// assert!(is_valid_company_name("Acme Corp"));
/// assert!(!is_valid_company_name("Acme"));
/// ```
#[must_use]
pub fn is_valid_company_name(name: &str) -> bool {
    (COMPANY_NAME_MIN..=COMPANY_NAME_MAX).contains(&name.chars().count())
}

/// ```
/// use example_data::is_valid_user_name;
///
/// assert!(is_valid_user_name("Jane Doe"));
/// assert!(is_valid_user_name("Jane 3 Doe"));
/// assert!(!is_valid_user_name("jane Doe"));
/// assert!(!is_valid_user_name("Jane Doe3"));
/// ```
#[must_use]
pub fn is_valid_user_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(USER_NAME_MIN..=USER_NAME_MAX).contains(&length) {
        return false;
    }
    let starts_upper = name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    let ends_well = name
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic() || c.is_whitespace());
    starts_upper && ends_well
}
