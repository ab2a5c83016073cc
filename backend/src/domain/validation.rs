//! Field validation for company and user creation.
//!
//! Each field runs its rules in order and stops at the first failure; fields
//! are independent, so one pass reports every failing field. Store-backed
//! rules (uniqueness, company existence) arrive as precomputed facts so the
//! functions here stay pure.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::company::{CompanyDraft, CompanyId, CompanyInput};
use super::role::Role;
use super::user::{UserDraft, UserInput};

/// Minimum company name length in characters.
pub const COMPANY_NAME_MIN: usize = 5;
/// Maximum company name length in characters.
pub const COMPANY_NAME_MAX: usize = 100;
/// Minimum user name length in characters.
pub const USER_NAME_MIN: usize = 3;
/// Maximum user name length in characters.
pub const USER_NAME_MAX: usize = 100;
/// Maximum email length in characters; matches the `users.email` column.
pub const EMAIL_MAX: usize = 180;

/// Path prefix accepted in front of a company identifier.
pub const COMPANY_REFERENCE_PREFIX: &str = "/api/companies/";

const BLANK_MESSAGE: &str = "This value should not be blank.";
const INVALID_EMAIL_MESSAGE: &str = "This value is not a valid email address.";
const INVALID_ROLE_MESSAGE: &str = "This is not a valid user's role.";
const NAME_FIRST_CHAR_MESSAGE: &str = "The name must start with a uppercase letter.";
const NAME_LAST_CHAR_MESSAGE: &str = "The name must contains letters and space.";
const COMPANY_TAKEN_MESSAGE: &str = "This company already exists!";
const EMAIL_TAKEN_MESSAGE: &str = "This email already exists!";
const COMPANY_FORBIDDEN_MESSAGE: &str = "The user with this role can't have a company.";
const COMPANY_REQUIRED_MESSAGE: &str = "The user with this role must have a company.";
const UNKNOWN_COMPANY_MESSAGE: &str = "This company does not exist.";

/// Stable machine-readable violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// Value shorter than the minimum length.
    TooShort,
    /// Value longer than the maximum length.
    TooLong,
    /// Value does not match the required pattern.
    InvalidFormat,
    /// Required value is empty or missing.
    Blank,
    /// Value is not an email address.
    InvalidEmail,
    /// Value collides with an existing record.
    NotUnique,
    /// Value is not one of the allowed choices.
    InvalidChoice,
    /// A company was given for a role that must not have one.
    CompanyForbidden,
    /// No company was given for a role that needs one.
    CompanyRequired,
    /// The referenced company does not exist.
    UnknownCompany,
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    field: String,
    message: String,
    code: ViolationCode,
}

impl Violation {
    /// Build a violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ViolationCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Violation category.
    #[must_use]
    pub const fn code(&self) -> ViolationCode {
        self.code
    }

    /// Company name already used by another company.
    #[must_use]
    pub fn company_name_taken() -> Self {
        Self::new(Field::Name.as_str(), COMPANY_TAKEN_MESSAGE, ViolationCode::NotUnique)
    }

    /// Email already used by another user.
    #[must_use]
    pub fn email_taken() -> Self {
        Self::new(Field::Email.as_str(), EMAIL_TAKEN_MESSAGE, ViolationCode::NotUnique)
    }

    /// Referenced company is missing.
    #[must_use]
    pub fn unknown_company() -> Self {
        Field::Company.violation(UNKNOWN_COMPANY_MESSAGE, ViolationCode::UnknownCompany)
    }
}

/// Store-backed facts about a company creation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompanyFacts {
    /// Another company already uses the requested name.
    pub name_taken: bool,
}

/// Store-backed facts about a user creation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFacts {
    /// Another user already uses the requested email.
    pub email_taken: bool,
    /// The referenced company exists.
    pub company_exists: bool,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Email,
    Role,
    PlainPassword,
    Company,
}

impl Field {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::PlainPassword => "plainPassword",
            Self::Company => "company",
        }
    }

    fn violation(self, message: impl Into<String>, code: ViolationCode) -> Violation {
        Violation::new(self.as_str(), message, code)
    }
}

type FieldResult<T> = Result<T, Violation>;

fn first_char_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new("^[A-Z]")
            .unwrap_or_else(|error| panic!("name prefix regex failed to compile: {error}"))
    })
}

fn last_char_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Only the final character is constrained; whitespace means ASCII.
        Regex::new(r"(?-u:[a-zA-Z\s])$")
            .unwrap_or_else(|error| panic!("name suffix regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // HTML5 `type=email` grammar.
        let pattern = concat!(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn check_length(field: Field, value: &str, min: usize, max: usize) -> FieldResult<()> {
    let length = value.chars().count();
    if length < min {
        return Err(field.violation(
            format!("This value is too short. It should have {min} characters or more."),
            ViolationCode::TooShort,
        ));
    }
    if length > max {
        return Err(field.violation(
            format!("This value is too long. It should have {max} characters or less."),
            ViolationCode::TooLong,
        ));
    }
    Ok(())
}

fn check_not_blank(field: Field, value: Option<&str>) -> FieldResult<&str> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(field.violation(BLANK_MESSAGE, ViolationCode::Blank)),
    }
}

fn check_company_name(name: Option<&str>, facts: CompanyFacts) -> FieldResult<String> {
    let name = name.unwrap_or_default();
    check_length(Field::Name, name, COMPANY_NAME_MIN, COMPANY_NAME_MAX)?;
    if facts.name_taken {
        return Err(Violation::company_name_taken());
    }
    Ok(name.to_owned())
}

fn check_user_name(name: Option<&str>) -> FieldResult<String> {
    let name = name.unwrap_or_default();
    check_length(Field::Name, name, USER_NAME_MIN, USER_NAME_MAX)?;
    if !first_char_regex().is_match(name) {
        return Err(Field::Name.violation(NAME_FIRST_CHAR_MESSAGE, ViolationCode::InvalidFormat));
    }
    if !last_char_regex().is_match(name) {
        return Err(Field::Name.violation(NAME_LAST_CHAR_MESSAGE, ViolationCode::InvalidFormat));
    }
    Ok(name.to_owned())
}

fn check_email(email: Option<&str>, facts: UserFacts) -> FieldResult<String> {
    let email = check_not_blank(Field::Email, email)?;
    check_length(Field::Email, email, 1, EMAIL_MAX)?;
    if !email_regex().is_match(email) {
        return Err(Field::Email.violation(INVALID_EMAIL_MESSAGE, ViolationCode::InvalidEmail));
    }
    if facts.email_taken {
        return Err(Violation::email_taken());
    }
    Ok(email.to_owned())
}

fn check_role(role: Option<&str>) -> FieldResult<Role> {
    let role = check_not_blank(Field::Role, role)?;
    role.parse()
        .map_err(|_| Field::Role.violation(INVALID_ROLE_MESSAGE, ViolationCode::InvalidChoice))
}

fn check_plain_password(
    password: Option<Zeroizing<String>>,
) -> FieldResult<Zeroizing<String>> {
    match password {
        Some(password) if !password.is_empty() => Ok(password),
        _ => Err(Field::PlainPassword.violation(BLANK_MESSAGE, ViolationCode::Blank)),
    }
}

fn check_company_reference(
    role: Role,
    company: Option<&str>,
    facts: UserFacts,
) -> FieldResult<Option<CompanyId>> {
    let company = company.filter(|raw| !raw.is_empty());
    match (role, company) {
        (Role::SuperAdmin, None) => Ok(None),
        (Role::SuperAdmin, Some(_)) => Err(Field::Company.violation(
            COMPANY_FORBIDDEN_MESSAGE,
            ViolationCode::CompanyForbidden,
        )),
        (Role::CompanyAdmin | Role::User, None) => Err(Field::Company.violation(
            COMPANY_REQUIRED_MESSAGE,
            ViolationCode::CompanyRequired,
        )),
        (Role::CompanyAdmin | Role::User, Some(raw)) => match parse_company_reference(raw) {
            Some(id) if facts.company_exists => Ok(Some(id)),
            _ => Err(Field::Company.violation(
                UNKNOWN_COMPANY_MESSAGE,
                ViolationCode::UnknownCompany,
            )),
        },
    }
}

/// Parse a company reference given either as a bare id or as
/// `/api/companies/{id}`.
///
/// ```
/// use tenant_directory::domain::validation::parse_company_reference;
///
/// let id = "7d0c3a4e-8f0b-4a43-9d1c-2b0f6c1d9e10";
/// assert_eq!(
///     parse_company_reference(id),
///     parse_company_reference(&format!("/api/companies/{id}")),
/// );
/// assert!(parse_company_reference("acme").is_none());
/// ```
#[must_use]
pub fn parse_company_reference(raw: &str) -> Option<CompanyId> {
    raw.strip_prefix(COMPANY_REFERENCE_PREFIX)
        .unwrap_or(raw)
        .parse()
        .ok()
}

/// Validate a company creation request.
///
/// # Errors
/// Returns every violation found.
pub fn validate_new_company(
    input: &CompanyInput,
    facts: CompanyFacts,
) -> Result<CompanyDraft, Vec<Violation>> {
    check_company_name(input.name.as_deref(), facts)
        .map(CompanyDraft::new)
        .map_err(|violation| vec![violation])
}

/// Validate a user creation request.
///
/// The company rule only runs once the role is known to be valid.
///
/// # Errors
/// Returns every violation found, in field order.
pub fn validate_new_user(input: UserInput, facts: UserFacts) -> Result<UserDraft, Vec<Violation>> {
    let UserInput {
        name,
        email,
        role,
        plain_password,
        company,
    } = input;

    let name = check_user_name(name.as_deref());
    let email = check_email(email.as_deref(), facts);
    let role = check_role(role.as_deref());
    let plain_password = check_plain_password(plain_password);
    let company = match &role {
        Ok(role) => Some(check_company_reference(*role, company.as_deref(), facts)),
        Err(_) => None,
    };

    match (name, email, role, plain_password, company) {
        (Ok(name), Ok(email), Ok(role), Ok(plain_password), Some(Ok(company))) => {
            Ok(UserDraft::new(name, email, role, company, plain_password))
        }
        (name, email, role, plain_password, company) => {
            let violations = [
                name.err(),
                email.err(),
                role.err(),
                plain_password.err(),
                company.and_then(Result::err),
            ];
            Err(violations.into_iter().flatten().collect())
        }
    }
}
