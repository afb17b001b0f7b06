use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::age::{compute_age, AgeParseError};
use super::domain::{FormInput, Gender, ValidatedRecord};

/// Youngest age accepted by the form.
pub const MINIMUM_AGE: i32 = 18;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[a-zA-Z0-9+._%\-]{1,256}",
        r"@",
        r"[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}",
        r"(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    ))
    .expect("valid email pattern")
});

static MOBILE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^09[0-9]{9}$").expect("valid mobile pattern"));

/// First check that failed for a submitted form. The display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationFailure {
    #[error("All fields are required")]
    MissingRequiredField,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid mobile number")]
    InvalidMobileNumber,
    #[error("Invalid date of birth")]
    InvalidDateOfBirth(AgeParseError),
    #[error("You must be 18 or above")]
    Underage { age: i32 },
    #[error("Select a gender")]
    GenderNotSelected,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// `09` followed by nine digits.
pub fn is_valid_mobile_number(mobile_number: &str) -> bool {
    MOBILE_PATTERN.is_match(mobile_number)
}

/// Runs the field checks in order and stops at the first failure.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    minimum_age: i32,
}

impl Default for FieldValidator {
    fn default() -> Self {
        Self {
            minimum_age: MINIMUM_AGE,
        }
    }
}

impl FieldValidator {
    pub fn minimum_age(&self) -> i32 {
        self.minimum_age
    }

    /// Check `input` against the form rules, deriving the age relative to `today`.
    pub fn validate(
        &self,
        input: &FormInput,
        today: NaiveDate,
    ) -> Result<ValidatedRecord, ValidationFailure> {
        let full_name = input.full_name.trim();
        let email = input.email.trim();
        let mobile_number = input.mobile_number.trim();
        let date_of_birth = input.date_of_birth.trim();

        if full_name.is_empty() || email.is_empty() || mobile_number.is_empty() {
            return Err(ValidationFailure::MissingRequiredField);
        }

        if !is_valid_email(email) {
            return Err(ValidationFailure::InvalidEmail);
        }

        if !is_valid_mobile_number(mobile_number) {
            return Err(ValidationFailure::InvalidMobileNumber);
        }

        let age =
            compute_age(date_of_birth, today).map_err(ValidationFailure::InvalidDateOfBirth)?;
        if age < self.minimum_age {
            return Err(ValidationFailure::Underage { age });
        }

        let gender =
            Gender::from_label(&input.gender).ok_or(ValidationFailure::GenderNotSelected)?;

        Ok(ValidatedRecord {
            full_name: full_name.to_string(),
            email: email.to_string(),
            mobile_number: mobile_number.to_string(),
            date_of_birth: date_of_birth.to_string(),
            age,
            gender,
        })
    }
}
