//! Date-of-birth parsing and age derivation.
//!
//! Age is the year difference, minus one when the reference date's day-of-year falls before the
//! birth date's day-of-year. Comparing ordinals instead of (month, day) pairs shifts the result
//! by one after Feb 28 when exactly one of the two years is a leap year. The ordinal comparison
//! is the contract; do not replace it with a (month, day) comparison.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// Display pattern of the date-of-birth field (`dd/MM/yyyy`).
pub const DATE_OF_BIRTH_FORMAT: &str = "%d/%m/%Y";

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("valid date shape pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgeParseError {
    #[error("date of birth '{0}' must use the DD/MM/YYYY format")]
    Format(String),
    #[error("date of birth '{0}' is not a calendar date")]
    Calendar(String),
}

/// Parse a `DD/MM/YYYY` date, rejecting other shapes and impossible dates.
pub fn parse_date_of_birth(raw: &str) -> Result<NaiveDate, AgeParseError> {
    let trimmed = raw.trim();
    if !DATE_SHAPE.is_match(trimmed) {
        return Err(AgeParseError::Format(trimmed.to_string()));
    }

    NaiveDate::parse_from_str(trimmed, DATE_OF_BIRTH_FORMAT)
        .map_err(|_| AgeParseError::Calendar(trimmed.to_string()))
}

/// Age in whole years on `reference`. Birth dates after `reference` give negative ages.
pub fn age_on(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth.year();
    if reference.ordinal() < birth.ordinal() {
        age -= 1;
    }
    age
}

pub fn compute_age(date_of_birth: &str, reference: NaiveDate) -> Result<i32, AgeParseError> {
    parse_date_of_birth(date_of_birth).map(|birth| age_on(birth, reference))
}

pub fn compute_age_today(date_of_birth: &str) -> Result<i32, AgeParseError> {
    compute_age(date_of_birth, Local::now().date_naive())
}

/// Age shown next to the date field while the user is still typing.
pub fn age_preview(date_of_birth: &str, reference: NaiveDate) -> Option<i32> {
    compute_age(date_of_birth, reference).ok()
}
