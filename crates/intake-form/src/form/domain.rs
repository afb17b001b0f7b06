use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder label shown before the user picks a gender.
pub const GENDER_PLACEHOLDER: &str = "Choose Gender";

/// Raw values captured from the form at the moment the submit action fires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub date_of_birth: String,
    /// Selected spinner label, [`GENDER_PLACEHOLDER`] when nothing was picked.
    pub gender: String,
}

impl FormInput {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        mobile_number: impl Into<String>,
        date_of_birth: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            mobile_number: mobile_number.into(),
            date_of_birth: date_of_birth.into(),
            gender: gender.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// Resolve a spinner label. The placeholder and unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.label() == label.trim())
    }

    /// Spinner entries in display order, placeholder first.
    pub fn options() -> Vec<&'static str> {
        std::iter::once(GENDER_PLACEHOLDER)
            .chain(Self::ALL.iter().map(|gender| gender.label()))
            .collect()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A form that passed every field check, carrying the derived age.
///
/// Only [`super::FieldValidator`] builds these, so holding one means the input was valid and the
/// applicant was at least 18 on the reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) mobile_number: String,
    pub(crate) date_of_birth: String,
    pub(crate) age: i32,
    pub(crate) gender: Gender,
}

impl ValidatedRecord {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile_number(&self) -> &str {
        &self.mobile_number
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn payload(&self) -> FormPayload {
        FormPayload {
            full_name: self.full_name.clone(),
            email_address: self.email.clone(),
            mobile_number: self.mobile_number.clone(),
            date_of_birth: self.date_of_birth.clone(),
            age: self.age,
            gender: self.gender,
        }
    }
}

/// JSON body posted to the intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub full_name: String,
    pub email_address: String,
    pub mobile_number: String,
    pub date_of_birth: String,
    pub age: i32,
    pub gender: Gender,
}
