//! Personal details form: field checks, age derivation, and JSON submission.

pub mod age;
pub mod controller;
pub mod domain;
pub mod outcome;
pub mod pipeline;
pub mod receiver;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use age::{age_preview, compute_age, compute_age_today, parse_date_of_birth, AgeParseError};
pub use controller::{FormController, FormInputSource, OutcomeSink, SubmitAck};
pub use domain::{FormInput, FormPayload, Gender, ValidatedRecord, GENDER_PLACEHOLDER};
pub use outcome::SubmissionOutcome;
pub use pipeline::{FormSubmissionPipeline, ReferenceDate};
pub use receiver::receiver_router;
pub use submission::{
    HttpSubmissionTransport, SubmissionClient, SubmissionTransport, TransportError,
    TransportResponse,
};
pub use validation::{
    is_valid_email, is_valid_mobile_number, FieldValidator, ValidationFailure, MINIMUM_AGE,
};
