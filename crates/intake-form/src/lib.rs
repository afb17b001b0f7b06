//! Personal details intake form.
//!
//! Raw field values are checked by [`form::FieldValidator`], the date of birth is turned into an
//! age by [`form::age`], and the resulting [`form::ValidatedRecord`] is posted as JSON by
//! [`form::SubmissionClient`].

pub mod config;
pub mod error;
pub mod form;
pub mod telemetry;
