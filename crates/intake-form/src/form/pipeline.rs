use chrono::{Local, NaiveDate};
use tracing::debug;

use super::domain::{FormInput, ValidatedRecord};
use super::outcome::SubmissionOutcome;
use super::submission::{SubmissionClient, SubmissionTransport};
use super::validation::{FieldValidator, ValidationFailure};

/// Date the age is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceDate {
    #[default]
    Today,
    Fixed(NaiveDate),
}

impl ReferenceDate {
    pub fn resolve(self) -> NaiveDate {
        match self {
            ReferenceDate::Today => Local::now().date_naive(),
            ReferenceDate::Fixed(date) => date,
        }
    }
}

/// Validation followed by submission, in that order, for one form at a time.
pub struct FormSubmissionPipeline<T> {
    validator: FieldValidator,
    client: SubmissionClient<T>,
    reference_date: ReferenceDate,
}

impl<T> FormSubmissionPipeline<T>
where
    T: SubmissionTransport + 'static,
{
    pub fn new(client: SubmissionClient<T>) -> Self {
        Self {
            validator: FieldValidator::default(),
            client,
            reference_date: ReferenceDate::Today,
        }
    }

    pub fn with_reference_date(mut self, reference_date: ReferenceDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn reference_date(&self) -> ReferenceDate {
        self.reference_date
    }

    pub fn validate(&self, input: &FormInput) -> Result<ValidatedRecord, ValidationFailure> {
        self.validator.validate(input, self.reference_date.resolve())
    }

    pub async fn dispatch(&self, record: ValidatedRecord) -> SubmissionOutcome {
        self.client.submit(record).await
    }

    /// Validate, then post. A validation failure ends the attempt before any request is made.
    pub async fn run(&self, input: FormInput) -> SubmissionOutcome {
        match self.validate(&input) {
            Ok(record) => self.dispatch(record).await,
            Err(failure) => {
                debug!(%failure, "form failed validation");
                SubmissionOutcome::ValidationFailure(failure)
            }
        }
    }
}
