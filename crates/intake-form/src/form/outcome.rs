use std::fmt;

use super::validation::ValidationFailure;

/// Result of one submit attempt, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// 2xx response with the full response body.
    Success(String),
    RejectedByServer(u16),
    TransportFailure(String),
    ValidationFailure(ValidationFailure),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success(_) => "success",
            SubmissionOutcome::RejectedByServer(_) => "rejected_by_server",
            SubmissionOutcome::TransportFailure(_) => "transport_failure",
            SubmissionOutcome::ValidationFailure(_) => "validation_failure",
        }
    }

    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Success(body) => format!("Response: {body}"),
            SubmissionOutcome::RejectedByServer(status) => format!("Error: {status}"),
            SubmissionOutcome::TransportFailure(detail) => format!("Submission failed: {detail}"),
            SubmissionOutcome::ValidationFailure(reason) => reason.to_string(),
        }
    }
}

impl fmt::Display for SubmissionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<ValidationFailure> for SubmissionOutcome {
    fn from(value: ValidationFailure) -> Self {
        Self::ValidationFailure(value)
    }
}
