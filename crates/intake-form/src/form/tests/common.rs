use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing_subscriber::fmt::MakeWriter;

use crate::form::controller::OutcomeSink;
use crate::form::domain::FormInput;
use crate::form::outcome::SubmissionOutcome;
use crate::form::pipeline::{FormSubmissionPipeline, ReferenceDate};
use crate::form::submission::{
    SubmissionClient, SubmissionTransport, TransportError, TransportResponse,
};

pub(super) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub(super) fn valid_input() -> FormInput {
    FormInput::new(
        "Jane Doe",
        "jane@example.com",
        "09171234567",
        "01/01/2000",
        "Female",
    )
}

/// Transport that answers every request with the same canned result and keeps the bodies.
pub(super) struct RecordingTransport {
    response: Result<TransportResponse, TransportError>,
    requests: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub(super) fn responding(status: u16, body: &str) -> Self {
        Self {
            response: Ok(TransportResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn failing(error: TransportError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("request mutex poisoned").clone()
    }
}

#[async_trait]
impl SubmissionTransport for RecordingTransport {
    async fn post_json(&self, body: String) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .expect("request mutex poisoned")
            .push(body);
        self.response.clone()
    }
}

pub(super) fn pipeline_with(
    transport: Arc<RecordingTransport>,
) -> FormSubmissionPipeline<RecordingTransport> {
    FormSubmissionPipeline::new(SubmissionClient::new(transport))
        .with_reference_date(ReferenceDate::Fixed(reference_date()))
}

#[derive(Default)]
pub(super) struct RecordingSink {
    pub(super) messages: Vec<String>,
}

impl OutcomeSink for RecordingSink {
    fn display(&mut self, outcome: &SubmissionOutcome) {
        self.messages.push(outcome.message());
    }
}

/// In-memory log writer for asserting on what a subscriber emitted.
#[derive(Clone, Default)]
pub(super) struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub(super) fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync {
        tracing_subscriber::fmt()
            .with_writer(self.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish()
    }

    pub(super) fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer poisoned").clone();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Field values of [`valid_input`] that must never reach a log line.
pub(super) const PERSONAL_VALUES: [&str; 5] = [
    "Jane Doe",
    "jane@example.com",
    "09171234567",
    "01/01/2000",
    "Female",
];
