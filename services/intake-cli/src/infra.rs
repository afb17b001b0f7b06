use chrono::NaiveDate;
use intake_form::form::{OutcomeSink, SubmissionOutcome};
use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Prints outcome messages, one per line, the way the form would toast them.
pub(crate) struct TerminalSink<W> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    pub(crate) fn notice(&mut self, message: &str) {
        if let Err(err) = writeln!(self.out, "{message}") {
            warn!(error = %err, "could not write to terminal");
        }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutcomeSink for TerminalSink<W> {
    fn display(&mut self, outcome: &SubmissionOutcome) {
        self.notice(&outcome.message());
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
