//! Glue between the interactive thread that owns the form and the async submission work.
//!
//! Validation runs synchronously inside [`FormController::on_submit`]. Network calls run as
//! tasks on the supplied runtime and post their outcome to a channel that only the interactive
//! thread reads, through [`FormController::drain`] or [`FormController::wait_next`].

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use super::domain::FormInput;
use super::outcome::SubmissionOutcome;
use super::pipeline::FormSubmissionPipeline;
use super::submission::SubmissionTransport;
use super::validation::ValidationFailure;

/// Supplies the raw field values when the submit action fires.
pub trait FormInputSource {
    fn capture(&self) -> FormInput;
}

/// Renders outcomes. Only ever called on the interactive thread.
pub trait OutcomeSink {
    fn display(&mut self, outcome: &SubmissionOutcome);
}

impl FormInputSource for FormInput {
    fn capture(&self) -> FormInput {
        self.clone()
    }
}

/// Immediate answer to a submit action, before any network result exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAck {
    Dispatched,
    Rejected(ValidationFailure),
}

impl SubmitAck {
    pub fn message(&self) -> String {
        match self {
            SubmitAck::Dispatched => "Form submitted!".to_string(),
            SubmitAck::Rejected(failure) => failure.to_string(),
        }
    }
}

pub struct FormController<T> {
    pipeline: Arc<FormSubmissionPipeline<T>>,
    runtime: Handle,
    outcomes_tx: UnboundedSender<SubmissionOutcome>,
    outcomes_rx: UnboundedReceiver<SubmissionOutcome>,
    pending: usize,
}

impl<T> FormController<T>
where
    T: SubmissionTransport + 'static,
{
    pub fn new(pipeline: Arc<FormSubmissionPipeline<T>>, runtime: Handle) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            pipeline,
            runtime,
            outcomes_tx,
            outcomes_rx,
            pending: 0,
        }
    }

    /// Outcomes posted but not yet delivered to a sink.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn submit_from<S>(&mut self, source: &S) -> SubmitAck
    where
        S: FormInputSource + ?Sized,
    {
        self.on_submit(source.capture())
    }

    /// Handle one submit action. Concurrent submissions are not deduplicated.
    pub fn on_submit(&mut self, input: FormInput) -> SubmitAck {
        let record = match self.pipeline.validate(&input) {
            Ok(record) => record,
            Err(failure) => {
                debug!(%failure, "form failed validation");
                self.post(SubmissionOutcome::ValidationFailure(failure.clone()));
                return SubmitAck::Rejected(failure);
            }
        };

        info!("dispatching form submission");

        let pipeline = Arc::clone(&self.pipeline);
        let outcomes = self.outcomes_tx.clone();
        self.pending += 1;
        let dispatch = self
            .runtime
            .spawn(async move { pipeline.dispatch(record).await });
        self.runtime.spawn(async move {
            let outcome = match dispatch.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!(error = %err, "form submission task did not complete");
                    SubmissionOutcome::TransportFailure(format!(
                        "submission task did not complete: {err}"
                    ))
                }
            };
            debug!(kind = outcome.kind(), "submission outcome ready");
            if outcomes.send(outcome).is_err() {
                debug!("form controller dropped before the outcome arrived");
            }
        });

        SubmitAck::Dispatched
    }

    /// Deliver every outcome that is already available. Returns how many were shown.
    pub fn drain<S>(&mut self, sink: &mut S) -> usize
    where
        S: OutcomeSink + ?Sized,
    {
        let mut delivered = 0;
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.pending = self.pending.saturating_sub(1);
            sink.display(&outcome);
            delivered += 1;
        }
        delivered
    }

    /// Block the calling thread until the next outcome arrives.
    ///
    /// Returns `None` when nothing is outstanding. Must not be called from inside the runtime.
    pub fn wait_next(&mut self) -> Option<SubmissionOutcome> {
        if self.pending == 0 {
            return None;
        }

        let outcome = self.outcomes_rx.blocking_recv()?;
        self.pending -= 1;
        Some(outcome)
    }

    fn post(&mut self, outcome: SubmissionOutcome) {
        if self.outcomes_tx.send(outcome).is_ok() {
            self.pending += 1;
        }
    }
}
