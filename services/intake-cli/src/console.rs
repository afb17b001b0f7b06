use crate::infra::{parse_date, TerminalSink};
use chrono::{Local, NaiveDate};
use clap::Args;
use intake_form::config::{parse_endpoint, AppConfig};
use intake_form::error::AppError;
use intake_form::form::{
    compute_age, FormController, FormInput, FormInputSource, FormSubmissionPipeline, Gender,
    OutcomeSink, ReferenceDate, SubmissionClient, SubmissionTransport, SubmitAck,
    GENDER_PLACEHOLDER,
};
use std::io::Write;
use std::sync::Arc;
use tokio::runtime::Handle;

#[derive(Args, Debug, Clone)]
pub(crate) struct SubmitArgs {
    /// Full name as it should appear on the record
    #[arg(long, default_value = "")]
    pub(crate) full_name: String,
    /// Contact email address
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    /// Mobile number, 11 digits starting with 09
    #[arg(long, default_value = "")]
    pub(crate) mobile_number: String,
    /// Date of birth (DD/MM/YYYY)
    #[arg(long, default_value = "")]
    pub(crate) date_of_birth: String,
    /// One of the labels listed by `genders`
    #[arg(long, default_value = GENDER_PLACEHOLDER)]
    pub(crate) gender: String,
    /// Measure the age against this date instead of today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Post to this URL instead of the configured endpoint
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
}

impl FormInputSource for SubmitArgs {
    fn capture(&self) -> FormInput {
        FormInput::new(
            self.full_name.as_str(),
            self.email.as_str(),
            self.mobile_number.as_str(),
            self.date_of_birth.as_str(),
            self.gender.as_str(),
        )
    }
}

#[derive(Args, Debug)]
pub(crate) struct AgeArgs {
    /// Date of birth (DD/MM/YYYY)
    #[arg(long)]
    pub(crate) date_of_birth: String,
    /// Reference date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_submit(
    args: SubmitArgs,
    mut config: AppConfig,
    runtime: Handle,
) -> Result<(), AppError> {
    if let Some(endpoint) = args.endpoint.as_deref() {
        config.submission.endpoint = parse_endpoint(endpoint)?;
    }

    let client = SubmissionClient::from_config(&config.submission)?;
    let reference_date = args.today.map(ReferenceDate::Fixed).unwrap_or_default();
    let pipeline = FormSubmissionPipeline::new(client).with_reference_date(reference_date);
    let mut controller = FormController::new(Arc::new(pipeline), runtime);
    let mut sink = TerminalSink::new(std::io::stdout());

    submit_and_report(&mut controller, &args, &mut sink);
    Ok(())
}

/// Fire one submit action and show every outcome it produces, blocking until the network call
/// finishes.
pub(crate) fn submit_and_report<T, S, W>(
    controller: &mut FormController<T>,
    source: &S,
    sink: &mut TerminalSink<W>,
) where
    T: SubmissionTransport + 'static,
    S: FormInputSource,
    W: Write,
{
    let ack = controller.submit_from(source);
    if ack == SubmitAck::Dispatched {
        sink.notice(&ack.message());
    }

    controller.drain(sink);
    while let Some(outcome) = controller.wait_next() {
        sink.display(&outcome);
    }
}

pub(crate) fn run_age(args: AgeArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let age = compute_age(&args.date_of_birth, today)?;
    println!("Age: {age}");
    Ok(())
}

pub(crate) fn list_genders() {
    for option in Gender::options() {
        println!("{option}");
    }
}
