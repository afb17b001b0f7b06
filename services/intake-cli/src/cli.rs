use crate::console::{list_genders, run_age, run_submit, AgeArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use intake_form::config::AppConfig;
use intake_form::error::AppError;
use intake_form::telemetry;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(
    name = "intake-form",
    about = "Validate personal details and submit them to the intake endpoint",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the form and post it to the intake endpoint
    Submit(SubmitArgs),
    /// Show the age derived from a date of birth
    Age(AgeArgs),
    /// List the gender options in display order
    Genders,
    /// Run the local development receiver
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the development receiver
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the development receiver
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Submit(args) => {
            let config = AppConfig::load()?;
            telemetry::init(&config.telemetry)?;
            let runtime = Runtime::new()?;
            run_submit(args, config, runtime.handle().clone())
        }
        Command::Age(args) => run_age(args),
        Command::Genders => {
            list_genders();
            Ok(())
        }
        Command::Serve(args) => {
            let config = AppConfig::load()?;
            telemetry::init(&config.telemetry)?;
            let runtime = Runtime::new()?;
            runtime.block_on(server::run(args, config))
        }
    }
}
