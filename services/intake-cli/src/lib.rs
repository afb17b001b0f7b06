mod cli;
mod console;
mod infra;
mod routes;
mod server;

use intake_form::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
