use crate::cli::CliError;
use std::process::ExitCode;
use tracing::error;

mod cli;
mod config;

fn main() -> ExitCode {
    match cli::cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("Error: {err}");
            match err {
                CliError::Graph(err) if err.is_input_error() => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
