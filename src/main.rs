#![allow(clippy::enum_variant_names)]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser as _;
use snafu::Report;
use supports_color::Stream;
use tracing::debug;

use crate::{
    application::{Application, ApplicationError},
    cli::Cli,
};

mod application;
mod cli;
mod config;
mod ext;
mod filesystem;
mod listing;

#[compio::main]
async fn main() -> ExitCode {
    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    setup_colors();
    debug!("Parsed CLI arguments: {cli_args:?}");

    let result = Application::run(cli_args).await;
    exit_status(result, &mut io::stdout().lock())
}

/// Writes the full error chain of a failed run to `out` and maps the
/// outcome to the process exit status.
fn exit_status(result: Result<(), ApplicationError>, out: &mut impl Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(out, "{}", Report::from_error(error));
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .without_time()
            .compact()
            .init();
    }
}

fn setup_colors() {
    colored::control::set_override(supports_color::on(Stream::Stdout).is_some());
}
