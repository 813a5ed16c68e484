//! `crypto-rsa` entry point: validate arguments, then describe the work for
//! the crypto engine.

use std::io;
use std::process::ExitCode;

use crypto_rsa::config::Settings;
use crypto_rsa::plan::{build_plan, print_plan};
use crypto_rsa::{CommandLine, Request, write_failure_to, write_usage_to};
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;
    init_tracing();
    run()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> color_eyre::Result<ExitCode> {
    let invocation = match CommandLine::new().interpret(std::env::args_os()) {
        Ok(Request::Run(invocation)) => invocation,
        Ok(Request::Help) => {
            write_usage_to(&mut io::stdout().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "command line rejected");
            write_failure_to(&mut io::stderr().lock(), &err)?;
            return Ok(ExitCode::FAILURE);
        }
    };
    let settings = Settings::load()?;
    let plan = build_plan(&invocation, &settings);
    print_plan(&plan)?;
    Ok(ExitCode::SUCCESS)
}
