//! clickonce CLI - generate a signed ClickOnce deployment package
//!
//! Usage: clickonce [ options ]

use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;

use clickonce::config::load_layered;
use clickonce::infrastructure::LocalFs;
use clickonce::presentation::{create_package_use_case, init_logging, output, Cli};
use clickonce::PackageError;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return clap_failure(err),
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let working_dir = std::env::current_dir()?;
    let loaded = load_layered(cli.config.as_deref(), &working_dir)?;
    eprint!("{}", output::render_config_warnings(&loaded.warnings));

    let raw = cli.to_raw_parameters(&loaded.config);
    let params = raw.validate(&LocalFs::new()).map_err(PackageError::from)?;

    if cli.verbose > 0 {
        print!("{}", output::render_parameter_summary(&params));
    }

    let report = create_package_use_case(&loaded.config).execute(&params)?;
    if cli.verbose > 0 {
        print!("{}", output::render_report(&report));
    }
    Ok(())
}

fn format_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<PackageError>() {
        Some(PackageError::Validation(errors)) => output::render_validation_errors(errors),
        Some(other) => output::render_fatal(&other.to_string()),
        None => output::render_fatal(&format!("{:#}", err)),
    }
}

fn clap_failure(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        _ => {
            let rendered = err.to_string();
            let message = rendered
                .lines()
                .next()
                .unwrap_or_default()
                .trim_start_matches("error: ");
            eprint!("{}", output::render_usage_error(message));
            ExitCode::FAILURE
        }
    }
}
