use clap::Parser;
use extsort::cli::{Args, SortCommand, run_cli};
use extsort::output::OutputFormatter;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let command = SortCommand::from_args(&args);
    match run_cli(&command) {
        Ok(_) => ExitCode::SUCCESS,
        // Nothing was touched; report and return normally.
        Err(e) if !e.is_fatal() => {
            OutputFormatter::plain(&OutputFormatter::error_line(&e.to_string()));
            ExitCode::SUCCESS
        }
        Err(e) => {
            OutputFormatter::error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
