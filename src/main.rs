//! ISO 8601 qualifier CLI entry point

mod cli;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    // Structured logging on stderr, quiet unless RUST_LOG asks for more
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    let args = cli::Cli::parse();
    match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        },
    }
}
