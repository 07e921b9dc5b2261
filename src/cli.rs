use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use iso8601_qualifier::{
    CivilDateTime, Iso8601Parser, MIN_REPORT_WIDTH, ReportOptions, StrictParser, qualifier_suite, verify, write_text,
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "iso8601-qualifier", version, about = "Grade ISO 8601 parsers against the qualifier suite")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the qualifier suite against the reference parser
    Grade(GradeArgs),
    /// Parse each input and print the normalized value or `rejected`
    Parse {
        #[arg(required = true)]
        inputs: Vec<String>,
    },
}

#[derive(Debug, Args)]
struct GradeArgs {
    /// Increase report detail (-v: fixture counts, -vv: failure details)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Write the report to this file instead of stderr
    #[arg(long)]
    outfile: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Name printed in the report header
    #[arg(long)]
    user: Option<String>,

    /// Report width in columns
    #[arg(
        long,
        default_value_t = 100,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(MIN_REPORT_WIDTH as u64..),
    )]
    width: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn run(cli: Cli) -> Result<ExitCode, CliError> {
    execute(cli, &mut io::stdout().lock(), &mut io::stderr().lock())
}

/// Runs `cli` with explicit standard output and report streams.
fn execute(cli: Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<ExitCode, CliError> {
    match cli.command {
        Command::Grade(args) => grade(&args, stderr),
        Command::Parse { inputs } => parse(&inputs, stdout),
    }
}

fn grade(args: &GradeArgs, stderr: &mut dyn Write) -> Result<ExitCode, CliError> {
    let report = verify(&StrictParser, qualifier_suite());
    info!(
        parser = StrictParser.name(),
        passed = report.passed(),
        failed = report.failed(),
        "suite finished"
    );

    let mut file;
    let mut out: &mut dyn Write = match &args.outfile {
        Some(path) => {
            file = BufWriter::new(File::create(path)?);
            &mut file
        },
        None => stderr,
    };

    match args.format {
        Format::Text => {
            let options = ReportOptions {
                title:     None,
                user:      args.user.clone(),
                verbosity: args.verbose,
                max_width: args.width,
            };
            write_text(&mut out, &report, &options)?;
        },
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        },
    }
    out.flush()?;

    Ok(if report.is_pass() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn parse(inputs: &[String], out: &mut dyn Write) -> Result<ExitCode, CliError> {
    let mut all_parsed = true;
    for input in inputs {
        match CivilDateTime::parse_with_cause(input) {
            Ok(value) => writeln!(out, "{input}\t{value}")?,
            Err(cause) => {
                all_parsed = false;
                info!(input = input.as_str(), %cause, "input rejected");
                writeln!(out, "{input}\trejected")?;
            },
        }
    }
    Ok(if all_parsed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
