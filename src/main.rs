//! arcana-testenv CLI entry point

use anyhow::Context;
use arcana_testenv::{testenv, CampaignSummary};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Run arcana test campaigns and report pass/fail per campaign.
#[derive(Debug, Parser)]
#[command(name = "arcana-testenv", version, about)]
struct Args {
    /// Target binary (defaults to $ARCANA_BIN, then `arcana` on PATH)
    #[arg(long)]
    binary: Option<PathBuf>,

    /// Directory containing one sub-directory per campaign
    #[arg(long, default_value = "..")]
    tests_dir: PathBuf,

    /// Directory receiving one log directory per campaign
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Campaign to run; repeat to run several (default: statement, variable, task, project)
    #[arg(long = "campaign", value_name = "NAME")]
    campaigns: Vec<String>,

    /// Exit code the target uses for an expected failure
    #[arg(long, default_value_t = 255, allow_negative_numbers = true)]
    failure_code: i32,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with status 1 when any test fails
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never interleave with the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let strict = args.strict;

    match run(args) {
        Ok(summaries) => {
            let failed: usize = summaries.iter().map(|s| s.result.failed).sum();
            if strict && failed > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<Vec<CampaignSummary>> {
    let mut builder = testenv::run(&args.tests_dir)
        .output_dir(&args.output_dir)
        .failure_code(args.failure_code);

    if let Some(binary) = args.binary {
        builder = builder.binary(binary);
    }
    if !args.campaigns.is_empty() {
        builder = builder.campaigns(args.campaigns);
    }
    if args.no_color {
        builder = builder.colors(false);
    }

    builder
        .execute()
        .with_context(|| format!("test run under {} aborted", args.tests_dir.display()))
}
