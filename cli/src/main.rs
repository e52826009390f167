//! CLI for the Bugzilla importer.
//!
//! This tool reads a Bugzilla XML export and recreates every bug as a GitHub
//! issue with its labels and comments.

use bugzilla_importer::{
    FailurePolicy, RunSummary, Runner, RunnerConfig, RunnerError, DEFAULT_API_URL,
};
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Invalid arguments or configuration.
const EXIT_USAGE: u8 = 1;
/// Export file missing or unreadable.
const EXIT_UNAVAILABLE: u8 = 2;
/// Export is not valid XML.
const EXIT_MALFORMED: u8 = 3;
/// I/O error while reading the export.
const EXIT_IO: u8 = 4;
/// Export lacks required bug fields.
const EXIT_INCOMPLETE: u8 = 5;
/// One or more bugs failed to replicate.
const EXIT_REPLICATION_FAILED: u8 = 6;

/// Bugzilla Importer - Import a Bugzilla XML export into GitHub Issues.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bugzilla XML export to import.
    xml_file: PathBuf,

    /// Target repository, as `owner/name`.
    repository: String,

    /// GitHub login.
    user: String,

    /// GitHub API token.
    #[arg(env = "GITHUB_TOKEN", hide_env_values = true)]
    api_token: String,

    /// Base URL of the GitHub v2 API.
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Minimum delay between API requests in milliseconds.
    #[arg(long, default_value_t = 0)]
    request_delay_ms: u64,

    /// Preview the import without calling the API.
    #[arg(long)]
    dry_run: bool,

    /// Continue with the next bug when one fails instead of stopping.
    #[arg(long)]
    continue_on_error: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            return ExitCode::from(EXIT_USAGE);
        }
    };

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);

            if summary.has_failures() {
                ExitCode::from(EXIT_REPLICATION_FAILED)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            print_usage();
            ExitCode::from(exit_code(&e))
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let policy = if args.continue_on_error {
        FailurePolicy::Continue
    } else {
        FailurePolicy::Abort
    };

    let config = RunnerConfig::new(args.xml_file, args.repository, args.user, args.api_token)?
        .with_api_url(&args.api_url)?
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_request_delay(Duration::from_millis(args.request_delay_ms))
        .with_dry_run(args.dry_run)
        .with_failure_policy(policy);

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Maps an early failure to its exit code.
fn exit_code(error: &RunnerError) -> u8 {
    match error {
        RunnerError::Config(_) => EXIT_USAGE,
        RunnerError::Export(e) if e.is_unavailable() => EXIT_UNAVAILABLE,
        RunnerError::Export(e) if e.is_malformed() => EXIT_MALFORMED,
        RunnerError::Export(e) if e.is_incomplete() => EXIT_INCOMPLETE,
        RunnerError::Export(_) => EXIT_IO,
        RunnerError::Client(_) => EXIT_USAGE,
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage:");
    eprintln!();
    eprintln!("    bugzilla-importer <xml_file> <owner/repo> <user> <api_token> [OPTIONS]");
    eprintln!();
    eprintln!("Example:");
    eprintln!();
    eprintln!("    bugzilla-importer issues.xml acme/widgets octocat 0123456789abcdef0123456789abcdef");
    eprintln!();
    eprintln!("Run with --help for all options.");
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Bugs read: {}", summary.bugs_read);

    if !summary.dry_run {
        println!("  Issues created: {}", summary.issues_created);
        println!("  Labels added: {}", summary.labels_added);
        println!("  Comments added: {}", summary.comments_added);
        println!("  Bugs failed: {}", summary.failed_bugs.len());
        if !summary.failed_bugs.is_empty() {
            println!("  Failed bugs: {}", summary.failed_bugs.join(", "));
        }
        if let Some(bug_id) = &summary.aborted_at {
            println!("  Stopped at bug: {bug_id}");
        }
    }
}
