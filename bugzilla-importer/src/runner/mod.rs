//! Orchestrates a Bugzilla import run.

mod config;
mod error;

pub use config::{FailurePolicy, RunnerConfig, DEFAULT_TIMEOUT};
pub use error::{ConfigError, RunnerError};

use crate::client::{GitHubV2Client, IssuesApi};
use crate::export::{load_export, BugRecord};
use crate::issues::{derive_labels, replicate_bug};
use crate::summary::{ProcessingResult, RunSummary};
use crate::templates::{generate_issue_title, BodyRenderer};
use tracing::{error, info, warn};

/// Orchestrates a full import: reads the export, then replicates every bug
/// in document order, one at a time.
pub struct Runner<A = GitHubV2Client> {
    config: RunnerConfig,
    api: A,
    renderer: BodyRenderer,
}

impl Runner<GitHubV2Client> {
    /// Builds a runner talking to the configured GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Client`] if the HTTP client cannot be built.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let api = GitHubV2Client::new(&config)?;
        Ok(Self::with_api(config, api))
    }
}

impl<A: IssuesApi> Runner<A> {
    /// Builds a runner on top of an existing [`IssuesApi`].
    pub fn with_api(config: RunnerConfig, api: A) -> Self {
        Self {
            config,
            api,
            renderer: BodyRenderer::new(),
        }
    }

    /// Returns the API the runner talks to.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Executes the full import.
    ///
    /// Bug failures do not make this return an error; they are recorded in
    /// the returned [`RunSummary`]. Under [`FailurePolicy::Abort`] the run
    /// stops at the first failed bug.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Export`] if the export cannot be read, in which
    /// case no remote call has been made.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new(self.config.dry_run());
        let bugs = load_export(self.config.export_path())?;
        summary.bugs_read = bugs.len();

        if bugs.is_empty() {
            warn!("No bugs found in export");
            return Ok(summary);
        }

        if self.config.dry_run() {
            print_dry_run_preview(&bugs, self.config.repository(), &self.renderer);
            return Ok(summary);
        }

        info!(
            count = bugs.len(),
            repository = %self.config.repository(),
            "Importing bugs"
        );

        for (index, bug) in bugs.iter().enumerate() {
            info!(
                bug_id = %bug.id,
                position = index + 1,
                total = bugs.len(),
                "Processing bug"
            );

            match replicate_bug(&self.api, self.config.repository(), &self.renderer, bug).await {
                Ok(replicated) => summary.record_result(&ProcessingResult::from(&replicated)),
                Err(failure) => {
                    error!(
                        bug_id = %failure.bug_id,
                        reached = %failure.reached,
                        error = %failure.source,
                        "Failed to replicate bug"
                    );
                    summary.record_result(&ProcessingResult::from(&failure));

                    if self.config.failure_policy() == FailurePolicy::Abort {
                        warn!(bug_id = %failure.bug_id, "Aborting run");
                        summary.aborted_at = Some(failure.bug_id);
                        break;
                    }
                }
            }
        }

        Ok(summary)
    }
}

fn print_dry_run_preview(bugs: &[BugRecord], repository: &str, renderer: &BodyRenderer) {
    println!("\n[DRY RUN] Import into {repository}");
    println!("  Found {} bugs:\n", bugs.len());

    for (i, bug) in bugs.iter().enumerate() {
        println!("  [{}/{}] Bug {}", i + 1, bugs.len(), bug.id);
        println!(
            "    Would create issue: \"{}\"",
            generate_issue_title(bug)
        );
        println!(
            "    Would add labels: {}",
            derive_labels(bug).join(", ")
        );
        println!("    Would add {} comments", bug.comments.len());
    }

    if let Some(first_bug) = bugs.first() {
        println!("\n  Sample issue body:");
        if let Ok(body) = renderer.render_issue_body(first_bug) {
            for line in body.lines().take(10) {
                println!("    {line}");
            }
            if body.lines().count() > 10 {
                println!("    ...");
            }
        }
    }

    println!();
}
