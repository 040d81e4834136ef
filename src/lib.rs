//! # arcana-testenv
//!
//! A test-campaign runner for the `arcana` binary.
//!
//! Each campaign is a directory tree of `.arc` scripts (or a single `arcfile`
//! entry point). Scripts mentioning "negative" are expected to make `arcana`
//! exit with code 255, all others with code 0. Every script is run as
//! `arcana -s <script> --debug`, its output is stripped of terminal escapes and
//! stored in `<campaign>/<script>.log`, and a pass/fail summary is printed per
//! campaign.

pub mod discovery;
pub mod error;
pub mod report;
pub mod run;
pub mod sanitize;

pub use discovery::{discover, DiscoveryRules, Expectation, Test};
pub use error::{Error, Result};
pub use report::{ConsoleReporter, Reporter, SilentReporter};
pub use run::{
    run_campaigns, Campaign, CampaignResult, CampaignSummary, Execution, Executor, RunParams,
    TargetBinary,
};
pub use sanitize::strip_ansi;

use std::ffi::OsString;
use std::path::PathBuf;
use termcolor::ColorChoice;

/// Builder for configuring and running test campaigns
///
/// # Examples
///
/// ```no_run
/// use arcana_testenv::testenv;
///
/// // The four default campaigns under ../
/// testenv::run("..").execute().unwrap();
///
/// // A custom selection against a freshly built binary
/// let summaries = testenv::run("tests")
///     .binary("target/debug/arcana")
///     .campaigns(["statement", "task"])
///     .output_dir("results")
///     .colors(false)
///     .execute()
///     .unwrap();
///
/// for summary in summaries {
///     println!("{}: {} failed", summary.campaign, summary.result.failed);
/// }
/// ```
pub struct Builder {
    tests_dir: PathBuf,
    params: RunParams,
}

impl Builder {
    /// Create a new builder rooted at the given tests directory
    fn new(tests_dir: impl Into<PathBuf>) -> Self {
        let tests_dir = tests_dir.into();
        Self {
            params: RunParams::new(&tests_dir),
            tests_dir,
        }
    }

    /// Use this program as the target binary, keeping its arguments
    pub fn binary(mut self, program: impl Into<OsString>) -> Self {
        self.params.binary.program = program.into();
        self
    }

    /// Replace the whole target binary description
    pub fn target(mut self, target: TargetBinary) -> Self {
        self.params = self.params.binary(target);
        self
    }

    /// Run only the named campaigns, in the given order
    ///
    /// Each campaign is rooted at `<tests_dir>/<name>`.
    pub fn campaigns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let campaigns = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let root = self.tests_dir.join(&name);
                Campaign::new(name, root)
            })
            .collect();
        self.params = self.params.campaigns(campaigns);
        self
    }

    /// Append a campaign with an explicit root
    pub fn campaign(mut self, name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.params = self.params.campaign(Campaign::new(name, root));
        self
    }

    /// Set the directory receiving campaign logs
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.params = self.params.output_root(dir);
        self
    }

    /// Set the exit code that counts as an expected failure
    pub fn failure_code(mut self, code: i32) -> Self {
        self.params = self.params.failure_code(code);
        self
    }

    /// Set discovery rules (suffix, sentinel, fail marker)
    pub fn rules(mut self, rules: DiscoveryRules) -> Self {
        self.params = self.params.rules(rules);
        self
    }

    /// Enable or disable colored console output
    pub fn colors(mut self, enabled: bool) -> Self {
        self.params = self.params.use_colors(enabled);
        self
    }

    /// The parameters this builder will run with
    pub fn params(&self) -> &RunParams {
        &self.params
    }

    /// Run all campaigns, reporting progress on stdout
    ///
    /// # Returns
    /// One summary per campaign that had tests, or the first environment failure.
    pub fn execute(self) -> Result<Vec<CampaignSummary>> {
        let choice = if self.params.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut reporter = ConsoleReporter::stdout(choice);
        self.execute_with(&mut reporter)
    }

    /// Run all campaigns with a custom reporter
    pub fn execute_with(self, reporter: &mut dyn Reporter) -> Result<Vec<CampaignSummary>> {
        if self.params.campaigns.is_empty() {
            return Err(Error::Generic("No campaigns configured".to_string()));
        }
        run::run_with_binary(&self.params, reporter)
    }
}

/// Create a new campaign builder for the given tests directory
///
/// This is the main entry point for running campaigns from code.
pub mod testenv {
    use super::*;

    /// Create a new builder whose default campaigns live under `tests_dir`
    pub fn run(tests_dir: impl Into<PathBuf>) -> Builder {
        Builder::new(tests_dir)
    }
}
