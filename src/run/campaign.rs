//! Campaign execution: output reset, ordering, scoring and logs

use crate::discovery::{Expectation, Test};
use crate::error::{Error, Result};
use crate::report::Reporter;
use crate::run::execution::Executor;
use crate::run::params::RunParams;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A named group of tests rooted at one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub name: String,
    pub root: PathBuf,
}

impl Campaign {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Campaign {
            name: name.into(),
            root: root.into(),
        }
    }
}

/// Pass/fail tally of one campaign
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampaignResult {
    /// Tests whose exit code matched the expectation
    pub passed: usize,
    /// Tests whose exit code did not match
    pub failed: usize,
}

impl CampaignResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one finished test
    pub fn record(&mut self, passed: bool) {
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Percentage of passed tests, `None` when nothing ran
    pub fn pass_rate(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(100.0 * self.passed as f64 / self.total() as f64)
    }
}

/// Final result of one executed campaign
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSummary {
    pub campaign: String,
    pub result: CampaignResult,
}

/// Whether `exit_code` is the one the expectation predicts
pub fn outcome_matches(expectation: Expectation, exit_code: i32, failure_code: i32) -> bool {
    match expectation {
        Expectation::Success => exit_code == 0,
        Expectation::Failure => exit_code == failure_code,
    }
}

/// Sort tests into execution order: expected successes first, then by path
pub fn order_tests(tests: &mut [Test]) {
    tests.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
}

/// Delete and recreate a campaign output directory
pub fn reset_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|e| Error::output_dir_error(dir, e))?;
    }
    fs::create_dir_all(dir).map_err(|e| Error::output_dir_error(dir, e))
}

/// Run every test of a campaign and write one log per test
///
/// The campaign's output directory is reset first. The first environment
/// failure aborts the campaign; logs already written are left in place.
pub fn run_campaign(
    campaign: &Campaign,
    mut tests: Vec<Test>,
    params: &RunParams,
    executor: &dyn Executor,
    reporter: &mut dyn Reporter,
) -> Result<CampaignResult> {
    let output_dir = params.campaign_output_dir(campaign);
    reset_output_dir(&output_dir)?;

    order_tests(&mut tests);

    let mut result = CampaignResult::new();

    for test in &tests {
        reporter.test_started(test);

        let execution = executor
            .execute(test)
            .map_err(|e| Error::campaign_error(&campaign.name, &test.name, e))?;

        let passed = outcome_matches(test.expectation, execution.exit_code, params.failure_code);
        result.record(passed);
        debug!(
            test = %test.name,
            expectation = %test.expectation,
            exit_code = execution.exit_code,
            passed,
            "test finished"
        );
        reporter.test_finished(test, passed);

        let log_path = output_dir.join(format!("{}.log", test.name));
        fs::write(&log_path, execution.log_contents())
            .map_err(|e| Error::log_error(&log_path, e))?;
    }

    info!(
        campaign = %campaign.name,
        passed = result.passed,
        failed = result.failed,
        "campaign finished"
    );
    Ok(result)
}
