//! Campaign execution module

pub mod campaign;
pub mod execution;
pub mod params;

// Re-export public types
pub use campaign::{Campaign, CampaignResult, CampaignSummary};
pub use execution::{Execution, Executor, TargetBinary};
pub use params::RunParams;

use crate::discovery::discover;
use crate::error::Result;
use crate::report::Reporter;
use tracing::debug;

/// Run every configured campaign in order
///
/// Campaigns without tests are skipped silently and produce no summary. An
/// environment failure stops the whole run.
pub fn run_campaigns(
    params: &RunParams,
    executor: &dyn Executor,
    reporter: &mut dyn Reporter,
) -> Result<Vec<CampaignSummary>> {
    let mut summaries = Vec::new();

    for campaign in &params.campaigns {
        reporter.campaign_started(&campaign.name);

        let tests = discover(&campaign.root, &params.rules);
        if tests.is_empty() {
            debug!(campaign = %campaign.name, root = %campaign.root.display(), "no tests, skipping");
            continue;
        }

        let result = campaign::run_campaign(campaign, tests, params, executor, reporter)?;
        reporter.campaign_finished(&campaign.name, &result);

        summaries.push(CampaignSummary {
            campaign: campaign.name.clone(),
            result,
        });
    }

    Ok(summaries)
}

/// Run every configured campaign against the configured target binary
pub fn run_with_binary(params: &RunParams, reporter: &mut dyn Reporter) -> Result<Vec<CampaignSummary>> {
    run_campaigns(params, &params.binary, reporter)
}
