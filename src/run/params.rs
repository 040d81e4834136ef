//! Configuration parameters for campaign runs

use crate::discovery::DiscoveryRules;
use crate::run::campaign::Campaign;
use crate::run::execution::TargetBinary;
use std::path::{Path, PathBuf};

/// Campaigns run when none are configured explicitly, in this order
pub const DEFAULT_CAMPAIGNS: [&str; 4] = ["statement", "variable", "task", "project"];

/// Exit code the target binary uses for an expected failure
pub const DEFAULT_FAILURE_CODE: i32 = 255;

/// Environment variable overriding the target binary
pub const BINARY_ENV_VAR: &str = "ARCANA_BIN";

/// Configuration parameters for running campaigns
#[derive(Debug, Clone)]
pub struct RunParams {
    /// Campaigns in execution order
    pub campaigns: Vec<Campaign>,
    /// Which files are tests and how they are classified
    pub rules: DiscoveryRules,
    /// The binary under test and its fixed arguments
    pub binary: TargetBinary,
    /// Directory receiving one sub-directory of logs per campaign
    pub output_root: PathBuf,
    /// Exit code that counts as an expected failure
    pub failure_code: i32,
    /// Whether console output is colored
    pub use_colors: bool,
}

impl RunParams {
    /// Create a new RunParams with default settings
    ///
    /// The default campaigns are rooted under `tests_dir`.
    pub fn new(tests_dir: impl AsRef<Path>) -> Self {
        let tests_dir = tests_dir.as_ref();
        let campaigns = DEFAULT_CAMPAIGNS
            .iter()
            .map(|name| Campaign::new(*name, tests_dir.join(name)))
            .collect();

        // Check ARCANA_BIN environment variable
        let binary = match std::env::var(BINARY_ENV_VAR) {
            Ok(program) if !program.trim().is_empty() => TargetBinary::new(program),
            _ => TargetBinary::default(),
        };

        RunParams {
            campaigns,
            rules: DiscoveryRules::new(),
            binary,
            output_root: PathBuf::from("."),
            failure_code: DEFAULT_FAILURE_CODE,
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Replace the campaign list
    pub fn campaigns(mut self, campaigns: Vec<Campaign>) -> Self {
        self.campaigns = campaigns;
        self
    }

    /// Append a campaign
    pub fn campaign(mut self, campaign: Campaign) -> Self {
        self.campaigns.push(campaign);
        self
    }

    /// Set the discovery rules
    pub fn rules(mut self, rules: DiscoveryRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the target binary
    pub fn binary(mut self, binary: TargetBinary) -> Self {
        self.binary = binary;
        self
    }

    /// Set the directory receiving campaign logs
    pub fn output_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_root = dir.into();
        self
    }

    /// Set the expected-failure exit code
    pub fn failure_code(mut self, code: i32) -> Self {
        self.failure_code = code;
        self
    }

    /// Enable or disable colored console output
    pub fn use_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Directory holding the logs of one campaign
    pub fn campaign_output_dir(&self, campaign: &Campaign) -> PathBuf {
        self.output_root.join(&campaign.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_campaigns() {
        let params = RunParams::new("..");
        let names: Vec<_> = params.campaigns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CAMPAIGNS);
        assert_eq!(params.campaigns[2].root, Path::new("..").join("task"));
        assert_eq!(params.failure_code, 255);
    }

    #[test]
    fn test_campaign_output_dir() {
        let params = RunParams::new("tests").output_root("out");
        let campaign = Campaign::new("variable", "tests/variable");
        assert_eq!(params.campaign_output_dir(&campaign), Path::new("out").join("variable"));
    }

    #[test]
    fn test_builder_overrides() {
        let params = RunParams::new("t")
            .campaigns(vec![Campaign::new("only", "t/only")])
            .failure_code(3)
            .use_colors(false);
        assert_eq!(params.campaigns.len(), 1);
        assert_eq!(params.failure_code, 3);
        assert!(!params.use_colors);
    }
}
