//! Live progress and campaign summaries

use crate::discovery::{Expectation, Test};
use crate::run::CampaignResult;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const RULE: &str = "###############################################################################";

/// Receives campaign events as they happen
///
/// Reporters only present; they never influence pass/fail accounting.
pub trait Reporter {
    fn campaign_started(&mut self, campaign: &str);
    fn test_started(&mut self, test: &Test);
    fn test_finished(&mut self, test: &Test, passed: bool);
    /// Only called for campaigns that ran at least one test
    fn campaign_finished(&mut self, campaign: &str, result: &CampaignResult);
}

/// Reporter that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn campaign_started(&mut self, _campaign: &str) {}
    fn test_started(&mut self, _test: &Test) {}
    fn test_finished(&mut self, _test: &Test, _passed: bool) {}
    fn campaign_finished(&mut self, _campaign: &str, _result: &CampaignResult) {}
}

/// Human-readable progress written to a terminal or buffer
pub struct ConsoleReporter<W: WriteColor> {
    out: W,
}

impl ConsoleReporter<StandardStream> {
    /// Reporter on stdout
    pub fn stdout(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        ConsoleReporter { out }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn colored(&mut self, text: &str, color: Color, dimmed: bool) {
        let _ = self
            .out
            .set_color(ColorSpec::new().set_fg(Some(color)).set_dimmed(dimmed));
        let _ = write!(self.out, "{}", text);
        let _ = self.out.reset();
    }
}

impl<W: WriteColor> Reporter for ConsoleReporter<W> {
    fn campaign_started(&mut self, campaign: &str) {
        let _ = writeln!(self.out, "{}", RULE);
        let _ = writeln!(self.out, "# Running Test Campaign '{}'", campaign);
        let _ = writeln!(self.out);
    }

    fn test_started(&mut self, test: &Test) {
        let color = match test.expectation {
            Expectation::Success => Color::Green,
            Expectation::Failure => Color::Red,
        };
        let _ = write!(self.out, "Running [");
        self.colored(test.expectation.label(), color, true);
        let _ = write!(self.out, "] test: {:40}", test.name);
        // The verdict lands on the same line once the test exits
        let _ = self.out.flush();
    }

    fn test_finished(&mut self, _test: &Test, passed: bool) {
        let _ = write!(self.out, "[");
        if passed {
            self.colored("PASSED", Color::Green, false);
        } else {
            self.colored("FAILED", Color::Red, false);
        }
        let _ = writeln!(self.out, "]");
    }

    fn campaign_finished(&mut self, campaign: &str, result: &CampaignResult) {
        let Some(rate) = result.pass_rate() else {
            return;
        };
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "# Test Campaign '{}'", campaign);
        let _ = writeln!(self.out, "- Passed:    {}", result.passed);
        let _ = writeln!(self.out, "- Failed:    {}", result.failed);
        let _ = writeln!(self.out, "- P/F Ratio: {:.1}%", rate);
        let _ = writeln!(self.out, "{}", RULE);
        let _ = write!(self.out, "\n\n\n");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    fn output(reporter: ConsoleReporter<Buffer>) -> String {
        String::from_utf8(reporter.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_progress_line() {
        let mut reporter = ConsoleReporter::new(Buffer::no_color());
        let test = Test::new("statement/if_else.arc", Expectation::Failure);

        reporter.test_started(&test);
        reporter.test_finished(&test, true);

        let text = output(reporter);
        assert_eq!(
            text,
            format!("Running [NEGATIVE] test: {:40}[PASSED]\n", "if_else")
        );
    }

    #[test]
    fn test_summary_rate() {
        let mut reporter = ConsoleReporter::new(Buffer::no_color());
        let result = CampaignResult {
            passed: 3,
            failed: 1,
        };

        reporter.campaign_finished("task", &result);

        let text = output(reporter);
        assert!(text.contains("# Test Campaign 'task'"));
        assert!(text.contains("- Passed:    3"));
        assert!(text.contains("- Failed:    1"));
        assert!(text.contains("75.0%"));
    }

    #[test]
    fn test_empty_campaign_has_no_summary() {
        let mut reporter = ConsoleReporter::new(Buffer::no_color());
        reporter.campaign_finished("project", &CampaignResult::new());
        assert!(output(reporter).is_empty());
    }

    #[test]
    fn test_colored_labels() {
        let mut reporter = ConsoleReporter::new(Buffer::ansi());
        let test = Test::new("a.arc", Expectation::Success);
        reporter.test_started(&test);

        let text = output(reporter);
        assert!(text.contains("\x1b["));
        assert_eq!(crate::sanitize::strip_ansi(&text), format!("Running [POSITIVE] test: {:40}", "a"));
    }
}
