//! Target binary invocation

use crate::discovery::Test;
use crate::error::{Error, Result};
use crate::sanitize::strip_ansi;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command as StdCommand, ExitStatus};
use tracing::debug;

/// Default target binary, resolved through `PATH`
pub const DEFAULT_PROGRAM: &str = "arcana";

/// Captured outcome of one run of the target binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Sanitized standard output
    pub stdout: String,
    /// Sanitized standard error
    pub stderr: String,
    /// Process exit code
    pub exit_code: i32,
}

impl Execution {
    /// Log file content: stdout then stderr, no separator
    pub fn log_contents(&self) -> String {
        let mut contents = String::with_capacity(self.stdout.len() + self.stderr.len());
        contents.push_str(&self.stdout);
        contents.push_str(&self.stderr);
        contents
    }
}

/// Runs a single test and reports what happened
///
/// An `Err` is an environment failure (the test could not be run at all), never
/// a test failure.
pub trait Executor {
    fn execute(&self, test: &Test) -> Result<Execution>;
}

/// The binary under test and its fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetBinary {
    /// Program name or path
    pub program: OsString,
    /// Flag introducing the script path
    pub script_flag: String,
    /// Arguments appended after the script path
    pub extra_args: Vec<String>,
}

impl TargetBinary {
    /// Create a target with the default `-s <path> --debug` arguments
    pub fn new(program: impl Into<OsString>) -> Self {
        TargetBinary {
            program: program.into(),
            script_flag: "-s".to_string(),
            extra_args: vec!["--debug".to_string()],
        }
    }

    /// Set the flag introducing the script path
    pub fn script_flag(mut self, flag: impl Into<String>) -> Self {
        self.script_flag = flag.into();
        self
    }

    /// Set the arguments appended after the script path
    pub fn extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Printable program name
    pub fn display_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Run the binary on one script, blocking until it exits
    pub fn run_script(&self, script: &Path) -> Result<Execution> {
        let mut command = StdCommand::new(&self.program);
        command
            .arg(&self.script_flag)
            .arg(script)
            .args(&self.extra_args);

        debug!(program = %self.display_name(), script = %script.display(), "spawning target");

        let output = command
            .output()
            .map_err(|e| Error::launch_error(self.display_name(), e))?;

        Ok(Execution {
            stdout: strip_ansi(&String::from_utf8_lossy(&output.stdout)),
            stderr: strip_ansi(&String::from_utf8_lossy(&output.stderr)),
            exit_code: exit_code(output.status),
        })
    }
}

impl Default for TargetBinary {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl Executor for TargetBinary {
    fn execute(&self, test: &Test) -> Result<Execution> {
        self.run_script(&test.path)
    }
}

/// Integer exit code; a signal-terminated child yields the negated signal
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_contents_order() {
        let execution = Execution {
            stdout: "out\n".to_string(),
            stderr: "err\n".to_string(),
            exit_code: 0,
        };
        assert_eq!(execution.log_contents(), "out\nerr\n");
    }

    #[test]
    fn test_default_target() {
        let target = TargetBinary::default();
        assert_eq!(target.display_name(), "arcana");
        assert_eq!(target.script_flag, "-s");
        assert_eq!(target.extra_args, ["--debug"]);
    }

    #[test]
    fn test_missing_binary_is_launch_error() {
        let target = TargetBinary::new("definitely-not-an-installed-binary-7f3a");
        let err = target.run_script(Path::new("whatever.arc")).unwrap_err();
        assert!(err.is_launch_failure(), "unexpected error: {}", err);
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_and_sanitizes() {
        let target = TargetBinary::new("sh")
            .script_flag("-c")
            .extra_args(Vec::<String>::new());
        let script = r"printf '\033[32mgreen\033[0m\n'; printf '\033[1mbold\033[0m' >&2; exit 255";
        let execution = target.run_script(Path::new(script)).unwrap();

        assert_eq!(execution.stdout, "green\n");
        assert_eq!(execution.stderr, "bold");
        assert_eq!(execution.exit_code, 255);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_exit_code() {
        let target = TargetBinary::new("sh")
            .script_flag("-c")
            .extra_args(Vec::<String>::new());
        let execution = target.run_script(Path::new("kill -9 $$")).unwrap();
        assert_eq!(execution.exit_code, -9);
    }
}
