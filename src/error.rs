//! Error types for arcana-testenv

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for campaign operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for campaign operations
///
/// Only environment-class failures surface here. A test whose exit code does
/// not match its expectation is a normal result, not an error.
#[derive(Error, Debug)]
pub enum Error {
    /// The target binary could not be spawned
    #[error("Cannot launch '{program}'")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The campaign output directory could not be reset
    #[error("Cannot prepare output directory {}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A per-test log could not be written
    #[error("Cannot write log {}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic error with message
    #[error("{0}")]
    Generic(String),

    /// Environment failure while running a campaign
    #[error("Campaign '{campaign}' aborted at test '{test}'")]
    Campaign {
        campaign: String,
        test: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a launch error
    pub fn launch_error(program: impl Into<String>, source: std::io::Error) -> Self {
        Error::Launch {
            program: program.into(),
            source,
        }
    }

    /// Create an output directory error
    pub fn output_dir_error(path: &Path, source: std::io::Error) -> Self {
        Error::OutputDir {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a log write error
    pub fn log_error(path: &Path, source: std::io::Error) -> Self {
        Error::Log {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap an environment failure with the campaign and test it interrupted
    pub fn campaign_error(campaign: impl Into<String>, test: impl Into<String>, source: Error) -> Self {
        Error::Campaign {
            campaign: campaign.into(),
            test: test.into(),
            source: Box::new(source),
        }
    }

    /// Whether the underlying cause is a failure to spawn the target binary
    pub fn is_launch_failure(&self) -> bool {
        match self {
            Error::Launch { .. } => true,
            Error::Campaign { source, .. } => source.is_launch_failure(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_campaign_error_context() {
        let launch = Error::launch_error("arcana", io::Error::new(io::ErrorKind::NotFound, "not found"));
        let err = Error::campaign_error("statement", "assign", launch);

        let msg = err.to_string();
        assert!(msg.contains("statement"));
        assert!(msg.contains("assign"));
        assert!(err.is_launch_failure());

        let cause = std::error::Error::source(&err).unwrap().to_string();
        assert!(cause.contains("arcana"));
    }

    #[test]
    fn test_output_errors_are_not_launch_failures() {
        let dir = Error::output_dir_error(Path::new("out/task"), io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(!dir.is_launch_failure());

        let log = Error::log_error(Path::new("out/task/a.log"), io::Error::new(io::ErrorKind::Other, "full"));
        assert!(!log.is_launch_failure());
        assert!(log.to_string().contains("a.log"));
    }
}
