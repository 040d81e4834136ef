//! Test discovery and expectation inference
//!
//! A campaign root is walked recursively. Every file ending in the script
//! suffix, or named exactly like the sentinel, is a candidate. Candidates are
//! classified by a plain content heuristic: if the fail marker appears anywhere
//! in the file, in any letter case, the test is expected to fail.

use std::ffi::OsStr;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Default suffix of test script files
pub const DEFAULT_SUFFIX: &str = ".arc";
/// Default name of the campaign-wide entry point
pub const DEFAULT_SENTINEL: &str = "arcfile";
/// Default marker for tests expected to fail
pub const DEFAULT_FAILURE_MARKER: &str = "negative";

/// Predicted outcome of a test
///
/// The declaration order is the execution order: `Success` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Expectation {
    Success,
    Failure,
}

impl Expectation {
    /// Classification label shown in progress output
    pub fn label(self) -> &'static str {
        match self {
            Expectation::Success => "POSITIVE",
            Expectation::Failure => "NEGATIVE",
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One discovered test script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Test {
    /// Location of the script
    pub path: PathBuf,
    /// File name without extension, used as the log file stem
    pub name: String,
    /// Inferred once at discovery time
    pub expectation: Expectation,
}

impl Test {
    /// Build a test from its path, deriving the name from the file stem
    pub fn new(path: impl Into<PathBuf>, expectation: Expectation) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Test {
            path,
            name,
            expectation,
        }
    }

    /// Key imposing the deterministic execution order
    ///
    /// Paths compare as whole strings, not component by component, so
    /// `c/a-b.arc` sorts before `c/a/x.arc`.
    pub fn order_key(&self) -> (Expectation, &OsStr) {
        (self.expectation, self.path.as_os_str())
    }
}

/// Rules deciding which files are tests and how they are classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRules {
    /// File name suffix of ordinary scripts
    pub suffix: String,
    /// Exact file name that supersedes every other candidate
    pub sentinel: String,
    /// Case-insensitive marker for expected failures
    pub failure_marker: String,
}

impl DiscoveryRules {
    pub fn new() -> Self {
        DiscoveryRules {
            suffix: DEFAULT_SUFFIX.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            failure_marker: DEFAULT_FAILURE_MARKER.to_string(),
        }
    }

    /// Set the script suffix
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Set the sentinel file name
    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Set the fail marker
    pub fn failure_marker(mut self, marker: impl Into<String>) -> Self {
        self.failure_marker = marker.into();
        self
    }

    /// Whether a file with this name is a test candidate
    pub fn is_candidate(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix) || self.is_sentinel(file_name)
    }

    /// Whether a file with this name is the sentinel (case-sensitive)
    pub fn is_sentinel(&self, file_name: &str) -> bool {
        file_name == self.sentinel
    }

    /// Infer the expectation from raw file content
    ///
    /// Any occurrence counts, including inside comments or string literals.
    pub fn classify(&self, content: &str) -> Expectation {
        let marker = self.failure_marker.to_lowercase();
        if content.to_lowercase().contains(&marker) {
            Expectation::Failure
        } else {
            Expectation::Success
        }
    }
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Discover every test under `root`
///
/// A missing root yields no tests. Unreadable entries are skipped with a
/// warning. When a sentinel file is present, only the first one found is
/// returned. The walk lists a directory's own files before descending into its
/// sub-directories, so a root-level sentinel wins over a nested one. The order
/// of the result is the walk order; callers sort it.
pub fn discover(root: &Path, rules: &DiscoveryRules) -> Vec<Test> {
    if !root.is_dir() {
        debug!(root = %root.display(), "campaign root not found, no tests");
        return Vec::new();
    }

    let mut tests = Vec::new();
    let mut sentinel = None;

    // Files before sub-directories at each level, then by name
    let walker = WalkDir::new(root).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot walk {}: {}", describe_walk_error(&e, root), e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !rules.is_candidate(&file_name) {
            continue;
        }

        let content = match fs::read_to_string(entry.path()) {
            Ok(content) => content,
            Err(e) => {
                warn!("Cannot read {}: {}", entry.path().display(), e);
                continue;
            }
        };

        let test = Test::new(entry.path(), rules.classify(&content));
        debug!(path = %test.path.display(), expectation = %test.expectation, "discovered test");

        if sentinel.is_none() && rules.is_sentinel(&file_name) {
            sentinel = Some(test.clone());
        }
        tests.push(test);
    }

    match sentinel {
        Some(test) => {
            debug!(path = %test.path.display(), skipped = tests.len() - 1, "sentinel supersedes other scripts");
            vec![test]
        }
        None => tests,
    }
}

fn describe_walk_error(error: &walkdir::Error, root: &Path) -> String {
    error
        .path()
        .unwrap_or(root)
        .display()
        .to_string()
}
