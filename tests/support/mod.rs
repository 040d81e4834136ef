//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Write `content` at `dir/rel`, creating parent directories
pub fn write_script(dir: &Path, rel: &str, content: &str) -> PathBuf {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Install a stand-in for the arcana binary
///
/// It expects `-s <path> --debug`, prints colored output naming the script and
/// exits 255 when the script contains "negative" (any case), 3 when it
/// contains "crash", and 0 otherwise.
#[cfg(unix)]
pub fn fake_arcana(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-arcana");
    let script = r#"#!/bin/sh
[ "$1" = "-s" ] || { echo "bad flag: $1" >&2; exit 64; }
[ "$3" = "--debug" ] || { echo "missing --debug" >&2; exit 64; }
name=$(basename "$2")
printf '\033[1;32mrunning\033[0m %s\n' "$name"
if grep -qi crash "$2"; then
    printf '\033[31mboom\033[0m\n' >&2
    exit 3
fi
if grep -qi negative "$2"; then
    printf '\033[31merror:\033[0m rejected %s\n' "$name" >&2
    exit 255
fi
exit 0
"#;
    fs::write(&path, script).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Names of the `.log` files in `dir`, sorted
pub fn log_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
