//! Test fixture builders for CLI tests.
//!
//! These helpers create small, representative inputs (corpus files, labels,
//! fake miner scripts) used across the CLI tests. Keeping them in one place
//! keeps the individual test cases focused on behaviour.

use std::fs;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;

/// Four two-vertex graphs; the first two carry the discriminative `C-O`
/// bond, the last two do not. Interned miner label codes are predictable:
/// vertices `C -> 0`, `O -> 1`, `N -> 2`; edges `s -> 0`.
pub(super) const TRAIN_CORPUS: &str = "#\nv 0 C\nv 1 O\ne 0 1 s\n#\nv 0 C\nv 1 O\ne 0 1 s\n#\nv 0 C\nv 1 N\ne 0 1 s\n#\nv 0 N\nv 1 N\ne 0 1 s\n";

/// Labels pairing with [`TRAIN_CORPUS`]: the `C-O` graphs are positive.
pub(super) const TRAIN_LABELS: &str = "1\n1\n0\n0\n";

/// Writes `contents` under `dir` and returns the path.
pub(super) fn write_text_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("fixture file must be writable");
    path
}

/// Creates an executable shell script standing in for a miner binary.
#[cfg(unix)]
pub(super) fn fake_miner(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("fake-gspan");
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("script must be writable");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("script must be executable");
    path
}
