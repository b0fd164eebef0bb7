//! Fixture and scratch-file locations for workspace tests.

use std::path::PathBuf;

/// Path of `name` inside the checked-in `fixtures/` directory.
pub fn fixture_path(name: &str) -> PathBuf {
	PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(name)
}

/// Writable path for a file one test creates and reads back.
///
/// Files live in a per-process directory under the system temp dir, so
/// parallel test binaries never share a path.
pub fn scratch_path(name: &str) -> PathBuf {
	let dir = std::env::temp_dir().join(format!("aebridge-tests-{}", std::process::id()));
	if let Err(err) = std::fs::create_dir_all(&dir) {
		panic!("cannot create scratch dir {}: {err}", dir.display());
	}
	dir.join(name)
}
