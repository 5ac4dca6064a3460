//! Filesystem helpers shared by the CLI tests.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace")
}

/// Write `{"set": set, "target": target}` to `path`.
pub(super) fn write_instance(path: &Utf8Path, set: &[i64], target: i64) {
    let payload = serde_json::json!({ "set": set, "target": target });
    write_utf8(path, payload.to_string().as_bytes());
}
