// Integration test utilities
//
// Builds a fake `tsh` shell script so the binary can be driven end to end
// without a Teleport cluster.

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway `tsh` that replays canned output
///
/// `tsh ls ...` prints `ls.out` (nothing if absent). `tsh status ...` prints
/// `status.out`, or fails like a logged-out client when it is absent. Every
/// invocation's arguments are appended to `calls.log`.
pub struct FakeTsh {
    dir: TempDir,
    script: PathBuf,
}

impl FakeTsh {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("tsh");
        let root = dir.path().display();
        let body = format!(
            r#"#!/bin/sh
echo "$*" >> "{root}/calls.log"
case "$1" in
  ls)
    if [ -f "{root}/ls.out" ]; then cat "{root}/ls.out"; fi
    ;;
  status)
    if [ -f "{root}/status.out" ]; then
      cat "{root}/status.out"
    else
      echo "ERROR: Not logged in." >&2
      exit 1
    fi
    ;;
esac
"#
        );
        fs::write(&script, body).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, script }
    }

    pub fn with_listing(self, listing: &str) -> Self {
        fs::write(self.dir.path().join("ls.out"), listing).unwrap();
        self
    }

    pub fn with_listing_json(self, listing: &Value) -> Self {
        self.with_listing(&listing.to_string())
    }

    pub fn with_status_json(self, status: &Value) -> Self {
        fs::write(self.dir.path().join("status.out"), status.to_string()).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        &self.script
    }

    /// Argument lists `tsh` was invoked with, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// A `tsh ls --all` element
pub fn clustered_node(cluster: &str, hostname: &str, id: u64, labels: Value) -> Value {
    json!({
        "cluster": cluster,
        "node": bare_node(hostname, id, labels),
    })
}

/// A `tsh ls` element
pub fn bare_node(hostname: &str, id: u64, labels: Value) -> Value {
    json!({
        "kind": "node",
        "version": "v2",
        "metadata": {"name": format!("uuid-{id}"), "id": id, "labels": labels},
        "spec": {"addr": "", "hostname": hostname},
    })
}

/// Parse the binary's stdout as JSON
pub fn parse_stdout(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap()
}
