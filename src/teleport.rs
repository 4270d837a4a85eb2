//! Teleport node listings via `tsh`
//!
//! Two listing shapes are understood:
//! - `tsh ls --all --format=json`: `[{"cluster": "...", "node": {...}}, ...]`
//! - `tsh ls --format=json`: `[{...node...}, ...]`, with the cluster taken
//!   from `tsh status --format=json` (`{"active": {"cluster": "..."}}`)

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::{Command, Output};
use tracing::{debug, warn};

use crate::cli::ClusterSource;
use crate::error::{InventoryError, Result};

/// Resource kind of SSH nodes in a listing
pub const NODE_KIND: &str = "node";

/// A Teleport resource as printed by `tsh ls`
///
/// Only `kind` is decoded up front; other kinds may have any shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Resource {
    pub kind: String,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl Resource {
    pub fn is_node(&self) -> bool {
        self.kind == NODE_KIND
    }

    /// Decode the node fields of this resource
    pub fn to_node(&self) -> serde_json::Result<Node> {
        serde_json::from_value(serde_json::Value::Object(self.fields.clone()))
    }
}

/// Fields of a `node` resource used to build the inventory
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub metadata: NodeMetadata,
    #[serde(default)]
    pub spec: NodeSpec,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeMetadata {
    /// Resource id, kept verbatim (numeric in some Teleport releases)
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub hostname: Option<String>,
}

impl Node {
    pub fn hostname(&self) -> Option<&str> {
        self.spec.hostname.as_deref()
    }
}

/// One element of a `tsh ls` array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingEntry {
    /// `tsh ls --all` wraps each resource with the cluster it belongs to
    Clustered { cluster: String, node: Resource },
    Bare(Resource),
}

impl ListingEntry {
    pub fn resource(&self) -> &Resource {
        match self {
            Self::Clustered { node, .. } => node,
            Self::Bare(node) => node,
        }
    }

    pub fn cluster(&self) -> Option<&str> {
        match self {
            Self::Clustered { cluster, .. } => Some(cluster),
            Self::Bare(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusDocument {
    #[serde(default)]
    active: Option<ActiveProfile>,
}

#[derive(Debug, Deserialize)]
struct ActiveProfile {
    #[serde(default)]
    cluster: Option<String>,
}

/// Parse the stdout of `tsh ls --format=json`
///
/// # Errors
/// `MissingInventory` if the output is not a JSON array of resources,
/// `EmptyInventory` if the array is empty.
pub fn parse_node_listing(stdout: &[u8]) -> Result<Vec<ListingEntry>> {
    let entries: Vec<ListingEntry> =
        serde_json::from_slice(stdout).map_err(InventoryError::MissingInventory)?;
    if entries.is_empty() {
        return Err(InventoryError::EmptyInventory);
    }
    Ok(entries)
}

/// Extract `active.cluster` from the stdout of `tsh status --format=json`
pub fn parse_active_cluster(stdout: &[u8]) -> Result<String> {
    let status: StatusDocument =
        serde_json::from_slice(stdout).map_err(InventoryError::StatusJson)?;
    status
        .active
        .and_then(|profile| profile.cluster)
        .ok_or(InventoryError::StatusMissingCluster)
}

/// Runs `tsh` and parses what it prints
#[derive(Debug, Clone)]
pub struct Tsh {
    program: PathBuf,
}

impl Tsh {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(&self, args: &[&str]) -> std::io::Result<Output> {
        debug!(program = %self.program.display(), ?args, "running tsh");
        let output = Command::new(&self.program).args(args).output()?;
        // Only stdout decides success; a failed login still prints nothing parseable.
        if !output.status.success() {
            warn!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "tsh exited unsuccessfully"
            );
        }
        Ok(output)
    }

    /// Fetch the node listing for the given cluster source
    pub fn list_nodes(&self, source: ClusterSource) -> Result<Vec<ListingEntry>> {
        let args: &[&str] = match source {
            ClusterSource::Listing => &["ls", "--all", "--format=json"],
            ClusterSource::Status => &["ls", "--format=json"],
        };
        let output = self.run(args).map_err(|source| InventoryError::Spawn {
            program: self.program.display().to_string(),
            source,
        })?;
        let entries = parse_node_listing(&output.stdout)?;
        debug!(count = entries.len(), "fetched tsh listing");
        Ok(entries)
    }

    /// Look up the active cluster with `tsh status`
    pub fn active_cluster(&self) -> Result<String> {
        let output = self
            .run(&["status", "--format=json"])
            .map_err(|source| InventoryError::StatusSpawn {
                program: self.program.display().to_string(),
                source,
            })?;
        parse_active_cluster(&output.stdout)
    }
}
