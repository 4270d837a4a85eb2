//! Ansible dynamic inventory built from a Teleport listing
//!
//! Output shape:
//!
//! ```json
//! {
//!     "_meta": {"hostvars": {"host-a": {"env": "prod", "teleport_id": 1}}},
//!     "all": {"hosts": ["host-a"], "children": []},
//!     "alpha": {"hosts": ["host-a"], "children": []},
//!     "prod": {"hosts": ["host-a"], "children": []}
//! }
//! ```
//!
//! Hosts are grouped by cluster and by every label *value* whose key does
//! not start with `ansible_`. Those labels only become host variables.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::cli::ClusterSource;
use crate::group::{sanitize_group_name, ALL_GROUP, META_KEY};
use crate::teleport::ListingEntry;

/// Label key prefix marking Ansible variables rather than grouping dimensions
pub const ANSIBLE_VAR_PREFIX: &str = "ansible_";

/// Host variable carrying the Teleport resource id
pub const TELEPORT_ID_VAR: &str = "teleport_id";

/// Variables attached to a single host
pub type HostVars = BTreeMap<String, serde_json::Value>;

/// An Ansible group: sorted, deduplicated hosts and (unused) children
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Group {
    pub hosts: Vec<String>,
    pub children: Vec<String>,
}

impl Group {
    /// Insert a host keeping `hosts` sorted and free of duplicates
    pub fn add_host(&mut self, hostname: &str) {
        if let Err(pos) = self
            .hosts
            .binary_search_by(|existing| existing.as_str().cmp(hostname))
        {
            self.hosts.insert(pos, hostname.to_string());
        }
    }

    pub fn contains(&self, hostname: &str) -> bool {
        self.hosts
            .binary_search_by(|existing| existing.as_str().cmp(hostname))
            .is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub hostvars: BTreeMap<String, HostVars>,
}

/// The complete inventory document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    meta: Meta,
    all: Group,
    groups: BTreeMap<String, Group>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in group containing every host
    pub fn all(&self) -> &Group {
        &self.all
    }

    /// Look up a group by its (sanitized) name, `all` included
    pub fn group(&self, name: &str) -> Option<&Group> {
        if name == ALL_GROUP {
            Some(&self.all)
        } else {
            self.groups.get(name)
        }
    }

    /// Groups other than `all`, ordered by name
    pub fn groups(&self) -> impl Iterator<Item = (&str, &Group)> {
        self.groups.iter().map(|(name, group)| (name.as_str(), group))
    }

    pub fn hostvars(&self, hostname: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(hostname)
    }

    /// Add a host to the group called `name` after sanitizing it
    ///
    /// Returns `false` without touching the inventory when the name is
    /// rejected (empty, leading digit, or reserved).
    pub fn add_to_group(&mut self, name: &str, hostname: &str) -> bool {
        let Some(group_name) = sanitize_group_name(name) else {
            debug!(group = name, host = hostname, "skipping invalid group name");
            return false;
        };

        let group = if group_name == ALL_GROUP {
            &mut self.all
        } else {
            self.groups.entry(group_name).or_default()
        };
        group.add_host(hostname);
        true
    }

    /// Register a host in `all` and return its variables
    fn add_host(&mut self, hostname: &str) -> &mut HostVars {
        self.all.add_host(hostname);
        self.meta.hostvars.entry(hostname.to_string()).or_default()
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len() + 2))?;
        map.serialize_entry(META_KEY, &self.meta)?;
        map.serialize_entry(ALL_GROUP, &self.all)?;
        for (name, group) in &self.groups {
            map.serialize_entry(name, group)?;
        }
        map.end()
    }
}

/// Turns `tsh ls` entries into an [`Inventory`]
#[derive(Debug, Clone, Default)]
pub struct InventoryBuilder {
    cluster_source: ClusterSource,
    active_cluster: Option<String>,
}

impl InventoryBuilder {
    pub fn new(cluster_source: ClusterSource) -> Self {
        Self {
            cluster_source,
            active_cluster: None,
        }
    }

    /// Cluster applied to every node when the source is `tsh status`
    pub fn with_active_cluster(mut self, cluster: Option<String>) -> Self {
        self.active_cluster = cluster;
        self
    }

    fn cluster_for<'a>(&'a self, entry: &'a ListingEntry) -> Option<&'a str> {
        match self.cluster_source {
            ClusterSource::Listing => entry.cluster(),
            ClusterSource::Status => self.active_cluster.as_deref(),
        }
    }

    pub fn build(&self, entries: &[ListingEntry]) -> Inventory {
        let mut inventory = Inventory::new();

        for entry in entries {
            let resource = entry.resource();
            if !resource.is_node() {
                debug!(kind = %resource.kind, "skipping non-node resource");
                continue;
            }

            let node = match resource.to_node() {
                Ok(node) => node,
                Err(e) => {
                    warn!(error = %e, "malformed node record, skipping");
                    continue;
                }
            };

            let Some(hostname) = node.hostname() else {
                warn!(id = %node.metadata.id, "node has no hostname, skipping");
                continue;
            };

            match self.cluster_for(entry) {
                Some(cluster) => {
                    inventory.add_to_group(cluster, hostname);
                }
                None => debug!(host = hostname, "no cluster known for node"),
            }

            let vars = inventory.add_host(hostname);
            for (key, value) in &node.metadata.labels {
                vars.insert(key.clone(), serde_json::Value::String(value.clone()));
            }
            // The resource id wins over a label that happens to share its key.
            vars.insert(TELEPORT_ID_VAR.to_string(), node.metadata.id.clone());

            for (key, value) in &node.metadata.labels {
                if key.starts_with(ANSIBLE_VAR_PREFIX) {
                    continue;
                }
                inventory.add_to_group(value, hostname);
            }
        }

        debug!(
            hosts = inventory.all.hosts.len(),
            groups = inventory.groups.len(),
            "inventory built"
        );
        inventory
    }
}
