//! CLI argument parsing for teleport-ansible
//!
//! Running with no arguments prints the full inventory, which is what Ansible
//! expects from a dynamic inventory script.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Where each node's cluster name comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ClusterSource {
    /// `tsh ls --all`, every record carries its own cluster (default)
    #[default]
    Listing,
    /// `tsh ls` plus `tsh status`, the active cluster applies to all nodes
    Status,
}

#[derive(Parser, Debug)]
#[command(name = "teleport-ansible")]
#[command(version)]
#[command(about = "Teleport driven Ansible dynamic inventory", long_about = None)]
pub struct Cli {
    /// Print the full inventory (default)
    #[arg(long, conflicts_with = "host")]
    pub list: bool,

    /// Print the variables of a single host
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Path to the tsh binary
    #[arg(
        long,
        value_name = "PATH",
        env = "TELEPORT_ANSIBLE_TSH",
        default_value = "tsh"
    )]
    pub tsh: PathBuf,

    /// How to resolve the cluster group of each node
    #[arg(
        long = "cluster-source",
        value_enum,
        env = "TELEPORT_ANSIBLE_CLUSTER_SOURCE",
        default_value = "listing"
    )]
    pub cluster_source: ClusterSource,

    /// Enable trace-level logging on stderr
    #[arg(long)]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["teleport-ansible"]);
        assert!(!cli.list);
        assert!(cli.host.is_none());
        assert_eq!(cli.cluster_source, ClusterSource::Listing);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_list_flag() {
        let cli = Cli::parse_from(["teleport-ansible", "--list"]);
        assert!(cli.list);
    }

    #[test]
    fn test_cli_host_flag() {
        let cli = Cli::parse_from(["teleport-ansible", "--host", "web-1"]);
        assert_eq!(cli.host.as_deref(), Some("web-1"));
    }

    #[test]
    fn test_cli_list_conflicts_with_host() {
        let result = Cli::try_parse_from(["teleport-ansible", "--list", "--host", "web-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_status_cluster_source() {
        let cli = Cli::parse_from(["teleport-ansible", "--cluster-source", "status"]);
        assert_eq!(cli.cluster_source, ClusterSource::Status);
    }

    #[test]
    fn test_cli_invalid_cluster_source() {
        let result = Cli::try_parse_from(["teleport-ansible", "--cluster-source", "nope"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_custom_tsh_path() {
        let cli = Cli::parse_from(["teleport-ansible", "--tsh", "/opt/teleport/bin/tsh"]);
        assert_eq!(cli.tsh, PathBuf::from("/opt/teleport/bin/tsh"));
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["teleport-ansible", "--debug"]);
        assert!(cli.debug);
    }
}
