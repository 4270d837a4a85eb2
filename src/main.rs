use anyhow::Result;
use clap::Parser;
use teleport_ansible::cli::{Cli, ClusterSource};
use teleport_ansible::inventory::{HostVars, InventoryBuilder};
use teleport_ansible::json_output;
use teleport_ansible::teleport::Tsh;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber, warnings only unless `--debug` or RUST_LOG
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = if debug {
        filter.add_directive(tracing::Level::TRACE.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the cluster shared by all nodes when listing without `--all`
fn active_cluster(tsh: &Tsh, source: ClusterSource) -> Option<String> {
    match source {
        ClusterSource::Listing => None,
        ClusterSource::Status => match tsh.active_cluster() {
            Ok(cluster) => Some(cluster),
            Err(e) => {
                warn!(error = %e, "could not determine active cluster, skipping cluster groups");
                None
            }
        },
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let tsh = Tsh::new(&args.tsh);
    let entries = tsh.list_nodes(args.cluster_source)?;

    let inventory = InventoryBuilder::new(args.cluster_source)
        .with_active_cluster(active_cluster(&tsh, args.cluster_source))
        .build(&entries);

    let stdout = std::io::stdout().lock();
    match &args.host {
        Some(host) => {
            let vars = inventory.hostvars(host).cloned().unwrap_or_else(HostVars::new);
            json_output::write_pretty_json(stdout, &vars)?;
        }
        None => json_output::write_pretty_json(stdout, &inventory)?,
    }

    Ok(())
}
