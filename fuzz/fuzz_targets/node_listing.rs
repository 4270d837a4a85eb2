#![no_main]

use libfuzzer_sys::fuzz_target;
use teleport_ansible::cli::ClusterSource;
use teleport_ansible::inventory::InventoryBuilder;
use teleport_ansible::teleport::parse_node_listing;

fuzz_target!(|data: &[u8]| {
    // Any tsh output must either be rejected or produce an inventory
    if let Ok(entries) = parse_node_listing(data) {
        let inventory = InventoryBuilder::new(ClusterSource::Listing).build(&entries);
        let _ = serde_json::to_string(&inventory);
    }
});
