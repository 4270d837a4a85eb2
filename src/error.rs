//! Error types for inventory generation
//!
//! Fetch failures are fatal and abort the run. Status failures only affect
//! cluster grouping in the status-aware variant and are logged by the caller.

use thiserror::Error;

/// Errors raised while talking to `tsh`
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No inventory JSON data found. Check login via tsh.")]
    MissingInventory(#[source] serde_json::Error),

    #[error("Nothing available via teleport, check login via tsh.")]
    EmptyInventory,

    #[error("Failed to run {program} status: {source}")]
    StatusSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid status JSON from tsh: {0}")]
    StatusJson(#[source] serde_json::Error),

    #[error("tsh status reported no active cluster")]
    StatusMissingCluster,
}

/// Result type for inventory operations
pub type Result<T> = std::result::Result<T, InventoryError>;
