//! teleport-ansible - Ansible dynamic inventory from Teleport
//!
//! Runs `tsh ls --format=json`, groups the listed nodes by cluster and by
//! label value, and renders the result in the JSON shape Ansible expects
//! from a dynamic inventory script.

pub mod cli;
pub mod error;
pub mod group;
pub mod inventory;
pub mod json_output;
pub mod teleport;
