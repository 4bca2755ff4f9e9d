//! Integration test common infrastructure.
//!
//! Provides tracing setup and helpers for inspecting permission sets.

#![allow(dead_code)]

use slirc_perms::PermissionSet;
use std::collections::HashSet;
use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber so `RUST_LOG=slirc_perms=trace` shows
/// grant activity. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Permissions held in `module`, empty if the module has no entry.
pub fn perms_in(set: &PermissionSet, module: &str) -> HashSet<String> {
    set.copy_map().remove(module).unwrap_or_default()
}

pub fn set_of(perms: &[&str]) -> HashSet<String> {
    perms.iter().map(|p| p.to_string()).collect()
}
