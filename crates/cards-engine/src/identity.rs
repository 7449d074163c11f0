//! Device-to-integration membership

use std::collections::HashSet;

use cards_registry::DeviceEntry;

/// How a device is tested for membership in an integration
#[derive(Debug, Clone, Copy)]
pub enum IntegrationMembership<'a> {
    /// The token appears as any part of any identifier tuple
    Token(&'a str),
    /// The device shares at least one config entry id with the set
    ConfigEntries(&'a HashSet<String>),
}

/// Check whether a device belongs to an integration
///
/// Membership is exact per token or entry id; a device without identifiers
/// or config entries belongs to nothing.
pub fn is_in_integration(device: &DeviceEntry, membership: IntegrationMembership<'_>) -> bool {
    match membership {
        IntegrationMembership::Token(token) => device
            .identifiers
            .iter()
            .any(|identifier| identifier.contains(token)),
        IntegrationMembership::ConfigEntries(entry_ids) => device
            .config_entries
            .iter()
            .any(|entry_id| entry_ids.contains(entry_id)),
    }
}
