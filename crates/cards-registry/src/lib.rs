//! Registry view for the device cards
//!
//! This crate models the read-only slice of the host's registries that the
//! cards consume:
//! - Devices (`DeviceEntry`) with identifier tuples and config entry ids
//! - Entities (`EntityEntry`) linked to devices, with registry categories
//! - Config entries (`ConfigEntrySummary`) as fetched per integration domain
//!
//! The host owns and mutates all of it. The cards only read, through the
//! [`Registry`] trait; [`Hass`] is an in-memory snapshot implementing it.

pub mod config_entry;
pub mod device;
pub mod entity;
pub mod snapshot;

// Re-export main types
pub use config_entry::ConfigEntrySummary;
pub use device::{DeviceEntry, DeviceIdentifier};
pub use entity::{EntityCategory, EntityEntry};
pub use snapshot::{Hass, Registry, SnapshotError};
