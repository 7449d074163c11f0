//! Display pipeline for the device and integration cards
//!
//! Given a registry snapshot and a card config, this crate decides what a
//! card shows:
//!
//! - [`pattern`] - exact, glob and `/regex/` matching used by every filter
//! - [`filter`] - include/exclude decisions for single devices
//! - [`identity`] - whether a device belongs to an integration
//! - [`classify`] - entity snapshots and their partition into sections
//! - [`sort`] / [`sections`] - ordering within and across sections
//! - [`integration`] - async resolution of an integration's devices
//! - [`subscription`] - lifecycle of a host template subscription
//! - [`view`] - the assembled device and integration view models
//!
//! Nothing here renders; the output is plain data for a renderer.

pub mod classify;
pub mod error;
pub mod filter;
pub mod identity;
pub mod integration;
pub mod pattern;
pub mod sections;
pub mod sort;
pub mod subscription;
pub mod view;

pub use classify::{Classifier, EntityInformation, Profile, Sections};
pub use error::FetchError;
pub use integration::{
    compute_integration_devices, ConfigEntrySource, IntegrationDeviceResolver,
    IntegrationDevices, IntegrationRequest, LoadState, Resolution, StaticConfigEntries,
};
pub use pattern::{matches, matches_any, Pattern, PatternSet};
pub use subscription::{TemplateConnector, TemplateSubscription};
pub use view::{build_device_view, build_integration_view, DeviceView, IntegrationView, SectionView};
