//! Core types for the device cards
//!
//! This crate provides the small vocabulary shared by every other crate in
//! the workspace: entity id helpers, the `State` snapshot the host hands us,
//! the fixed domain sets used for classification, and the default
//! active-state predicate.

pub mod active;
pub mod domains;
mod entity_id;
mod state;

pub use active::{ActiveState, DefaultActiveState};
pub use entity_id::compute_domain;
pub use state::State;

/// State value of an entity the integration cannot reach
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State value of an entity whose value is not known yet
pub const STATE_UNKNOWN: &str = "unknown";

/// State value of a switched-off entity
pub const STATE_OFF: &str = "off";
