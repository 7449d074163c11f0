//! Card configuration for the device cards
//!
//! The host dashboard stores each card's configuration as an opaque
//! document and hands it back verbatim. This crate gives it a typed shape:
//!
//! - [`CardConfig`] - everything a device or integration card reads
//! - [`SectionKey`] - the four display sections and their default order
//! - [`SortConfig`] - how entities inside a section are ordered
//!
//! Validation is shape-only. Unknown keys are ignored, unknown section
//! names and sort types degrade to no-ops rather than errors.
//!
//! # Example
//!
//! ```ignore
//! use cards_config::{CardConfig, CardTarget};
//!
//! let config = CardConfig::from_yaml_str("integration: zwave_js\nexclude_devices: [\"device_1\"]")?;
//! assert!(matches!(config.validate()?, CardTarget::Integration("zwave_js")));
//! ```

mod card;
mod error;
mod section;
mod sort;

pub use card::{
    CardConfig, CardTarget, EntityInteractions, DEFAULT_PREVIEW_COUNT,
    FEATURE_HIDE_DEVICE_MODEL, FEATURE_HIDE_TITLE,
};
pub use error::{ConfigError, ConfigResult};
pub use section::{parse_section_keys, SectionKey};
pub use sort::{SortConfig, SortDirection, SortType};
