//! Entity registry entries
//!
//! The display subset of an entity registry record: enough to link an entity
//! to its device and to know which registry category it carries.

use cards_core::compute_domain;
use serde::{Deserialize, Serialize};

/// Entity category assigned by the integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// Configuration entity
    Config,
    /// Diagnostic entity
    Diagnostic,
}

/// A registered entity entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityEntry {
    /// Full entity ID (domain.object_id)
    pub entity_id: String,

    /// Parent device ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Integration that provides this entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    /// User-set name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Entity category (config, diagnostic, or none)
    #[serde(
        default,
        alias = "category",
        skip_serializing_if = "Option::is_none"
    )]
    pub entity_category: Option<EntityCategory>,

    /// Translation key for i18n
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_key: Option<String>,

    /// Hidden entities are still registered; the host decides visibility
    #[serde(default)]
    pub hidden: bool,
}

impl EntityEntry {
    /// Create an entry with no device, category or translation key
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            device_id: None,
            platform: None,
            name: None,
            entity_category: None,
            translation_key: None,
            hidden: false,
        }
    }

    /// Attach to a device
    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    /// Set the entity category
    pub fn with_category(mut self, category: EntityCategory) -> Self {
        self.entity_category = Some(category);
        self
    }

    /// Set the translation key
    pub fn with_translation_key(mut self, key: impl Into<String>) -> Self {
        self.translation_key = Some(key.into());
        self
    }

    /// Get the domain from entity_id
    pub fn domain(&self) -> &str {
        compute_domain(&self.entity_id)
    }

    /// Check if the entity belongs to the given device
    pub fn belongs_to(&self, device_id: &str) -> bool {
        self.device_id.as_deref() == Some(device_id)
    }
}
