//! Card configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::section::{parse_section_keys, SectionKey};
use crate::sort::SortConfig;

/// Entities shown per section before the rest is folded away
pub const DEFAULT_PREVIEW_COUNT: usize = 3;

/// Feature flag: leave the device model out of the view model
pub const FEATURE_HIDE_DEVICE_MODEL: &str = "hide_device_model";

/// Feature flag: leave the card title out of the view model
pub const FEATURE_HIDE_TITLE: &str = "hide_title";

/// Tap/hold/double-tap action configs, opaque to the cards
///
/// Applied uniformly to every entity a card shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityInteractions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_action: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hold_action: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_action: Option<serde_json::Value>,
}

impl EntityInteractions {
    pub fn is_empty(&self) -> bool {
        self.tap_action.is_none() && self.hold_action.is_none() && self.double_tap_action.is_none()
    }
}

/// What a card is pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTarget<'a> {
    /// A single device, by registry id
    Device(&'a str),
    /// Every device of an integration, by domain
    Integration(&'a str),
}

/// Configuration of a device card or an integration card
///
/// Deserialized from whatever the dashboard stored; keys the cards do not
/// know are ignored. Two configs comparing equal produce the same view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// Card type as registered with the dashboard
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Integration domain, e.g. `zwave_js`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_count: Option<usize>,

    /// Entity id patterns to leave out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_entities: Option<Vec<String>>,

    /// Section names to leave out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_sections: Option<Vec<String>>,

    /// Section names in the order they should be shown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_order: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    #[serde(flatten)]
    pub interactions: EntityInteractions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortConfig>,

    /// Device patterns to keep (integration cards)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_devices: Option<Vec<String>>,

    /// Device patterns to drop (integration cards)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_devices: Option<Vec<String>>,
}

impl CardConfig {
    /// Configuration for a device card
    pub fn for_device(device_id: impl Into<String>) -> Self {
        Self {
            device_id: Some(device_id.into()),
            ..Self::default()
        }
    }

    /// Configuration for an integration card
    pub fn for_integration(domain: impl Into<String>) -> Self {
        Self {
            integration: Some(domain.into()),
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        serde_json::from_str(s).map_err(|source| ConfigError::ParseJson { source })
    }

    /// Parse a configuration from YAML, as written in YAML dashboards
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        serde_yaml::from_str(s).map_err(|source| ConfigError::ParseYaml { source })
    }

    /// Convert an already-parsed JSON document
    pub fn from_value(value: serde_json::Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|source| ConfigError::ParseJson { source })
    }

    /// Check the shape and tell which kind of card this configures
    ///
    /// Empty ids count as absent.
    pub fn validate(&self) -> ConfigResult<CardTarget<'_>> {
        let device_id = self.device_id.as_deref().filter(|s| !s.is_empty());
        let integration = self.integration.as_deref().filter(|s| !s.is_empty());

        let target = match (device_id, integration) {
            (Some(device_id), None) => CardTarget::Device(device_id),
            (None, Some(integration)) => CardTarget::Integration(integration),
            (None, None) => return Err(ConfigError::MissingTarget),
            (Some(device_id), Some(integration)) => {
                return Err(ConfigError::ConflictingTarget {
                    device_id: device_id.to_string(),
                    integration: integration.to_string(),
                })
            }
        };
        debug!(?target, "Validated card configuration");
        Ok(target)
    }

    pub fn preview_count(&self) -> usize {
        self.preview_count.unwrap_or(DEFAULT_PREVIEW_COUNT)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features
            .as_ref()
            .is_some_and(|features| features.iter().any(|f| f == feature))
    }

    /// Title to show, unless hidden by `hide_title`
    pub fn display_title(&self) -> Option<&str> {
        if self.has_feature(FEATURE_HIDE_TITLE) {
            None
        } else {
            self.title.as_deref()
        }
    }

    /// Sections excluded from display; unknown names dropped
    pub fn excluded_sections(&self) -> Vec<SectionKey> {
        self.exclude_sections
            .as_deref()
            .map(parse_section_keys)
            .unwrap_or_default()
    }

    pub fn is_section_excluded(&self, section: SectionKey) -> bool {
        self.excluded_sections().contains(&section)
    }

    /// Requested section order; unknown names dropped
    pub fn section_order(&self) -> Vec<SectionKey> {
        self.section_order
            .as_deref()
            .map(parse_section_keys)
            .unwrap_or_default()
    }
}
