//! View models handed to the renderer
//!
//! Everything the renderer needs is decided here: which entities are shown,
//! in which section, in which order, and which sections come first.

use cards_config::{CardConfig, SectionKey, FEATURE_HIDE_DEVICE_MODEL};
use cards_registry::Registry;
use serde::Serialize;
use tracing::debug;

use crate::classify::{Classifier, EntityInformation, Sections};
use crate::integration::IntegrationDevices;
use crate::sections::order_sections;
use crate::sort::sort_entities;

/// A device card's content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceView {
    pub device_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(flatten)]
    pub sections: Sections,

    /// Section display order
    pub section_order: Vec<SectionKey>,

    /// Entities shown per section before folding
    pub preview_count: usize,
}

/// One non-empty section, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionView<'a> {
    pub key: SectionKey,
    pub label: &'static str,
    pub entities: &'a [EntityInformation],
    #[serde(skip)]
    preview_count: usize,
}

impl<'a> SectionView<'a> {
    /// Entities shown before the fold
    pub fn preview(&self) -> &'a [EntityInformation] {
        &self.entities[..self.preview_count.min(self.entities.len())]
    }

    /// Entities behind the fold
    pub fn remaining(&self) -> &'a [EntityInformation] {
        &self.entities[self.preview_count.min(self.entities.len())..]
    }
}

impl DeviceView {
    /// Sections in display order, empty ones skipped
    pub fn ordered_sections(&self) -> Vec<SectionView<'_>> {
        self.section_order
            .iter()
            .map(|key| SectionView {
                key: *key,
                label: key.label(),
                entities: self.sections.get(*key),
                preview_count: self.preview_count,
            })
            .filter(|section| !section.entities.is_empty())
            .collect()
    }

    /// True if any shown problem entity is currently active
    pub fn has_problem(&self) -> bool {
        SectionKey::ALL
            .iter()
            .flat_map(|key| self.sections.get(*key))
            .any(|e| e.is_problem_entity && e.is_active)
    }
}

/// Build the content of a device card
///
/// Returns `None` when the device is not in the registry.
pub fn build_device_view<R: Registry + ?Sized>(
    registry: &R,
    device_id: &str,
    config: &CardConfig,
    classifier: &Classifier<'_>,
) -> Option<DeviceView> {
    let Some(device) = registry.device(device_id) else {
        debug!(device_id, "Device not in registry");
        return None;
    };
    let device_name = device.display_name();

    let entities = classifier.classify(registry, device_id, device_name, &config.interactions);
    let categorized = classifier.categorize(entities, config);

    let sort = config.sort.as_ref();
    let sections = Sections {
        controls: sort_entities(&categorized.controls, sort),
        sensors: sort_entities(&categorized.sensors, sort),
        diagnostics: sort_entities(&categorized.diagnostics, sort),
        configurations: sort_entities(&categorized.configurations, sort),
        problem_entities: sort_entities(&categorized.problem_entities, sort),
    };

    let model = if config.has_feature(FEATURE_HIDE_DEVICE_MODEL) {
        None
    } else {
        device.model.clone()
    };

    Some(DeviceView {
        device_id: device_id.to_string(),
        name: device_name.map(str::to_string),
        model,
        sections,
        section_order: order_sections(&config.section_order()),
        preview_count: config.preview_count(),
    })
}

/// An integration card's content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrationView {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub devices: Vec<DeviceView>,
}

/// Build the content of an integration card from a resolved device set
///
/// Devices that vanished from the registry since resolution are skipped.
pub fn build_integration_view<R: Registry + ?Sized>(
    registry: &R,
    resolved: &IntegrationDevices,
    config: &CardConfig,
    classifier: &Classifier<'_>,
) -> IntegrationView {
    let devices = resolved
        .devices
        .iter()
        .filter_map(|device_id| build_device_view(registry, device_id, config, classifier))
        .collect();

    IntegrationView {
        name: resolved.name.clone(),
        title: config.display_title().map(str::to_string),
        devices,
    }
}
