//! Entity classification
//!
//! Classification runs in two stages. [`Classifier::classify`] turns a
//! device's registry entities into display snapshots, dropping entities the
//! host has no state for. [`Classifier::categorize`] partitions those
//! snapshots into the four display sections according to the card config.

use std::collections::HashMap;

use cards_config::{CardConfig, EntityInteractions, SectionKey};
use cards_core::domains::{
    is_petkit_control_domain, is_sensor_domain, DEVICE_CLASS_PROBLEM,
    PETKIT_PROBLEM_TRANSLATION_KEY,
};
use cards_core::{compute_domain, ActiveState};
use cards_registry::{EntityCategory, Registry};
use serde::Serialize;
use tracing::{debug, trace};

use crate::pattern::PatternSet;

/// Which card family's classification rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Sensor domains go to sensors, everything else is a control
    #[default]
    Standard,
    /// Only `text`/`button`/`switch`/`select` are controls, the desiccant
    /// counter is a problem entity, and problem entities get an extra index
    PetKit,
}

/// Display snapshot of one entity
///
/// Rebuilt from registry and state on every update and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInformation {
    #[serde(rename = "entity_id")]
    pub entity_id: String,

    pub state: String,

    pub attributes: HashMap<String, serde_json::Value>,

    /// Friendly name with the device name taken out
    #[serde(rename = "friendly_name", skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EntityCategory>,

    #[serde(rename = "translation_key", skip_serializing_if = "Option::is_none")]
    pub translation_key: Option<String>,

    pub is_problem_entity: bool,

    pub is_active: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<EntityInteractions>,
}

impl EntityInformation {
    pub fn domain(&self) -> &str {
        compute_domain(&self.entity_id)
    }
}

/// Entities of one device, partitioned into display sections
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sections {
    pub controls: Vec<EntityInformation>,
    pub sensors: Vec<EntityInformation>,
    pub diagnostics: Vec<EntityInformation>,
    pub configurations: Vec<EntityInformation>,

    /// Secondary index of problem entities placed in the lists above.
    /// Only filled for [`Profile::PetKit`].
    #[serde(rename = "problemEntities", skip_serializing_if = "Vec::is_empty")]
    pub problem_entities: Vec<EntityInformation>,
}

impl Sections {
    pub fn get(&self, key: SectionKey) -> &[EntityInformation] {
        match key {
            SectionKey::Controls => &self.controls,
            SectionKey::Configurations => &self.configurations,
            SectionKey::Sensors => &self.sensors,
            SectionKey::Diagnostics => &self.diagnostics,
        }
    }

    fn get_mut(&mut self, key: SectionKey) -> &mut Vec<EntityInformation> {
        match key {
            SectionKey::Controls => &mut self.controls,
            SectionKey::Configurations => &mut self.configurations,
            SectionKey::Sensors => &mut self.sensors,
            SectionKey::Diagnostics => &mut self.diagnostics,
        }
    }

    /// Number of entities across the four primary sections
    pub fn len(&self) -> usize {
        SectionKey::ALL.iter().map(|key| self.get(*key).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Strip the device name from an entity's friendly name
///
/// The first occurrence is removed verbatim, whitespace included, unless the
/// two names are identical.
pub fn strip_device_name(friendly_name: &str, device_name: &str) -> String {
    if friendly_name == device_name {
        friendly_name.to_string()
    } else {
        friendly_name.replacen(device_name, "", 1)
    }
}

/// Section an entity belongs to, ignoring exclusions
pub fn section_for(entity: &EntityInformation, profile: Profile) -> SectionKey {
    match entity.category {
        Some(EntityCategory::Diagnostic) => SectionKey::Diagnostics,
        Some(EntityCategory::Config) => SectionKey::Configurations,
        None => {
            let domain = entity.domain();
            let is_control = match profile {
                Profile::Standard => !is_sensor_domain(domain),
                Profile::PetKit => is_petkit_control_domain(domain),
            };
            if is_control {
                SectionKey::Controls
            } else {
                SectionKey::Sensors
            }
        }
    }
}

/// Builds entity snapshots and sorts them into sections
pub struct Classifier<'a> {
    profile: Profile,
    active: &'a dyn ActiveState,
}

impl<'a> Classifier<'a> {
    pub fn new(profile: Profile, active: &'a dyn ActiveState) -> Self {
        Self { profile, active }
    }

    /// Snapshot every entity of a device that has a state
    ///
    /// `interactions` are the card-level actions, attached to each entity.
    pub fn classify<R: Registry + ?Sized>(
        &self,
        registry: &R,
        device_id: &str,
        device_name: Option<&str>,
        interactions: &EntityInteractions,
    ) -> Vec<EntityInformation> {
        let config = (!interactions.is_empty()).then(|| interactions.clone());

        registry
            .entities_for_device(device_id)
            .filter_map(|entry| {
                let Some(state) = registry.state(&entry.entity_id) else {
                    trace!(entity_id = %entry.entity_id, "Skipping entity without state");
                    return None;
                };

                let friendly_name = state.friendly_name().map(|name| match device_name {
                    Some(device_name) => strip_device_name(name, device_name),
                    None => name.to_string(),
                });

                let is_problem_entity = state.device_class() == Some(DEVICE_CLASS_PROBLEM)
                    || (self.profile == Profile::PetKit
                        && entry.translation_key.as_deref()
                            == Some(PETKIT_PROBLEM_TRANSLATION_KEY));

                Some(EntityInformation {
                    entity_id: entry.entity_id.clone(),
                    state: state.state.clone(),
                    attributes: state.attributes.clone(),
                    friendly_name,
                    category: entry.entity_category,
                    translation_key: entry.translation_key.clone(),
                    is_problem_entity,
                    is_active: self.active.is_active(state),
                    config: config.clone(),
                })
            })
            .collect()
    }

    /// Partition snapshots into sections, honoring `exclude_entities` and
    /// `exclude_sections`
    pub fn categorize(&self, entities: Vec<EntityInformation>, config: &CardConfig) -> Sections {
        let excluded_entities = PatternSet::from_option(config.exclude_entities.as_deref());
        let excluded_sections = config.excluded_sections();
        let mut sections = Sections::default();

        for entity in entities {
            if excluded_entities.is_match(Some(&entity.entity_id)) {
                trace!(entity_id = %entity.entity_id, "Entity excluded by pattern");
                continue;
            }

            let key = section_for(&entity, self.profile);
            if excluded_sections.contains(&key) {
                continue;
            }

            if self.profile == Profile::PetKit && entity.is_problem_entity {
                sections.problem_entities.push(entity.clone());
            }
            sections.get_mut(key).push(entity);
        }

        debug!(
            controls = sections.controls.len(),
            sensors = sections.sensors.len(),
            diagnostics = sections.diagnostics.len(),
            configurations = sections.configurations.len(),
            "Categorized entities"
        );
        sections
    }
}
