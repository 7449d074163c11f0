//! Registry query surface and the in-memory snapshot implementing it

use cards_core::State;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{ConfigEntrySummary, DeviceEntry, EntityEntry};

/// Errors that can occur while loading a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot document is not valid JSON or has the wrong shape
    #[error("failed to parse registry snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only lookups the card core needs from the host
///
/// Unknown ids yield `None`; nothing here fails. Iteration order is the
/// registry's own order.
pub trait Registry {
    /// Look up a device by registry id
    fn device(&self, device_id: &str) -> Option<&DeviceEntry>;

    /// All devices, in registry order
    fn devices(&self) -> Box<dyn Iterator<Item = &DeviceEntry> + '_>;

    /// All entity registry entries, in registry order
    fn entities(&self) -> Box<dyn Iterator<Item = &EntityEntry> + '_>;

    /// Current state of an entity
    fn state(&self, entity_id: &str) -> Option<&State>;

    /// Entities linked to a device, in registry order
    fn entities_for_device<'a>(
        &'a self,
        device_id: &'a str,
    ) -> Box<dyn Iterator<Item = &'a EntityEntry> + 'a> {
        Box::new(self.entities().filter(move |e| e.belongs_to(device_id)))
    }
}

/// A point-in-time copy of the host's registries and states
///
/// Keyed the way the host exposes them to cards: devices by id, entities
/// and states by entity id. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hass {
    #[serde(default)]
    pub devices: IndexMap<String, DeviceEntry>,

    #[serde(default)]
    pub entities: IndexMap<String, EntityEntry>,

    #[serde(default)]
    pub states: IndexMap<String, State>,

    /// Config entries known at snapshot time
    #[serde(default)]
    pub config_entries: Vec<ConfigEntrySummary>,
}

impl Hass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from the JSON document the preview tool reads
    pub fn from_json_str(s: &str) -> Result<Self, SnapshotError> {
        let hass: Hass = serde_json::from_str(s)?;
        debug!(
            devices = hass.devices.len(),
            entities = hass.entities.len(),
            states = hass.states.len(),
            config_entries = hass.config_entries.len(),
            "Loaded registry snapshot"
        );
        Ok(hass)
    }

    /// Add or replace a device
    pub fn with_device(mut self, device: DeviceEntry) -> Self {
        self.devices.insert(device.id.clone(), device);
        self
    }

    /// Add or replace an entity registry entry
    pub fn with_entity(mut self, entity: EntityEntry) -> Self {
        self.entities.insert(entity.entity_id.clone(), entity);
        self
    }

    /// Add or replace a state
    pub fn with_state(mut self, state: State) -> Self {
        self.states.insert(state.entity_id.clone(), state);
        self
    }

    /// Add a config entry
    pub fn with_config_entry(mut self, entry: ConfigEntrySummary) -> Self {
        self.config_entries.push(entry);
        self
    }
}

impl Registry for Hass {
    fn device(&self, device_id: &str) -> Option<&DeviceEntry> {
        self.devices.get(device_id)
    }

    fn devices(&self) -> Box<dyn Iterator<Item = &DeviceEntry> + '_> {
        Box::new(self.devices.values())
    }

    fn entities(&self) -> Box<dyn Iterator<Item = &EntityEntry> + '_> {
        Box::new(self.entities.values())
    }

    fn state(&self, entity_id: &str) -> Option<&State> {
        self.states.get(entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "devices": {
            "dev1": {"id": "dev1", "name": "Feeder", "config_entries": ["e1"]},
            "dev2": {"id": "dev2", "name": "Fountain"}
        },
        "entities": {
            "switch.feeder_power": {"entity_id": "switch.feeder_power", "device_id": "dev1"},
            "sensor.fountain_level": {"entity_id": "sensor.fountain_level", "device_id": "dev2"},
            "sensor.feeder_food": {"entity_id": "sensor.feeder_food", "device_id": "dev1"}
        },
        "states": {
            "switch.feeder_power": {"entity_id": "switch.feeder_power", "state": "on"}
        },
        "config_entries": [{"entry_id": "e1", "domain": "petkit"}]
    }"#;

    #[test]
    fn test_load_snapshot() {
        let hass = Hass::from_json_str(SNAPSHOT).unwrap();
        assert_eq!(hass.device("dev1").unwrap().name.as_deref(), Some("Feeder"));
        assert!(hass.device("missing").is_none());
        assert_eq!(hass.state("switch.feeder_power").unwrap().state, "on");
        assert!(hass.state("sensor.feeder_food").is_none());
        assert_eq!(hass.config_entries[0].domain, "petkit");
    }

    #[test]
    fn test_entities_for_device_keeps_registry_order() {
        let hass = Hass::from_json_str(SNAPSHOT).unwrap();
        let ids: Vec<&str> = hass
            .entities_for_device("dev1")
            .map(|e| e.entity_id.as_str())
            .collect();
        assert_eq!(ids, vec!["switch.feeder_power", "sensor.feeder_food"]);
        assert_eq!(hass.entities_for_device("missing").count(), 0);
    }

    #[test]
    fn test_devices_iterate_in_insertion_order() {
        let hass = Hass::new()
            .with_device(DeviceEntry::new("b", None))
            .with_device(DeviceEntry::new("a", None));
        let ids: Vec<&str> = hass.devices().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            Hass::from_json_str("{\"devices\": []}"),
            Err(SnapshotError::Parse(_))
        ));
    }
}
