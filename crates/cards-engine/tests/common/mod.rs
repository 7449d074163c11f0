//! Shared fixtures for the card engine tests
//!
//! Registry builders for the devices the scenarios talk about, a config
//! entry source with scripted latency and failures, and a tracing layer
//! that counts warnings.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cards_core::State;
use cards_engine::{ConfigEntrySource, FetchError};
use cards_registry::{ConfigEntrySummary, DeviceEntry, EntityCategory, EntityEntry, Hass};
use serde_json::json;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// A PetKit feeder with one entity per section
pub fn petkit_hass() -> Hass {
    Hass::new()
        .with_device(DeviceEntry::new("petkit_1", Some("Feeder")).with_model("D4"))
        .with_entity(EntityEntry::new("sensor.battery").with_device("petkit_1"))
        .with_entity(EntityEntry::new("switch.power").with_device("petkit_1"))
        .with_entity(
            EntityEntry::new("sensor.diag")
                .with_device("petkit_1")
                .with_category(EntityCategory::Diagnostic),
        )
        .with_entity(
            EntityEntry::new("text.cfg")
                .with_device("petkit_1")
                .with_category(EntityCategory::Config),
        )
        .with_state(
            State::new("sensor.battery", "87")
                .with_attribute("friendly_name", json!("Feeder Battery")),
        )
        .with_state(
            State::new("switch.power", "on").with_attribute("friendly_name", json!("Feeder Power")),
        )
        .with_state(State::new("sensor.diag", "ok"))
        .with_state(State::new("text.cfg", "hello"))
}

/// Two Z-Wave devices, one config entry each, plus an unrelated device
pub fn zwave_hass() -> Hass {
    Hass::new()
        .with_device(
            DeviceEntry::new("device_1", Some("Node 1"))
                .with_config_entry("entry_1")
                .with_identifier(["zwave_js", "3245146787-1"]),
        )
        .with_device(DeviceEntry::new("hue_bridge", Some("Bridge")).with_config_entry("entry_hue"))
        .with_device(
            DeviceEntry::new("device_2", Some("Node 2"))
                .with_config_entry("entry_2")
                .with_identifier(["zwave_js", "3245146787-2"]),
        )
}

pub fn zwave_entries() -> Vec<ConfigEntrySummary> {
    vec![
        ConfigEntrySummary::new("entry_1", "zwave_js"),
        ConfigEntrySummary::new("entry_2", "zwave_js"),
        ConfigEntrySummary::new("entry_hue", "hue"),
    ]
}

/// Config entry source with scripted per-call latency and failures
pub struct ScriptedSource {
    entries: Vec<ConfigEntrySummary>,
    delays: Mutex<VecDeque<Duration>>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(entries: Vec<ConfigEntrySummary>) -> Self {
        Self {
            entries,
            delays: Mutex::new(VecDeque::new()),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    /// Delays consumed by successive calls, in order
    pub fn with_delays(self, delays: &[u64]) -> Self {
        *self.delays.lock().unwrap() = delays.iter().map(|ms| Duration::from_millis(*ms)).collect();
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigEntrySource for ScriptedSource {
    async fn entries_for_domain(
        &self,
        domain: &str,
    ) -> Result<Vec<ConfigEntrySummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.load(Ordering::SeqCst) {
            return Err(FetchError::ConfigEntries {
                domain: domain.to_string(),
                message: "connection lost".into(),
            });
        }

        Ok(self
            .entries
            .iter()
            .filter(|e| e.domain == domain)
            .cloned()
            .collect())
    }
}

/// Tracing layer counting WARN events
#[derive(Clone, Default)]
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
}

impl WarnCounter {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
