//! Integration device resolution
//!
//! An integration card shows every device that belongs to one integration.
//! Membership comes from the integration's config entries, which the host
//! only hands out through an asynchronous lookup. The resolver runs that
//! lookup, filters the device registry, and publishes the result so that
//! the newest request always wins.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use cards_config::CardConfig;
use cards_registry::{ConfigEntrySummary, Registry};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::error::FetchError;
use crate::identity::{is_in_integration, IntegrationMembership};
use crate::pattern::matches_any;

/// Source of config entries per integration domain
#[async_trait]
pub trait ConfigEntrySource: Send + Sync {
    async fn entries_for_domain(&self, domain: &str)
        -> Result<Vec<ConfigEntrySummary>, FetchError>;
}

/// Config entries served from a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticConfigEntries {
    entries: Vec<ConfigEntrySummary>,
}

impl StaticConfigEntries {
    pub fn new(entries: Vec<ConfigEntrySummary>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl ConfigEntrySource for StaticConfigEntries {
    async fn entries_for_domain(
        &self,
        domain: &str,
    ) -> Result<Vec<ConfigEntrySummary>, FetchError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| entry.domain == domain)
            .cloned()
            .collect())
    }
}

/// Which integration to resolve, and how to filter its devices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationRequest {
    pub integration: String,
    pub include_devices: Option<Vec<String>>,
    pub exclude_devices: Option<Vec<String>>,
}

impl IntegrationRequest {
    pub fn new(integration: impl Into<String>) -> Self {
        Self {
            integration: integration.into(),
            include_devices: None,
            exclude_devices: None,
        }
    }

    /// Build a request from an integration card config
    pub fn from_config(config: &CardConfig) -> Option<Self> {
        let integration = config.integration.as_deref().filter(|s| !s.is_empty())?;
        Some(Self {
            integration: integration.to_string(),
            include_devices: config.include_devices.clone(),
            exclude_devices: config.exclude_devices.clone(),
        })
    }
}

/// Resolved device set of an integration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IntegrationDevices {
    /// Display name derived from the domain
    pub name: String,
    /// Device ids, in registry order, without duplicates
    pub devices: Vec<String>,
}

/// Turn a domain into a heading: `zwave_js` becomes `Zwave Js`
pub fn integration_display_name(domain: &str) -> String {
    domain
        .split('_')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Filter the device registry down to an integration's devices
///
/// Without an include list every member device is included; an include
/// list (even an empty one) requires a pattern match. Exclusion always
/// applies last. Patterns are checked against the device id, its name and
/// its user-chosen name.
pub fn filter_integration_devices<R: Registry + ?Sized>(
    registry: &R,
    entry_ids: &HashSet<String>,
    request: &IntegrationRequest,
) -> IntegrationDevices {
    let membership = IntegrationMembership::ConfigEntries(entry_ids);
    let mut devices: Vec<String> = Vec::new();

    for device in registry.devices() {
        if !is_in_integration(device, membership) {
            continue;
        }

        let name = device.name.as_deref();
        let user_name = device.name_by_user.as_deref();

        let included = match request.include_devices.as_deref() {
            None => true,
            Some(patterns) => matches_any(&device.id, name, user_name, Some(patterns)),
        };
        let excluded = matches_any(&device.id, name, user_name, request.exclude_devices.as_deref());

        if included && !excluded && !devices.contains(&device.id) {
            devices.push(device.id.clone());
        }
    }

    IntegrationDevices {
        name: integration_display_name(&request.integration),
        devices,
    }
}

/// Fetch the integration's config entries and filter the registry with them
pub async fn compute_integration_devices<R, S>(
    registry: &R,
    source: &S,
    request: &IntegrationRequest,
) -> Result<IntegrationDevices, FetchError>
where
    R: Registry + ?Sized,
    S: ConfigEntrySource + ?Sized,
{
    let entries = source.entries_for_domain(&request.integration).await?;
    let entry_ids: HashSet<String> = entries.into_iter().map(|e| e.entry_id).collect();
    Ok(filter_integration_devices(registry, &entry_ids, request))
}

/// Load state of an integration card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    /// A config entry lookup is in flight
    Loading,
    /// The device set on the devices channel is current
    Ready,
    /// The latest lookup failed; the devices channel keeps the last good set
    Error(String),
}

/// Outcome of one [`IntegrationDeviceResolver::refresh`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A new device set was published
    Updated(IntegrationDevices),
    /// The result equals the published set; nothing was sent
    Unchanged,
    /// A newer refresh was issued while this one was in flight
    Superseded,
    /// The lookup failed
    Failed(FetchError),
}

/// Resolves an integration's devices and publishes the latest result
///
/// Every refresh takes a generation number when it is issued. A result is
/// published only if no newer refresh has been issued since, so a slow,
/// older lookup can never overwrite a newer one. Superseded lookups run to
/// completion and are dropped.
pub struct IntegrationDeviceResolver<S> {
    source: S,
    generation: AtomicU64,
    state: watch::Sender<LoadState>,
    devices: watch::Sender<Option<IntegrationDevices>>,
}

impl<S: ConfigEntrySource> IntegrationDeviceResolver<S> {
    pub fn new(source: S) -> Self {
        let (state, _) = watch::channel(LoadState::Uninitialized);
        let (devices, _) = watch::channel(None);
        Self {
            source,
            generation: AtomicU64::new(0),
            state,
            devices,
        }
    }

    /// Watch the load state
    pub fn subscribe_state(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Watch the device set; only notified when it changes
    pub fn subscribe_devices(&self) -> watch::Receiver<Option<IntegrationDevices>> {
        self.devices.subscribe()
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Last published device set
    pub fn current(&self) -> Option<IntegrationDevices> {
        self.devices.borrow().clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Publish `state` on behalf of `generation`, unless a newer refresh
    /// has been issued since
    fn set_state(&self, generation: u64, state: LoadState) -> bool {
        self.state.send_if_modified(|current| {
            if !self.is_current(generation) {
                return false;
            }
            *current = state;
            true
        })
    }

    /// Recompute the device set, e.g. after a config or registry change
    #[instrument(skip(self, registry, request), fields(integration = %request.integration))]
    pub async fn refresh<R: Registry + ?Sized>(
        &self,
        registry: &R,
        request: &IntegrationRequest,
    ) -> Resolution {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(generation, LoadState::Loading);

        let fetched = self.source.entries_for_domain(&request.integration).await;

        if !self.is_current(generation) {
            debug!(generation, "Discarding superseded integration lookup");
            return Resolution::Superseded;
        }

        let entries = match fetched {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Integration lookup failed");
                if !self.set_state(generation, LoadState::Error(e.to_string())) {
                    return Resolution::Superseded;
                }
                return Resolution::Failed(e);
            }
        };

        let entry_ids: HashSet<String> = entries.into_iter().map(|e| e.entry_id).collect();
        let resolved = filter_integration_devices(registry, &entry_ids, request);

        let mut superseded = false;
        let changed = self.devices.send_if_modified(|current| {
            // Re-checked under the channel lock so a newer publish is never overwritten
            if !self.is_current(generation) {
                superseded = true;
                return false;
            }
            if current.as_ref() == Some(&resolved) {
                return false;
            }
            *current = Some(resolved.clone());
            true
        });

        if superseded {
            debug!(generation, "Discarding superseded integration lookup");
            return Resolution::Superseded;
        }

        if !self.set_state(generation, LoadState::Ready) {
            debug!(generation, "Discarding superseded integration lookup");
            return Resolution::Superseded;
        }
        debug!(
            generation,
            devices = resolved.devices.len(),
            changed,
            "Resolved integration devices"
        );

        if changed {
            Resolution::Updated(resolved)
        } else {
            Resolution::Unchanged
        }
    }
}
