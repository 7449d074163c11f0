//! Template subscription lifecycle
//!
//! Some cards let the host resolve their device list by rendering a
//! template and pushing updates. The transport is the host's; this module
//! only owns the lifecycle: one live subscription per key, torn down
//! before a different key is subscribed, and safe to tear down at any time.

use async_trait::async_trait;
use tracing::debug;

use crate::error::FetchError;

/// Transport that can subscribe to a rendered template
#[async_trait]
pub trait TemplateConnector: Send + Sync {
    /// Whatever the transport needs to cancel a subscription later
    type Handle: Send;

    async fn subscribe(&self, template: &str) -> Result<Self::Handle, FetchError>;

    async fn unsubscribe(&self, handle: Self::Handle);
}

/// Template listing the device ids of an integration's entities
pub fn integration_devices_template(domain: &str) -> String {
    format!(
        "{{{{ integration_entities('{domain}') | map('device_id') | reject('none') | unique | list }}}}"
    )
}

/// A single, re-keyable template subscription
pub struct TemplateSubscription<C: TemplateConnector> {
    connector: C,
    active: Option<(String, C::Handle)>,
}

impl<C: TemplateConnector> TemplateSubscription<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            active: None,
        }
    }

    /// Key of the live subscription, if any
    pub fn key(&self) -> Option<&str> {
        self.active.as_ref().map(|(key, _)| key.as_str())
    }

    pub fn is_connected(&self) -> bool {
        self.active.is_some()
    }

    /// Handle of the live subscription, for reading updates
    pub fn handle_mut(&mut self) -> Option<&mut C::Handle> {
        self.active.as_mut().map(|(_, handle)| handle)
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Subscribe under `key`
    ///
    /// Returns `Ok(false)` without touching the transport when `key` is
    /// already live. Otherwise the previous subscription is torn down first.
    /// On failure nothing stays connected.
    pub async fn connect(&mut self, key: &str) -> Result<bool, FetchError> {
        if self.key() == Some(key) {
            return Ok(false);
        }

        self.disconnect().await;

        let handle = self.connector.subscribe(key).await?;
        debug!(template = %key, "Template subscription established");
        self.active = Some((key.to_string(), handle));
        Ok(true)
    }

    /// Tear down the live subscription; a no-op when there is none
    pub async fn disconnect(&mut self) {
        if let Some((key, handle)) = self.active.take() {
            self.connector.unsubscribe(handle).await;
            debug!(template = %key, "Template subscription torn down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingConnector {
        next_id: AtomicU64,
        subscribed: Mutex<Vec<String>>,
        unsubscribed: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl TemplateConnector for CountingConnector {
        type Handle = u64;

        async fn subscribe(&self, template: &str) -> Result<u64, FetchError> {
            if template.is_empty() {
                return Err(FetchError::Subscribe {
                    message: "empty template".into(),
                });
            }
            self.subscribed.lock().unwrap().push(template.to_string());
            Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
        }

        async fn unsubscribe(&self, handle: u64) {
            self.unsubscribed.lock().unwrap().push(handle);
        }
    }

    #[test]
    fn test_integration_template() {
        assert_eq!(
            integration_devices_template("zwave_js"),
            "{{ integration_entities('zwave_js') | map('device_id') | reject('none') | unique | list }}"
        );
    }

    #[tokio::test]
    async fn test_same_key_is_noop() {
        let mut sub = TemplateSubscription::new(CountingConnector::default());
        assert!(sub.connect("a").await.unwrap());
        assert!(!sub.connect("a").await.unwrap());

        assert_eq!(*sub.connector().subscribed.lock().unwrap(), vec!["a"]);
        assert!(sub.connector().unsubscribed.lock().unwrap().is_empty());
        assert_eq!(sub.key(), Some("a"));
    }

    #[tokio::test]
    async fn test_new_key_tears_down_previous() {
        let mut sub = TemplateSubscription::new(CountingConnector::default());
        sub.connect("a").await.unwrap();
        sub.connect("b").await.unwrap();

        assert_eq!(*sub.connector().subscribed.lock().unwrap(), vec!["a", "b"]);
        assert_eq!(*sub.connector().unsubscribed.lock().unwrap(), vec![0]);
        assert_eq!(sub.handle_mut().copied(), Some(1));
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let mut sub = TemplateSubscription::new(CountingConnector::default());
        sub.disconnect().await;
        assert!(!sub.is_connected());

        sub.connect("a").await.unwrap();
        sub.disconnect().await;
        sub.disconnect().await;

        assert_eq!(*sub.connector().unsubscribed.lock().unwrap(), vec![0]);
        assert_eq!(sub.key(), None);
    }

    #[tokio::test]
    async fn test_failed_connect_leaves_nothing_connected() {
        let mut sub = TemplateSubscription::new(CountingConnector::default());
        sub.connect("a").await.unwrap();

        let err = sub.connect("").await.unwrap_err();
        assert!(matches!(err, FetchError::Subscribe { .. }));
        assert!(!sub.is_connected());
        assert_eq!(*sub.connector().unsubscribed.lock().unwrap(), vec![0]);

        // Reconnecting with the old key subscribes again
        assert!(sub.connect("a").await.unwrap());
    }
}
