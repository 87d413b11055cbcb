//! Observers — synchronous subscribers notified after every mutation.
//!
//! Delivery is exactly once per mutating call, in subscription order,
//! on the caller's thread. There is no deduplication: subscribing the
//! same observer twice yields two notifications.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::device::SmartDevice;
use crate::time::{self, Timestamp};

/// A subscriber interested in device state changes.
pub trait Observer: Send + Sync {
    /// Called after the device completed a state-mutating operation.
    fn update(&self, device: &dyn SmartDevice);
}

/// Shared reference to an observer, held by every device it watches.
pub type SharedObserver = Arc<dyn Observer>;

/// Per-device subscriber list.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<SharedObserver>,
}

impl ObserverRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber. Duplicates are kept.
    pub fn add(&mut self, observer: SharedObserver) {
        self.observers.push(observer);
    }

    /// Invoke every subscriber in subscription order.
    pub fn notify(&self, device: &dyn SmartDevice) {
        for observer in &self.observers {
            observer.update(device);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// One logged device change.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeRecord {
    /// When the change was observed.
    pub at: Timestamp,
    /// Name of the device that changed.
    pub device: String,
    /// The device's status line at the time of the change.
    pub status: String,
}

/// An observer that keeps a timestamped history of device changes.
///
/// The controller subscribes one of these to every registered device so
/// every mutation is visible without polling.
#[derive(Default)]
pub struct ChangeLog {
    records: Mutex<Vec<ChangeRecord>>,
}

impl ChangeLog {
    /// Create an empty change log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<ChangeRecord> {
        self.records().clone()
    }

    /// Number of recorded changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Drop all records.
    pub fn clear(&self) {
        self.records().clear();
        tracing::debug!("change log cleared");
    }

    fn records(&self) -> std::sync::MutexGuard<'_, Vec<ChangeRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Observer for ChangeLog {
    fn update(&self, device: &dyn SmartDevice) {
        let record = ChangeRecord {
            at: time::now(),
            device: device.name().to_owned(),
            status: device.status(),
        };
        tracing::debug!(device = %record.device, status = %record.status, "device changed");
        self.records().push(record);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::devices::Light;

    #[derive(Default)]
    struct CountingObserver {
        calls: AtomicUsize,
    }

    impl Observer for CountingObserver {
        fn update(&self, _device: &dyn SmartDevice) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn should_notify_each_subscriber_once_per_mutation() {
        let first = Arc::new(CountingObserver::default());
        let second = Arc::new(CountingObserver::default());

        let mut light = Light::new("Lamp");
        light.add_observer(first.clone());
        light.add_observer(second.clone());

        light.turn_on();

        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn should_notify_duplicate_subscription_twice() {
        let observer = Arc::new(CountingObserver::default());

        let mut light = Light::new("Lamp");
        light.add_observer(observer.clone());
        light.add_observer(observer.clone());

        light.turn_off();

        assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn should_record_status_in_change_log() {
        let log = Arc::new(ChangeLog::new());

        let mut light = Light::new("Lamp");
        light.add_observer(log.clone());
        light.turn_on();

        assert_eq!(log.len(), 1);
        let entries = log.entries();
        assert_eq!(entries[0].device, "Lamp");
        assert!(entries[0].status.contains("ON"));
    }

    #[test]
    fn should_record_changes_in_order() {
        let log = Arc::new(ChangeLog::new());

        let mut light = Light::new("Lamp");
        light.add_observer(log.clone());
        light.turn_on();
        light.turn_off();

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].status.contains("ON"));
        assert!(entries[1].status.contains("OFF"));
        assert!(entries[0].at <= entries[1].at);
    }

    #[test]
    fn should_clear_change_log() {
        let log = Arc::new(ChangeLog::new());

        let mut light = Light::new("Lamp");
        light.add_observer(log.clone());
        light.turn_on();
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn should_serialize_change_record_to_json() {
        let record = ChangeRecord {
            at: crate::time::now(),
            device: "Lamp".to_owned(),
            status: "Lamp is ON, Brightness: 100%".to_owned(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"device\":\"Lamp\""));
    }

    #[test]
    fn should_report_registry_len() {
        let mut registry = ObserverRegistry::new();
        assert!(registry.is_empty());
        registry.add(Arc::new(CountingObserver::default()));
        assert_eq!(registry.len(), 1);
    }
}
