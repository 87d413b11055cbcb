//! Device group — an ordered composite controlled as a single unit.

use crate::device::{DeviceHandle, SmartDevice, lock, same_device};
use crate::kind::DeviceKind;
use crate::observer::{ObserverRegistry, SharedObserver};

/// An ordered collection of devices (or decorators, or nested groups)
/// that cascades `turn_on` / `turn_off` to every member.
///
/// Membership is a non-owning reference: removing a device from a group
/// does not destroy it if anything else still holds its handle. The
/// group's own `is_on` reflects the last cascaded command, not a poll of
/// its members. Cascades continue past individual members rather than
/// aborting mid-iteration.
pub struct DeviceGroup {
    name: String,
    devices: Vec<DeviceHandle>,
    is_on: bool,
    observers: ObserverRegistry,
}

impl DeviceGroup {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: Vec::new(),
            is_on: false,
            observers: ObserverRegistry::new(),
        }
    }

    /// Append a device. Insertion order is preserved; duplicates are
    /// neither enforced nor rejected.
    pub fn add_device(&mut self, device: DeviceHandle) {
        self.devices.push(device);
        tracing::debug!(group = %self.name, members = self.devices.len(), "device added to group");
        self.observers.notify(self);
    }

    /// Remove the first member that is the same underlying device.
    /// Returns `false` when the device is not a member.
    pub fn remove_device(&mut self, device: &DeviceHandle) -> bool {
        let Some(index) = self.devices.iter().position(|d| same_device(d, device)) else {
            return false;
        };
        self.devices.remove(index);
        tracing::debug!(group = %self.name, members = self.devices.len(), "device removed from group");
        self.observers.notify(self);
        true
    }

    /// Snapshot copy of the members, in insertion order.
    #[must_use]
    pub fn devices(&self) -> Vec<DeviceHandle> {
        self.devices.clone()
    }

    /// Number of members.
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl SmartDevice for DeviceGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Group
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn turn_on(&mut self) {
        tracing::debug!(group = %self.name, members = self.devices.len(), "group turning on");
        for device in &self.devices {
            lock(device).turn_on();
        }
        self.is_on = true;
        self.observers.notify(self);
    }

    fn turn_off(&mut self) {
        tracing::debug!(group = %self.name, members = self.devices.len(), "group turning off");
        for device in &self.devices {
            lock(device).turn_off();
        }
        self.is_on = false;
        self.observers.notify(self);
    }

    fn status(&self) -> String {
        let mut status = format!("Group: {} ({} devices)", self.name, self.devices.len());
        if self.devices.is_empty() {
            status.push_str("\n  - No devices");
        } else {
            for device in &self.devices {
                status.push_str("\n  - ");
                status.push_str(&lock(device).status());
            }
        }
        status
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.add(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify(self);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::device::share;
    use crate::devices::{Light, Speaker};
    use crate::observer::Observer;

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
    fn should_turn_on_every_member_in_insertion_order() {
        let lamp = share(Light::new("Lamp"));
        let speaker = share(Speaker::new("Speaker"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp.clone());
        group.add_device(speaker.clone());

        group.turn_on();

        assert!(group.is_on());
        assert!(lock(&lamp).is_on());
        assert!(lock(&speaker).is_on());
    }

    #[test]
    fn should_notify_each_member_exactly_once_per_cascade() {
        let observer = Arc::new(CountingObserver::default());

        let lamp = share(Light::new("Lamp"));
        let speaker = share(Speaker::new("Speaker"));
        lock(&lamp).add_observer(observer.clone());
        lock(&speaker).add_observer(observer.clone());

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp);
        group.add_device(speaker);

        group.turn_on();

        assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn should_turn_off_every_member() {
        let lamp = share(Light::new("Lamp"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp.clone());
        group.turn_on();
        group.turn_off();

        assert!(!group.is_on());
        assert!(!lock(&lamp).is_on());
    }

    #[test]
    fn should_remove_member_without_destroying_it() {
        let lamp = share(Light::new("Lamp"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp.clone());

        assert!(group.remove_device(&lamp));
        assert_eq!(group.device_count(), 0);
        // Still usable through the remaining handle.
        lock(&lamp).turn_on();
        assert!(lock(&lamp).is_on());
    }

    #[test]
    fn should_return_false_when_removing_non_member() {
        let lamp = share(Light::new("Lamp"));
        let other = share(Light::new("Other"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp);

        assert!(!group.remove_device(&other));
        assert_eq!(group.device_count(), 1);
    }

    #[test]
    fn should_return_snapshot_not_live_view() {
        let lamp = share(Light::new("Lamp"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp.clone());

        let snapshot = group.devices();
        group.remove_device(&lamp);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(group.device_count(), 0);
    }

    #[test]
    fn should_keep_duplicate_members() {
        let lamp = share(Light::new("Lamp"));

        let mut group = DeviceGroup::new("Living Room");
        group.add_device(lamp.clone());
        group.add_device(lamp.clone());

        assert_eq!(group.device_count(), 2);
        // remove takes out one occurrence at a time
        assert!(group.remove_device(&lamp));
        assert_eq!(group.device_count(), 1);
    }

    #[test]
    fn should_cascade_into_nested_groups() {
        let lamp = share(Light::new("Lamp"));

        let mut inner = DeviceGroup::new("Reading Corner");
        inner.add_device(lamp.clone());

        let mut outer = DeviceGroup::new("Living Room");
        outer.add_device(share(inner));
        outer.turn_on();

        assert!(lock(&lamp).is_on());
    }

    #[test]
    fn should_include_name_count_and_member_statuses() {
        let mut group = DeviceGroup::new("Living Room");
        assert_eq!(group.status(), "Group: Living Room (0 devices)\n  - No devices");

        group.add_device(share(Light::new("Lamp")));
        let status = group.status();
        assert!(status.starts_with("Group: Living Room (1 devices)"));
        assert!(status.contains("Lamp is OFF, Brightness: 0%"));
    }

    #[test]
    fn should_notify_group_observers_on_membership_change() {
        let observer = Arc::new(CountingObserver::default());

        let mut group = DeviceGroup::new("Living Room");
        group.add_observer(observer.clone());

        let lamp = share(Light::new("Lamp"));
        group.add_device(lamp.clone());
        group.remove_device(&lamp);

        assert_eq!(observer.calls.load(Ordering::SeqCst), 2);
    }
}
