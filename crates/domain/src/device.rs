//! The [`SmartDevice`] trait and the shared [`DeviceHandle`].
//!
//! Every controllable unit — concrete devices, decorators, and groups —
//! implements [`SmartDevice`]. A device is shared by reference: the
//! controller, groups, decorators, and pending commands all hold a
//! [`DeviceHandle`] to the same underlying state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::capability::{AudioPlayer, ClimateControlled, Dimmable, SpeedControlled};
use crate::kind::DeviceKind;
use crate::observer::SharedObserver;

/// A named controllable unit with an on/off state.
///
/// Contract for implementors:
/// - `turn_on` / `turn_off` always succeed; `turn_on` applies the
///   kind-specific "on default" and `turn_off` resets the kind-specific
///   value to its idle state.
/// - Every successful state-mutating operation notifies observers
///   exactly once, synchronously, in subscription order.
pub trait SmartDevice: Send {
    /// The device name. Identity for lookup; unique per controller by
    /// convention, not enforced.
    fn name(&self) -> &str;

    /// The device category.
    fn kind(&self) -> DeviceKind;

    /// Whether the device is currently powered on.
    fn is_on(&self) -> bool;

    /// Power the device on, applying its on-default value.
    fn turn_on(&mut self);

    /// Power the device off, resetting its kind-specific value.
    fn turn_off(&mut self);

    /// Human-readable one-line status.
    fn status(&self) -> String;

    /// Subscribe an observer. No deduplication is performed.
    fn add_observer(&mut self, observer: SharedObserver);

    /// Notify every subscriber, in subscription order, on this thread.
    fn notify_observers(&self);

    /// Brightness capability, when the device is dimmable.
    fn as_dimmable_mut(&mut self) -> Option<&mut dyn Dimmable> {
        None
    }

    /// Climate capability, when the device regulates temperature.
    fn as_climate_mut(&mut self) -> Option<&mut dyn ClimateControlled> {
        None
    }

    /// Audio capability, when the device plays content.
    fn as_audio_mut(&mut self) -> Option<&mut dyn AudioPlayer> {
        None
    }

    /// Speed capability, when the device has discrete speed steps.
    fn as_speed_mut(&mut self) -> Option<&mut dyn SpeedControlled> {
        None
    }
}

/// Shared, mutable reference to a device.
///
/// The kernel assumes a single logical writer at a time; the mutex makes
/// re-entry from the automation loop safe, it does not provide a
/// synchronization design of its own.
pub type DeviceHandle = Arc<Mutex<dyn SmartDevice>>;

/// Wrap a device in a [`DeviceHandle`].
pub fn share<D: SmartDevice + 'static>(device: D) -> DeviceHandle {
    Arc::new(Mutex::new(device))
}

/// Lock a device handle, recovering from lock poisoning.
///
/// Device state stays consistent even when a previous holder panicked,
/// so a poisoned lock is treated as usable.
pub fn lock(handle: &DeviceHandle) -> MutexGuard<'_, dyn SmartDevice + 'static> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Whether two handles point at the same underlying device.
#[must_use]
pub fn same_device(a: &DeviceHandle, b: &DeviceHandle) -> bool {
    Arc::ptr_eq(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::Light;

    #[test]
    fn should_share_and_lock_a_device() {
        let handle = share(Light::new("Desk Lamp"));
        assert_eq!(lock(&handle).name(), "Desk Lamp");
        assert!(!lock(&handle).is_on());
    }

    #[test]
    fn should_compare_handles_by_identity() {
        let a = share(Light::new("Lamp"));
        let b = share(Light::new("Lamp"));
        assert!(same_device(&a, &a.clone()));
        assert!(!same_device(&a, &b));
    }

    #[test]
    fn should_default_capability_queries_to_none_for_non_matching_kinds() {
        let handle = share(Light::new("Lamp"));
        let mut guard = lock(&handle);
        assert!(guard.as_climate_mut().is_none());
        assert!(guard.as_audio_mut().is_none());
        assert!(guard.as_speed_mut().is_none());
    }
}
