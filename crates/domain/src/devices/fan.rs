//! Legacy fan and its adapter.
//!
//! [`LegacyFan`] predates the kernel's device interface and keeps its
//! own vocabulary (`start_fan` / `stop_fan`). [`FanAdapter`] wraps it so
//! the rest of the system can treat it like any other device.

use crate::capability::SpeedControlled;
use crate::device::SmartDevice;
use crate::kind::DeviceKind;
use crate::observer::{ObserverRegistry, SharedObserver};

/// Highest speed step a fan supports (0 = off, 1 = low, 2 = medium, 3 = high).
pub const MAX_FAN_SPEED: u8 = 3;

/// A legacy fan with its own, pre-smart-home interface.
pub struct LegacyFan {
    name: String,
    running: bool,
    speed: u8,
}

impl LegacyFan {
    /// Create a stopped fan.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            running: false,
            speed: 0,
        }
    }

    /// The fan's identifier.
    #[must_use]
    pub fn fan_name(&self) -> &str {
        &self.name
    }

    /// Whether the blades are spinning.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current speed step.
    #[must_use]
    pub fn speed(&self) -> u8 {
        self.speed
    }

    /// Start the fan at low speed.
    pub fn start_fan(&mut self) {
        self.running = true;
        self.speed = 1;
        tracing::debug!(name = %self.name, speed = self.speed, "fan started");
    }

    /// Stop the fan.
    pub fn stop_fan(&mut self) {
        self.running = false;
        self.speed = 0;
        tracing::debug!(name = %self.name, "fan stopped");
    }

    /// Set the speed step. Out-of-range values are rejected and logged;
    /// returns `false` and leaves state unchanged.
    pub fn set_speed(&mut self, speed: u8) -> bool {
        if speed > MAX_FAN_SPEED {
            tracing::warn!(name = %self.name, speed, "invalid fan speed rejected, must be 0-3");
            return false;
        }
        self.speed = speed;
        self.running = speed > 0;
        tracing::debug!(name = %self.name, speed, "fan speed set");
        true
    }

    /// Status line in the fan's own vocabulary.
    #[must_use]
    pub fn fan_status(&self) -> String {
        format!(
            "{} is {}, Speed: {}",
            self.name,
            if self.running { "RUNNING" } else { "STOPPED" },
            self.speed
        )
    }
}

/// Adapter exposing a [`LegacyFan`] as a [`SmartDevice`].
///
/// `turn_on` translates to `start_fan`, `turn_off` to `stop_fan`.
pub struct FanAdapter {
    fan: LegacyFan,
    observers: ObserverRegistry,
}

impl FanAdapter {
    /// Wrap a legacy fan.
    #[must_use]
    pub fn new(fan: LegacyFan) -> Self {
        Self {
            fan,
            observers: ObserverRegistry::new(),
        }
    }
}

impl SpeedControlled for FanAdapter {
    fn speed(&self) -> u8 {
        self.fan.speed()
    }

    fn set_speed(&mut self, speed: u8) -> bool {
        let changed = self.fan.set_speed(speed);
        if changed {
            self.observers.notify(self);
        }
        changed
    }
}

impl SmartDevice for FanAdapter {
    fn name(&self) -> &str {
        self.fan.fan_name()
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Fan
    }

    fn is_on(&self) -> bool {
        self.fan.is_running()
    }

    fn turn_on(&mut self) {
        self.fan.start_fan();
        self.observers.notify(self);
    }

    fn turn_off(&mut self) {
        self.fan.stop_fan();
        self.observers.notify(self);
    }

    fn status(&self) -> String {
        self.fan.fan_status()
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.add(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify(self);
    }

    fn as_speed_mut(&mut self) -> Option<&mut dyn SpeedControlled> {
        Some(self)
    }
}
