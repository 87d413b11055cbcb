//! Light — a dimmable device with 0–100 percent brightness.

use crate::capability::Dimmable;
use crate::device::SmartDevice;
use crate::error::ValidationError;
use crate::kind::DeviceKind;
use crate::observer::{ObserverRegistry, SharedObserver};

/// Brightness applied when a light is turned on without a value.
pub const ON_DEFAULT_BRIGHTNESS: u8 = 100;

/// A smart light with adjustable brightness.
///
/// Starts off with 0% brightness. Setting any brightness above zero
/// powers the light on; turning off resets brightness to zero.
pub struct Light {
    name: String,
    is_on: bool,
    brightness: u8,
    observers: ObserverRegistry,
}

impl Light {
    /// Create a light in the off state.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_on: false,
            brightness: 0,
            observers: ObserverRegistry::new(),
        }
    }
}

impl Dimmable for Light {
    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn set_brightness(&mut self, brightness: u8) -> Result<(), ValidationError> {
        if brightness > 100 {
            return Err(ValidationError::Brightness { value: brightness });
        }
        self.brightness = brightness;
        self.is_on = brightness > 0;
        tracing::debug!(name = %self.name, brightness, "brightness set");
        self.observers.notify(self);
        Ok(())
    }
}

impl SmartDevice for Light {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Light
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn turn_on(&mut self) {
        self.is_on = true;
        self.brightness = ON_DEFAULT_BRIGHTNESS;
        tracing::debug!(name = %self.name, "light turned on");
        self.observers.notify(self);
    }

    fn turn_off(&mut self) {
        self.is_on = false;
        self.brightness = 0;
        tracing::debug!(name = %self.name, "light turned off");
        self.observers.notify(self);
    }

    fn status(&self) -> String {
        format!(
            "{} is {}, Brightness: {}%",
            self.name,
            if self.is_on { "ON" } else { "OFF" },
            self.brightness
        )
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.add(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify(self);
    }

    fn as_dimmable_mut(&mut self) -> Option<&mut dyn Dimmable> {
        Some(self)
    }
}
