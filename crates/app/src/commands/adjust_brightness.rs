//! Reversible brightness adjustment.

use domo_domain::device::{DeviceHandle, lock};
use domo_domain::error::DomoError;

use crate::command::Command;

/// Sets a dimmable device's brightness; undo reapplies the brightness
/// the device had when the command was built.
pub struct AdjustBrightness {
    device: DeviceHandle,
    name: String,
    brightness: u8,
    previous: u8,
}

impl AdjustBrightness {
    /// Capture the target's current brightness and build the command.
    ///
    /// The new value is range-checked on `execute`, not here, so a
    /// command built with an out-of-range value fails cleanly instead of
    /// mutating anything.
    ///
    /// # Errors
    ///
    /// Returns [`DomoError::Unsupported`] when the target is not
    /// dimmable.
    pub fn new(device: DeviceHandle, brightness: u8) -> Result<Self, DomoError> {
        let (name, previous) = {
            let mut guard = lock(&device);
            let name = guard.name().to_owned();
            let Some(dimmable) = guard.as_dimmable_mut() else {
                return Err(DomoError::Unsupported {
                    device: name,
                    capability: "brightness",
                });
            };
            let previous = dimmable.brightness();
            (name, previous)
        };
        Ok(Self {
            device,
            name,
            brightness,
            previous,
        })
    }

    fn apply(&self, brightness: u8) -> Result<(), DomoError> {
        let mut guard = lock(&self.device);
        let Some(dimmable) = guard.as_dimmable_mut() else {
            return Err(DomoError::Unsupported {
                device: self.name.clone(),
                capability: "brightness",
            });
        };
        dimmable.set_brightness(brightness)?;
        Ok(())
    }
}

impl Command for AdjustBrightness {
    fn execute(&mut self) -> Result<(), DomoError> {
        self.apply(self.brightness)
    }

    fn undo(&mut self) -> Result<(), DomoError> {
        self.apply(self.previous)
    }

    fn description(&self) -> String {
        format!("set {} brightness to {}%", self.name, self.brightness)
    }
}
