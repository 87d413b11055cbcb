//! Reversible power-off command.

use domo_domain::device::{DeviceHandle, lock};
use domo_domain::error::DomoError;

use crate::command::Command;

/// Turns a device off; undo restores the power state the device had when
/// the command was built.
pub struct TurnOff {
    device: DeviceHandle,
    name: String,
    was_on: bool,
}

impl TurnOff {
    /// Capture the target's current power state and build the command.
    #[must_use]
    pub fn new(device: DeviceHandle) -> Self {
        let (name, was_on) = {
            let guard = lock(&device);
            (guard.name().to_owned(), guard.is_on())
        };
        Self {
            device,
            name,
            was_on,
        }
    }
}

impl Command for TurnOff {
    fn execute(&mut self) -> Result<(), DomoError> {
        lock(&self.device).turn_off();
        Ok(())
    }

    fn undo(&mut self) -> Result<(), DomoError> {
        let mut guard = lock(&self.device);
        if self.was_on {
            guard.turn_on();
        } else {
            guard.turn_off();
        }
        Ok(())
    }

    fn description(&self) -> String {
        format!("turn off {}", self.name)
    }
}
