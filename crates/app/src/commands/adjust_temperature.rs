//! Reversible target-temperature adjustment.

use domo_domain::device::{DeviceHandle, lock};
use domo_domain::error::DomoError;

use crate::command::Command;

/// Sets a climate device's target temperature; undo reapplies the target
/// the device had when the command was built.
pub struct AdjustTemperature {
    device: DeviceHandle,
    name: String,
    target: f64,
    previous: f64,
}

impl AdjustTemperature {
    /// Capture the target's current setting and build the command.
    ///
    /// The new value is range-checked on `execute`, not here.
    ///
    /// # Errors
    ///
    /// Returns [`DomoError::Unsupported`] when the target does not
    /// regulate temperature.
    pub fn new(device: DeviceHandle, target: f64) -> Result<Self, DomoError> {
        let (name, previous) = {
            let mut guard = lock(&device);
            let name = guard.name().to_owned();
            let Some(climate) = guard.as_climate_mut() else {
                return Err(DomoError::Unsupported {
                    device: name,
                    capability: "target temperature",
                });
            };
            let previous = climate.target_temp();
            (name, previous)
        };
        Ok(Self {
            device,
            name,
            target,
            previous,
        })
    }

    fn apply(&self, target: f64) -> Result<(), DomoError> {
        let mut guard = lock(&self.device);
        let Some(climate) = guard.as_climate_mut() else {
            return Err(DomoError::Unsupported {
                device: self.name.clone(),
                capability: "target temperature",
            });
        };
        climate.set_target_temp(target)?;
        Ok(())
    }
}

impl Command for AdjustTemperature {
    fn execute(&mut self) -> Result<(), DomoError> {
        self.apply(self.target)
    }

    fn undo(&mut self) -> Result<(), DomoError> {
        self.apply(self.previous)
    }

    fn description(&self) -> String {
        format!("set {} target to {}°F", self.name, self.target)
    }
}
