//! Manual policy — the user drives, the system stays out of the way.

use domo_domain::device::DeviceHandle;

use crate::strategy::ControlStrategy;

/// Policy that makes no changes; activation is informational only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualControl;

impl ControlStrategy for ManualControl {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn description(&self) -> &'static str {
        "devices are controlled directly by the user"
    }

    fn control_devices(&mut self, devices: &[DeviceHandle]) {
        tracing::info!(devices = devices.len(), "manual mode: no automatic changes");
    }
}

#[cfg(test)]
mod tests {
    use domo_domain::device::{lock, share};
    use domo_domain::devices::Light;

    use super::*;

    #[test]
    fn should_leave_devices_untouched() {
        let lamp = share(Light::new("Lamp"));
        lock(&lamp).turn_on();

        let mut policy = ManualControl;
        policy.control_devices(&[lamp.clone()]);

        assert!(lock(&lamp).is_on());
        assert_eq!(policy.name(), "manual");
    }
}
