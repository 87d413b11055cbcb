//! Scheduled policy — fixed rule sets keyed on the time of day.

use chrono::{Local, Timelike};
use domo_domain::device::{DeviceHandle, lock};

use crate::strategy::ControlStrategy;

/// The four disjoint time-of-day windows the schedule branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleWindow {
    /// 06:00–08:00.
    Morning,
    /// 08:00–18:00.
    Daytime,
    /// 18:00–22:00.
    Evening,
    /// 22:00–06:00.
    Night,
}

impl ScheduleWindow {
    /// Classify an hour of day (0–23) into its window.
    #[must_use]
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            6..8 => Self::Morning,
            8..18 => Self::Daytime,
            18..22 => Self::Evening,
            _ => Self::Night,
        }
    }

    /// Apply this window's rule set to the given devices.
    ///
    /// Rooms are matched by case-insensitive name substring. Individual
    /// adjustment failures are logged and skipped; the sweep always
    /// visits every device.
    pub fn apply(self, devices: &[DeviceHandle]) {
        match self {
            Self::Morning => {
                power_room(devices, "bedroom", true);
                set_all_brightness(devices, 60);
            }
            Self::Daytime => {
                power_room(devices, "bedroom", false);
                power_room(devices, "living room", false);
            }
            Self::Evening => {
                power_room(devices, "living room", true);
                set_all_brightness(devices, 70);
                set_all_targets(devices, 70.0);
            }
            Self::Night => {
                set_all_brightness(devices, 10);
                set_all_targets(devices, 68.0);
            }
        }
    }
}

fn in_room(device_name: &str, room: &str) -> bool {
    device_name.to_ascii_lowercase().contains(room)
}

fn power_room(devices: &[DeviceHandle], room: &str, on: bool) {
    for device in devices {
        let mut guard = lock(device);
        if in_room(guard.name(), room) {
            if on {
                guard.turn_on();
            } else {
                guard.turn_off();
            }
        }
    }
}

fn set_all_brightness(devices: &[DeviceHandle], brightness: u8) {
    for device in devices {
        let mut guard = lock(device);
        let Some(dimmable) = guard.as_dimmable_mut() else {
            continue;
        };
        if let Err(err) = dimmable.set_brightness(brightness) {
            tracing::warn!(%err, device = %guard.name(), "schedule brightness skipped");
        }
    }
}

fn set_all_targets(devices: &[DeviceHandle], target: f64) {
    for device in devices {
        let mut guard = lock(device);
        let Some(climate) = guard.as_climate_mut() else {
            continue;
        };
        if let Err(err) = climate.set_target_temp(target) {
            tracing::warn!(%err, device = %guard.name(), "schedule temperature skipped");
        }
    }
}

/// Policy that applies the rule set for the current wall-clock window.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScheduledControl;

impl ControlStrategy for ScheduledControl {
    fn name(&self) -> &'static str {
        "scheduled"
    }

    fn description(&self) -> &'static str {
        "applies a fixed rule set for the current time of day"
    }

    fn control_devices(&mut self, devices: &[DeviceHandle]) {
        let hour = Local::now().hour();
        let window = ScheduleWindow::for_hour(hour);
        tracing::info!(hour, ?window, devices = devices.len(), "applying schedule");
        window.apply(devices);
    }
}
