//! Thermostat — regulates temperature toward a target within 50–90 °F.

use serde::{Deserialize, Serialize};

use crate::capability::ClimateControlled;
use crate::device::SmartDevice;
use crate::error::ValidationError;
use crate::kind::DeviceKind;
use crate::observer::{ObserverRegistry, SharedObserver};

/// Target temperature a thermostat starts with.
pub const DEFAULT_TARGET_TEMP: f64 = 72.0;

/// What a thermostat is doing right now, derived from current vs target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermostatMode {
    Heating,
    Cooling,
    Maintaining,
    Off,
}

impl std::fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Heating => f.write_str("heating"),
            Self::Cooling => f.write_str("cooling"),
            Self::Maintaining => f.write_str("maintaining"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// A smart thermostat. Starts off; the mode is recomputed whenever the
/// power state or target changes.
pub struct Thermostat {
    name: String,
    is_on: bool,
    current_temp: f64,
    target_temp: f64,
    mode: ThermostatMode,
    observers: ObserverRegistry,
}

impl Thermostat {
    /// Create a thermostat in the off state with the given room
    /// temperature and the default 72 °F target.
    pub fn new(name: impl Into<String>, current_temp: f64) -> Self {
        Self {
            name: name.into(),
            is_on: false,
            current_temp,
            target_temp: DEFAULT_TARGET_TEMP,
            mode: ThermostatMode::Off,
            observers: ObserverRegistry::new(),
        }
    }

    /// The derived operating mode.
    #[must_use]
    pub fn mode(&self) -> ThermostatMode {
        self.mode
    }

    fn update_mode(&mut self) {
        self.mode = if !self.is_on {
            ThermostatMode::Off
        } else if (self.current_temp - self.target_temp).abs() < 0.05 {
            ThermostatMode::Maintaining
        } else if self.current_temp < self.target_temp {
            ThermostatMode::Heating
        } else {
            ThermostatMode::Cooling
        };
    }
}

impl ClimateControlled for Thermostat {
    fn current_temp(&self) -> f64 {
        self.current_temp
    }

    fn target_temp(&self) -> f64 {
        self.target_temp
    }

    fn set_target_temp(&mut self, target: f64) -> Result<(), ValidationError> {
        if !(50.0..=90.0).contains(&target) {
            return Err(ValidationError::TargetTemp { value: target });
        }
        self.target_temp = target;
        if self.is_on {
            self.update_mode();
        }
        tracing::debug!(name = %self.name, target, "target temperature set");
        self.observers.notify(self);
        Ok(())
    }
}

impl SmartDevice for Thermostat {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeviceKind {
        DeviceKind::Thermostat
    }

    fn is_on(&self) -> bool {
        self.is_on
    }

    fn turn_on(&mut self) {
        self.is_on = true;
        self.update_mode();
        tracing::debug!(name = %self.name, mode = %self.mode, "thermostat turned on");
        self.observers.notify(self);
    }

    fn turn_off(&mut self) {
        self.is_on = false;
        self.mode = ThermostatMode::Off;
        tracing::debug!(name = %self.name, "thermostat turned off");
        self.observers.notify(self);
    }

    fn status(&self) -> String {
        format!(
            "{} is {}, Current: {}°F, Target: {}°F, Mode: {}",
            self.name,
            if self.is_on { "ON" } else { "OFF" },
            self.current_temp,
            self.target_temp,
            self.mode
        )
    }

    fn add_observer(&mut self, observer: SharedObserver) {
        self.observers.add(observer);
    }

    fn notify_observers(&self) {
        self.observers.notify(self);
    }

    fn as_climate_mut(&mut self) -> Option<&mut dyn ClimateControlled> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_off_with_default_target() {
        let thermostat = Thermostat::new("Main", 70.0);
        assert!(!thermostat.is_on());
        assert!((thermostat.target_temp() - 72.0).abs() < f64::EPSILON);
        assert_eq!(thermostat.mode(), ThermostatMode::Off);
    }

    #[test]
    fn should_heat_when_current_below_target() {
        let mut thermostat = Thermostat::new("Main", 65.0);
        thermostat.turn_on();
        assert_eq!(thermostat.mode(), ThermostatMode::Heating);
    }

    #[test]
    fn should_cool_when_current_above_target() {
        let mut thermostat = Thermostat::new("Main", 85.0);
        thermostat.turn_on();
        assert_eq!(thermostat.mode(), ThermostatMode::Cooling);
    }

    #[test]
    fn should_maintain_when_current_matches_target() {
        let mut thermostat = Thermostat::new("Main", 72.0);
        thermostat.turn_on();
        assert_eq!(thermostat.mode(), ThermostatMode::Maintaining);
    }

    #[test]
    fn should_switch_to_off_mode_when_turned_off() {
        let mut thermostat = Thermostat::new("Main", 65.0);
        thermostat.turn_on();
        thermostat.turn_off();
        assert_eq!(thermostat.mode(), ThermostatMode::Off);
    }

    #[test]
    fn should_accept_target_within_range() {
        let mut thermostat = Thermostat::new("Main", 70.0);
        thermostat.set_target_temp(68.0).unwrap();
        assert!((thermostat.target_temp() - 68.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_reject_target_outside_range_without_mutating() {
        let mut thermostat = Thermostat::new("Main", 70.0);

        for invalid in [49.9, 90.1, 120.0] {
            let result = thermostat.set_target_temp(invalid);
            assert!(matches!(result, Err(ValidationError::TargetTemp { .. })));
            assert!((thermostat.target_temp() - 72.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn should_recompute_mode_when_target_changes_while_on() {
        let mut thermostat = Thermostat::new("Main", 70.0);
        thermostat.turn_on();
        assert_eq!(thermostat.mode(), ThermostatMode::Heating);

        thermostat.set_target_temp(60.0).unwrap();
        assert_eq!(thermostat.mode(), ThermostatMode::Cooling);
    }

    #[test]
    fn should_keep_mode_off_when_target_changes_while_off() {
        let mut thermostat = Thermostat::new("Main", 70.0);
        thermostat.set_target_temp(80.0).unwrap();
        assert_eq!(thermostat.mode(), ThermostatMode::Off);
    }

    #[test]
    fn should_describe_state_in_status_line() {
        let mut thermostat = Thermostat::new("Main", 70.0);
        thermostat.turn_on();
        assert_eq!(
            thermostat.status(),
            "Main is ON, Current: 70°F, Target: 72°F, Mode: heating"
        );
    }

    #[test]
    fn should_roundtrip_mode_through_serde_json() {
        let json = serde_json::to_string(&ThermostatMode::Heating).unwrap();
        assert_eq!(json, "\"heating\"");
        let parsed: ThermostatMode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ThermostatMode::Heating);
    }
}
